//! STL serialization for panel solids.

use crate::model3d::Mesh3D;
use facepanel_core::{ExportError, StlFormat};
use std::fmt::Write as _;
use std::io::Cursor;
use tracing::debug;

/// Solid name written into ASCII STL headers
pub const STL_SOLID_NAME: &str = "panel";

fn to_stl_triangles(mesh: &Mesh3D) -> Vec<stl_io::Triangle> {
    mesh.triangles
        .iter()
        .map(|tri| stl_io::Triangle {
            normal: stl_io::Normal::new([tri.normal.x, tri.normal.y, tri.normal.z]),
            vertices: tri
                .vertices
                .map(|v| stl_io::Vertex::new([v.x, v.y, v.z])),
        })
        .collect()
}

/// Serialize `mesh` as binary STL
pub fn write_binary_stl(mesh: &Mesh3D) -> Result<Vec<u8>, ExportError> {
    let triangles = to_stl_triangles(mesh);
    let mut bytes = Vec::with_capacity(84 + triangles.len() * 50);
    stl_io::write_stl(&mut bytes, triangles.iter()).map_err(|e| ExportError::Stl {
        reason: e.to_string(),
    })?;
    debug!("Wrote binary STL: {} triangles", triangles.len());
    Ok(bytes)
}

/// Serialize `mesh` as ASCII STL
pub fn write_ascii_stl(mesh: &Mesh3D, name: &str) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "solid {}", name);
    for tri in &mesh.triangles {
        let n = tri.normal;
        let _ = writeln!(out, "  facet normal {} {} {}", n.x, n.y, n.z);
        let _ = writeln!(out, "    outer loop");
        for v in &tri.vertices {
            let _ = writeln!(out, "      vertex {} {} {}", v.x, v.y, v.z);
        }
        let _ = writeln!(out, "    endloop");
        let _ = writeln!(out, "  endfacet");
    }
    let _ = writeln!(out, "endsolid {}", name);
    debug!("Wrote ASCII STL: {} triangles", mesh.triangle_count());
    out
}

/// Serialize `mesh` in the requested encoding
pub fn write_stl(mesh: &Mesh3D, format: StlFormat) -> Result<Vec<u8>, ExportError> {
    match format {
        StlFormat::Ascii => Ok(write_ascii_stl(mesh, STL_SOLID_NAME).into_bytes()),
        StlFormat::Binary => write_binary_stl(mesh),
    }
}

/// Parse ASCII or binary STL bytes back into a mesh
pub fn read_stl(bytes: &[u8]) -> Result<Mesh3D, ExportError> {
    let mut cursor = Cursor::new(bytes);
    let indexed = stl_io::read_stl(&mut cursor).map_err(|e| ExportError::Stl {
        reason: e.to_string(),
    })?;
    debug!("Read STL: {} faces", indexed.faces.len());
    Ok(Mesh3D::from_stl_mesh(&indexed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::PanelSpec;
    use crate::solid::{build_panel_solid, SolidOptions};

    fn box_mesh() -> Mesh3D {
        build_panel_solid(&PanelSpec::new(10.0, 6.0, 0.5), &SolidOptions::default())
    }

    #[test]
    fn test_ascii_structure() {
        let text = write_ascii_stl(&box_mesh(), "panel");
        assert!(text.starts_with("solid panel\n"));
        assert!(text.trim_end().ends_with("endsolid panel"));
        assert_eq!(text.matches("facet normal").count(), 12);
        assert_eq!(text.matches("vertex ").count(), 36);
    }

    #[test]
    fn test_binary_size_and_read_back() {
        let mesh = box_mesh();
        let bytes = write_binary_stl(&mesh).unwrap();
        assert_eq!(bytes.len(), 84 + 12 * 50);

        let parsed = read_stl(&bytes).unwrap();
        assert_eq!(parsed.triangle_count(), 12);
        let size = parsed.size();
        assert!((size.x - 10.0).abs() < 1e-4);
        assert!((size.z - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_format_dispatch() {
        let mesh = box_mesh();
        let ascii = write_stl(&mesh, StlFormat::Ascii).unwrap();
        assert!(ascii.starts_with(b"solid"));
        let binary = write_stl(&mesh, StlFormat::Binary).unwrap();
        assert_eq!(binary.len(), 84 + 12 * 50);
    }
}
