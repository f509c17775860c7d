//! # Panel Solid Builder
//!
//! Builds the panel as a closed triangle mesh. The cap profile (a rectangle
//! with optional round screw-hole cutouts) is tessellated with lyon and then
//! extruded along Z, either straight or with a symmetric 45 degree bevel on the
//! front and back edges.
//!
//! Holes run straight through the full depth; only the outer boundary is
//! beveled.

use crate::dimensions::PanelSpec;
use crate::model3d::{Mesh3D, Triangle3D};
use crate::screw_holes::ScrewHoleSet;
use facepanel_core::constants::DEFAULT_CIRCLE_SEGMENTS;
use lyon::math::{point, Point};
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, TessellationError,
    VertexBuffers,
};
use nalgebra::Point3;
use std::f64::consts::TAU;
use tracing::{debug, warn};

/// Twice the signed area below which a cap triangle is dropped
const DEGENERATE_AREA: f32 = 1e-12;

/// Options for [`build_panel_solid`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolidOptions {
    /// Cut mounting holes even when the panel has them switched off
    pub force_screw_holes: bool,
    /// Segments approximating each hole outline
    pub circle_segments: usize,
}

impl Default for SolidOptions {
    fn default() -> Self {
        Self {
            force_screw_holes: false,
            circle_segments: DEFAULT_CIRCLE_SEGMENTS,
        }
    }
}

impl SolidOptions {
    /// Options used for export, which bakes the holes in
    pub fn for_export(circle_segments: usize) -> Self {
        Self {
            force_screw_holes: true,
            circle_segments,
        }
    }
}

type Ring = Vec<[f32; 2]>;

/// Build the panel solid, centered on its bounding box.
pub fn build_panel_solid(spec: &PanelSpec, options: &SolidOptions) -> Mesh3D {
    let chamfer = spec.chamfer();
    let holes = ScrewHoleSet::for_spec(spec, options.force_screw_holes);
    let segments = options.circle_segments.max(3);

    let hole_rings: Vec<Ring> = holes
        .centers()
        .iter()
        .map(|center| circle_ring(center.x, center.y, holes.radius(), segments))
        .collect();

    // Outer rings from back (-z) to front (+z); the caps sit on the first and last
    let rings: Vec<(f32, Ring)> = if chamfer.enabled {
        let printable = spec.printable_area();
        let half_extrusion = chamfer.extrusion_depth / 2.0;
        let outer_z = half_extrusion + chamfer.bevel;
        let inner = rect_ring(printable.width / 2.0, printable.height / 2.0);
        let outer = rect_ring(
            printable.width / 2.0 + chamfer.bevel,
            printable.height / 2.0 + chamfer.bevel,
        );
        vec![
            (-outer_z as f32, inner.clone()),
            (-half_extrusion as f32, outer.clone()),
            (half_extrusion as f32, outer),
            (outer_z as f32, inner),
        ]
    } else {
        let half_depth = spec.depth() / 2.0;
        let outline = rect_ring(spec.width() / 2.0, spec.height() / 2.0);
        vec![
            (-half_depth as f32, outline.clone()),
            (half_depth as f32, outline),
        ]
    };

    let (back_z, cap_outline) = (rings[0].0, &rings[0].1);
    let front_z = rings[rings.len() - 1].0;

    let (cap, hole_rings) = match tessellate_cap(cap_outline, &hole_rings) {
        Ok(cap) => (cap, hole_rings),
        Err(e) => {
            warn!("Cap tessellation failed, building panel without holes: {:?}", e);
            (quad_cap(cap_outline), Vec::new())
        }
    };

    let mut triangles = Vec::with_capacity(cap.len() * 2 + rings.len() * 8);

    for [a, b, c] in &cap {
        triangles.push(Triangle3D::new(at(a, front_z), at(b, front_z), at(c, front_z)));
        triangles.push(Triangle3D::new(at(a, back_z), at(c, back_z), at(b, back_z)));
    }

    for pair in rings.windows(2) {
        let (z0, lower) = &pair[0];
        let (z1, upper) = &pair[1];
        push_wall(&mut triangles, lower, *z0, upper, *z1, false);
    }

    for ring in &hole_rings {
        push_wall(&mut triangles, ring, back_z, ring, front_z, true);
    }

    let mut mesh = Mesh3D::new(triangles);
    mesh.center();
    debug!(
        "Built panel solid: {} triangles, {} holes, chamfer {}",
        mesh.triangle_count(),
        hole_rings.len(),
        chamfer.enabled
    );
    mesh
}

fn at(p: &[f32; 2], z: f32) -> Point3<f32> {
    Point3::new(p[0], p[1], z)
}

/// Counter-clockwise rectangle centered on the origin
fn rect_ring(half_width: f64, half_height: f64) -> Ring {
    let (x, y) = (half_width as f32, half_height as f32);
    vec![[-x, -y], [x, -y], [x, y], [-x, y]]
}

/// Counter-clockwise polygon approximating a circle
fn circle_ring(cx: f64, cy: f64, radius: f64, segments: usize) -> Ring {
    (0..segments)
        .map(|i| {
            let angle = TAU * i as f64 / segments as f64;
            [
                (cx + radius * angle.cos()) as f32,
                (cy + radius * angle.sin()) as f32,
            ]
        })
        .collect()
}

/// Triangulate the cap outline minus the holes, all triangles counter-clockwise
fn tessellate_cap(
    outline: &[[f32; 2]],
    holes: &[Ring],
) -> Result<Vec<[[f32; 2]; 3]>, TessellationError> {
    let mut builder = Path::builder();
    for ring in std::iter::once(outline).chain(holes.iter().map(Vec::as_slice)) {
        let mut points = ring.iter().map(|p| point(p[0], p[1]));
        if let Some(first) = points.next() {
            builder.begin(first);
            for p in points {
                builder.line_to(p);
            }
            builder.close();
        }
    }
    let path = builder.build();

    let mut geometry: VertexBuffers<Point, u32> = VertexBuffers::new();
    let mut tessellator = FillTessellator::new();
    tessellator.tessellate_path(
        &path,
        &FillOptions::default().with_fill_rule(FillRule::EvenOdd),
        &mut BuffersBuilder::new(&mut geometry, |vertex: FillVertex| vertex.position()),
    )?;

    let triangles = geometry
        .indices
        .chunks_exact(3)
        .filter_map(|tri| {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| {
                let p = geometry.vertices[i as usize];
                [p.x, p.y]
            });
            let cross = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
            if cross.abs() <= DEGENERATE_AREA {
                None
            } else if cross > 0.0 {
                Some([a, b, c])
            } else {
                Some([a, c, b])
            }
        })
        .collect();

    Ok(triangles)
}

/// Two-triangle cap for a rectangular outline
fn quad_cap(outline: &[[f32; 2]]) -> Vec<[[f32; 2]; 3]> {
    vec![
        [outline[0], outline[1], outline[2]],
        [outline[0], outline[2], outline[3]],
    ]
}

/// Connect two rings with quads. Outer walls face away from the ring center,
/// hole walls (`inward`) face toward it.
fn push_wall(
    triangles: &mut Vec<Triangle3D>,
    lower: &[[f32; 2]],
    z0: f32,
    upper: &[[f32; 2]],
    z1: f32,
    inward: bool,
) {
    let n = lower.len().min(upper.len());
    for i in 0..n {
        let j = (i + 1) % n;
        let (a_i, a_j) = (at(&lower[i], z0), at(&lower[j], z0));
        let (b_i, b_j) = (at(&upper[i], z1), at(&upper[j], z1));
        if inward {
            triangles.push(Triangle3D::new(a_i, b_j, a_j));
            triangles.push(Triangle3D::new(a_i, b_i, b_j));
        } else {
            triangles.push(Triangle3D::new(a_i, a_j, b_j));
            triangles.push(Triangle3D::new(a_i, b_j, b_i));
        }
    }
}
