//! # Panel Export
//!
//! Produces the export bundle for a design: the solid as STL, a `key=value`
//! metadata file and the source images, packaged into a zip archive.
//!
//! ## Archive layout
//! - `panel.stl`
//! - `metadata.txt`
//! - `image_<file name>` for each source image; repeated names get a
//!   `_2`, `_3`, ... suffix before the extension

use crate::pipeline::PanelDesign;
use crate::solid::{build_panel_solid, SolidOptions};
use crate::stl::write_stl;
use chrono::{DateTime, SecondsFormat, Utc};
use facepanel_core::constants::DEFAULT_CIRCLE_SEGMENTS;
use facepanel_core::{ExportError, StlFormat};
use std::collections::HashSet;
use std::io::{Cursor, Seek, Write};
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const STL_ENTRY: &str = "panel.stl";
pub const METADATA_ENTRY: &str = "metadata.txt";

/// Export behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub stl_format: StlFormat,
    /// Bake mounting holes in regardless of the panel's hole flag
    pub force_screw_holes: bool,
    pub circle_segments: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            stl_format: StlFormat::default(),
            force_screw_holes: true,
            circle_segments: DEFAULT_CIRCLE_SEGMENTS,
        }
    }
}

/// Original bytes of a source image, stored alongside the solid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportImage {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Archive entry name
    pub fn entry_name(&self) -> String {
        format!("image_{}", self.file_name)
    }
}

/// Files that make up one export
#[derive(Debug, Clone)]
pub struct ExportBundle {
    pub stl: Vec<u8>,
    pub metadata: String,
    pub images: Vec<ExportImage>,
}

/// Metadata lines for `design`, in fixed order
pub fn export_metadata(design: &PanelDesign, generated_at: DateTime<Utc>) -> String {
    let spec = &design.spec;
    let chamfer = spec.chamfer();

    let mut lines = vec![
        format!("width_in={}", spec.width()),
        format!("height_in={}", spec.height()),
        format!("depth_in={}", spec.depth()),
    ];

    for (index, slot) in design.slots.active().iter().enumerate() {
        let m = slot.margin();
        lines.push(format!(
            "slot{}_margin_in={},{},{},{}",
            index, m.left, m.right, m.top, m.bottom
        ));
    }

    let file_names = design.slots.file_names();
    lines.extend([
        format!("chamfer_enabled={}", chamfer.enabled),
        format!("chamfer_angle_deg={}", chamfer.angle_degrees),
        format!("chamfer_depth_in={}", chamfer.bevel),
        format!(
            "image_filenames={}",
            if file_names.is_empty() {
                "none".to_string()
            } else {
                file_names.join(",")
            }
        ),
        format!(
            "generated_at={}",
            generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
        ),
    ]);

    lines.join("\n")
}

/// Build the solid and metadata for export.
pub fn export_panel(
    design: &PanelDesign,
    options: &ExportOptions,
    images: Vec<ExportImage>,
    generated_at: DateTime<Utc>,
) -> Result<ExportBundle, ExportError> {
    let solid_options = SolidOptions {
        force_screw_holes: options.force_screw_holes,
        circle_segments: options.circle_segments,
    };
    let solid = build_panel_solid(&design.spec, &solid_options);
    let stl = write_stl(&solid, options.stl_format)?;
    let metadata = export_metadata(design, generated_at);

    debug!(
        "Export bundle: {} byte {} STL, {} images",
        stl.len(),
        options.stl_format,
        images.len()
    );

    Ok(ExportBundle {
        stl,
        metadata,
        images,
    })
}

fn archive_error(e: impl std::fmt::Display) -> ExportError {
    ExportError::Archive {
        reason: e.to_string(),
    }
}

/// Write `bundle` as a deflated zip archive into `writer`
pub fn write_archive<W: Write + Seek>(bundle: &ExportBundle, writer: W) -> Result<W, ExportError> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .unix_permissions(0o644);

    let mut add = |name: &str, content: &[u8]| -> Result<(), ExportError> {
        if name.contains("..") || name.starts_with('/') || name.starts_with('\\') {
            return Err(archive_error(format!("invalid entry name {}", name)));
        }
        zip.start_file(name, options).map_err(archive_error)?;
        zip.write_all(content).map_err(archive_error)?;
        Ok(())
    };

    add(STL_ENTRY, &bundle.stl)?;
    add(METADATA_ENTRY, bundle.metadata.as_bytes())?;

    let mut used: HashSet<String> = [STL_ENTRY, METADATA_ENTRY].map(String::from).into();
    for image in &bundle.images {
        let name = unique_entry_name(&image.entry_name(), &mut used);
        add(&name, &image.bytes)?;
    }

    let writer = zip.finish().map_err(archive_error)?;
    info!("Packaged export archive with {} images", bundle.images.len());
    Ok(writer)
}

/// First of `base`, `stem_2.ext`, `stem_3.ext`, ... not yet in `used`
fn unique_entry_name(base: &str, used: &mut HashSet<String>) -> String {
    let (stem, ext) = match base.rfind('.') {
        Some(dot) if dot > 0 => base.split_at(dot),
        _ => (base, ""),
    };

    let mut name = base.to_string();
    let mut suffix = 2;
    while !used.insert(name.clone()) {
        debug!("Archive entry {} already written, renaming", name);
        name = format!("{}_{}{}", stem, suffix, ext);
        suffix += 1;
    }
    name
}

/// Zip archive bytes for `bundle`
pub fn archive_bytes(bundle: &ExportBundle) -> Result<Vec<u8>, ExportError> {
    Ok(write_archive(bundle, Cursor::new(Vec::new()))?.into_inner())
}
