//! Panel project files
//!
//! A project names the panel parameters, the layout and up to four images:
//!
//! ```toml
//! layout = "horizontal"
//!
//! [panel]
//! width = 10.0
//! height = 6.0
//! depth = 0.5
//! chamfer = true
//! screw_holes = false
//!
//! [[images]]
//! path = "logo.png"
//! rotation = 90
//! margin = { left = 0.25, right = 0.25, top = 0.5, bottom = 0.5 }
//! ```
//!
//! Image paths are resolved against the directory holding the project file.

use anyhow::{bail, Context, Result};
use facepanel_core::constants::MAX_IMAGE_SLOTS;
use facepanel_core::{ImageError, LayoutMode};
use facepanel_designer::{ExportImage, ImageSlot, Margins, PanelDesign, PanelSpec, SlotArray};
use facepanel_settings::PanelDefaults;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// One image entry of a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectImage {
    pub path: PathBuf,
    /// Clockwise rotation in degrees
    #[serde(default)]
    pub rotation: i32,
    #[serde(default)]
    pub margin: Margins,
}

/// Project file contents before any image is decoded
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectFile {
    /// Falls back to the configured defaults when absent
    pub panel: Option<PanelSpec>,
    pub layout: Option<LayoutMode>,
    pub images: Vec<ProjectImage>,
}

/// A project with its images decoded
#[derive(Debug, Clone)]
pub struct LoadedProject {
    pub design: PanelDesign,
    /// Source bytes for the export archive, in slot order
    pub images: Vec<ExportImage>,
}

impl ProjectFile {
    /// Parse a `.toml` or `.json` project
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read project {}", path.display()))?;

        let project = match extension(path).as_deref() {
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON project {}", path.display()))?,
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("Invalid TOML project {}", path.display()))?,
            _ => bail!(
                "Unsupported project format {} (expected .toml or .json)",
                path.display()
            ),
        };

        Ok(project)
    }

    /// Decode the images and assemble the design.
    ///
    /// Relative image paths are taken from `base_dir`.
    pub fn into_design(self, base_dir: &Path, defaults: &PanelDefaults) -> Result<LoadedProject> {
        if self.images.len() > MAX_IMAGE_SLOTS {
            bail!(
                "Project lists {} images; at most {} are supported",
                self.images.len(),
                MAX_IMAGE_SLOTS
            );
        }

        let spec = self.panel.unwrap_or_else(|| {
            PanelSpec::new(defaults.width, defaults.height, defaults.depth)
                .with_chamfer(defaults.chamfer)
                .with_screw_holes(defaults.screw_holes)
        });
        let layout = self.layout.unwrap_or(defaults.layout);

        let mut slots = Vec::with_capacity(self.images.len());
        let mut images = Vec::with_capacity(self.images.len());
        for entry in &self.images {
            let path = if entry.path.is_absolute() {
                entry.path.clone()
            } else {
                base_dir.join(&entry.path)
            };
            let (slot, export) = load_image(&path)?;
            slots.push(slot.with_rotation(entry.rotation).with_margin(entry.margin));
            images.push(export);
        }

        debug!("Loaded project with {} images, {} layout", slots.len(), layout);

        Ok(LoadedProject {
            design: PanelDesign::new(spec, SlotArray::from_slots(slots), layout),
            images,
        })
    }
}

/// Load a project file and everything it references
pub fn load_project(path: &Path, defaults: &PanelDefaults) -> Result<LoadedProject> {
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    ProjectFile::load(path)?.into_design(base_dir, defaults)
}

/// Decode one image into a slot, keeping its original bytes for export
pub fn load_image(path: &Path) -> Result<(ImageSlot, ExportImage)> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read image {}", path.display()))?;

    let decoded = image::load_from_memory(&bytes).map_err(|e| ImageError::Decode {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let rgba = decoded.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(ImageError::Empty {
            path: path.display().to_string(),
        }
        .into());
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    debug!(
        "Loaded image {} ({}x{})",
        file_name,
        rgba.width(),
        rgba.height()
    );

    let slot = ImageSlot::new(Arc::new(rgba)).with_file_name(file_name.clone());
    Ok((slot, ExportImage::new(file_name, bytes)))
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}
