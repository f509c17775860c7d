//! Configuration and settings management for FacePanel
//!
//! Provides configuration file handling, settings management, and validation.
//! Supports JSON and TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Render settings (print resolution, texture ceiling, hole tessellation)
//! - Export settings (output location, STL encoding, screw-hole policy)
//! - Panel defaults (initial dimensions and layout for new projects)

use crate::error::{ConfigError, SettingsError, SettingsResult};
use facepanel_core::constants::{
    BASE_CANVAS_SIZE, DEFAULT_CIRCLE_SEGMENTS, DEFAULT_MAX_TEXTURE_SIZE, DEFAULT_PPI,
};
pub use facepanel_core::StlFormat;
use facepanel_core::LayoutMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Face texture rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Target print resolution in pixels per inch
    pub ppi: f64,
    /// Canvas size on the short axis before print-resolution scaling
    pub base_size: u32,
    /// Hardware texture ceiling; the long canvas axis never exceeds it
    pub max_texture_size: u32,
    /// Segments used to approximate each screw hole in the solid
    pub circle_segments: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            ppi: DEFAULT_PPI,
            base_size: BASE_CANVAS_SIZE,
            max_texture_size: DEFAULT_MAX_TEXTURE_SIZE,
            circle_segments: DEFAULT_CIRCLE_SEGMENTS,
        }
    }
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Directory export archives are written to
    pub output_directory: PathBuf,
    /// File name of the export archive
    pub archive_name: String,
    /// STL encoding inside the archive
    pub stl_format: StlFormat,
    /// Bake mounting holes into exported solids even when the preview hides them
    pub force_screw_holes: bool,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_directory: PathBuf::from("."),
            archive_name: "panel_export.zip".to_string(),
            stl_format: StlFormat::default(),
            force_screw_holes: true,
        }
    }
}

/// Initial values for new panel projects
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelDefaults {
    /// Panel width in inches
    pub width: f64,
    /// Panel height in inches
    pub height: f64,
    /// Panel depth in inches
    pub depth: f64,
    /// Chamfer the front and back edges
    pub chamfer: bool,
    /// Cut mounting holes
    pub screw_holes: bool,
    /// Layout used for multiple images
    pub layout: LayoutMode,
}

impl Default for PanelDefaults {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 6.0,
            depth: 0.5,
            chamfer: false,
            screw_holes: false,
            layout: LayoutMode::default(),
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Render settings
    pub render: RenderSettings,
    /// Export settings
    pub export: ExportSettings,
    /// Panel defaults
    pub defaults: PanelDefaults,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match config_format(path)? {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match config_format(path)? {
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("{}: {}", path.display(), e))
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let render = &self.render;
        if !render.ppi.is_finite() || render.ppi <= 0.0 {
            return Err(out_of_range("render.ppi", render.ppi));
        }
        if render.base_size == 0 {
            return Err(out_of_range("render.base_size", render.base_size));
        }
        if render.max_texture_size == 0 {
            return Err(out_of_range(
                "render.max_texture_size",
                render.max_texture_size,
            ));
        }
        if render.circle_segments < 3 {
            return Err(out_of_range("render.circle_segments", render.circle_segments));
        }

        if self.export.archive_name.trim().is_empty() {
            return Err(SettingsError::InvalidSetting {
                key: "export.archive_name".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        let defaults = &self.defaults;
        for (key, value) in [
            ("defaults.width", defaults.width),
            ("defaults.height", defaults.height),
            ("defaults.depth", defaults.depth),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(out_of_range(key, value));
            }
        }

        Ok(())
    }

    /// Full path of the export archive
    pub fn archive_path(&self) -> PathBuf {
        self.export.output_directory.join(&self.export.archive_name)
    }
}

enum FileFormat {
    Json,
    Toml,
}

fn config_format(path: &Path) -> SettingsResult<FileFormat> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(FileFormat::Json),
        Some("toml") => Ok(FileFormat::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

fn out_of_range(key: &str, value: impl std::fmt::Display) -> SettingsError {
    ConfigError::ValueOutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
    .into()
}
