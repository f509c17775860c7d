//! # FacePanel
//!
//! Parametric face panel generator. From the panel dimensions and up to four
//! images it produces:
//! - A printable solid (plain or chamfered slab with optional mounting holes)
//! - A face texture with the images laid out on the printable area
//! - A hole mask matching the texture
//! - An export archive with the STL, metadata and source images
//!
//! ## Architecture
//!
//! FacePanel is organized as a workspace with multiple crates:
//!
//! 1. **facepanel-core** - Error types, units, shared constants
//! 2. **facepanel-designer** - Dimensions, layout, solid, face raster, export
//! 3. **facepanel-settings** - Render/export configuration and persistence
//! 4. **facepanel** - Command-line driver that integrates all crates

pub mod project;

pub use facepanel_designer as designer;

pub use facepanel_core::{
    format_dimension, Error, ExportError, ImageError, LayoutMode, Result, StlFormat,
};

pub use facepanel_designer::{
    export_panel, generate_panel, write_archive, ExportImage, ExportOptions, GeneratedPanel,
    ImageSlot, Margins, MatchAxis, PanelDesign, PanelSpec, RasterSettings, SlotArray,
    SolidOptions,
};

pub use facepanel_settings::{Config, SettingsPersistence};

pub use project::{load_project, LoadedProject, ProjectFile, ProjectImage};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Face raster budget from the render settings
pub fn raster_settings(config: &Config) -> RasterSettings {
    RasterSettings {
        ppi: config.render.ppi,
        base_size: config.render.base_size,
        max_texture_size: config.render.max_texture_size,
    }
}

/// Solid options for previews, which follow the panel's own hole flag
pub fn preview_solid_options(config: &Config) -> SolidOptions {
    SolidOptions {
        force_screw_holes: false,
        circle_segments: config.render.circle_segments,
    }
}

/// Export options from the export and render settings
pub fn export_options(config: &Config) -> ExportOptions {
    ExportOptions {
        stl_format: config.export.stl_format,
        force_screw_holes: config.export.force_screw_holes,
        circle_segments: config.render.circle_segments,
    }
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr, leaving stdout for command output
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
