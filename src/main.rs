use anyhow::{Context, Result};
use clap::Parser;
use facepanel::designer::apply_mask;
use facepanel::{
    export_options, export_panel, generate_panel, init_logging, load_project,
    preview_solid_options, raster_settings, write_archive, MatchAxis, SettingsPersistence,
    BUILD_DATE, VERSION,
};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// FacePanel - parametric face panel generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Panel project (.toml or .json)
    #[arg(value_name = "PROJECT")]
    project: PathBuf,

    /// Settings file; defaults to the platform config directory
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Export archive path; defaults to the configured output location
    #[arg(short, long, value_name = "ZIP")]
    out: Option<PathBuf>,

    /// Write the face texture as PNG
    #[arg(long, value_name = "PNG")]
    texture: Option<PathBuf>,

    /// Write the screw-hole mask as PNG
    #[arg(long, value_name = "PNG")]
    mask: Option<PathBuf>,

    /// Write the face texture with the hole mask applied as alpha
    #[arg(long, value_name = "PNG")]
    masked_texture: Option<PathBuf>,

    /// Resize the panel so the images fill the face along this axis
    #[arg(long = "match", value_name = "AXIS")]
    match_axis: Option<MatchAxis>,

    /// Fit each image's margins so it fills the printable area
    #[arg(long)]
    fit_margins: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    info!("FacePanel v{} ({})", VERSION, BUILD_DATE);

    let settings = match &cli.config {
        Some(path) => SettingsPersistence::load_from_file(path)
            .with_context(|| format!("Failed to load settings {}", path.display()))?,
        None => SettingsPersistence::load_default_location(),
    };
    let config = settings.config();

    let loaded = load_project(&cli.project, &config.defaults)?;
    let mut design = loaded.design;
    if let Some(axis) = cli.match_axis {
        design = design.matched_to_content(axis);
    }
    if cli.fit_margins {
        design = design.with_fitted_margins();
    }

    let panel = generate_panel(
        &design,
        &raster_settings(config),
        &preview_solid_options(config),
    );

    println!(
        "Panel {} x {} x {}",
        facepanel::format_dimension(design.spec.width()),
        facepanel::format_dimension(design.spec.height()),
        facepanel::format_dimension(design.spec.depth())
    );
    println!(
        "Face texture {}x{} px, {} triangles",
        panel.canvas.width,
        panel.canvas.height,
        panel.solid.triangle_count()
    );

    if let Some(path) = &cli.texture {
        match &panel.texture {
            Some(texture) => save_png(texture, path)?,
            None => println!("No images placed; skipping {}", path.display()),
        }
    }
    if let Some(path) = &cli.mask {
        match &panel.hole_mask {
            Some(mask) => save_png(mask, path)?,
            None => println!("Panel has no screw holes; skipping {}", path.display()),
        }
    }
    if let Some(path) = &cli.masked_texture {
        match (&panel.texture, &panel.hole_mask) {
            (Some(texture), Some(mask)) => save_png(&apply_mask(texture, mask), path)?,
            (Some(texture), None) => save_png(texture, path)?,
            _ => println!("No images placed; skipping {}", path.display()),
        }
    }

    let bundle = export_panel(
        &design,
        &export_options(config),
        loaded.images,
        chrono::Utc::now(),
    )?;

    let archive = cli.out.unwrap_or_else(|| config.archive_path());
    if let Some(parent) = archive.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let file = File::create(&archive)
        .with_context(|| format!("Failed to create {}", archive.display()))?;
    let mut writer = write_archive(&bundle, BufWriter::new(file))?;
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", archive.display()))?;

    println!("Exported {}", archive.display());
    Ok(())
}

fn save_png<P, C>(image: &image::ImageBuffer<P, C>, path: &Path) -> Result<()>
where
    P: image::PixelWithColorType,
    [P::Subpixel]: image::EncodableLayout,
    C: std::ops::Deref<Target = [P::Subpixel]>,
{
    image
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {}", path.display());
    Ok(())
}
