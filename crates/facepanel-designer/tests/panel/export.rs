use chrono::{TimeZone, Utc};
use facepanel_designer::{
    archive_bytes, export_panel, read_stl, write_archive, ExportImage, ExportOptions, ImageSlot,
    LayoutMode, PanelDesign, PanelSpec, SlotArray, StlFormat,
};
use image::RgbaImage;
use std::io::Read;
use std::sync::Arc;

fn design_with_holes(enabled: bool) -> PanelDesign {
    let slot = ImageSlot::new(Arc::new(RgbaImage::new(40, 20))).with_file_name("front.png");
    PanelDesign::new(
        PanelSpec::new(8.0, 4.0, 0.5).with_screw_holes(enabled),
        SlotArray::from_slots([slot]),
        LayoutMode::Horizontal,
    )
}

#[test]
fn test_export_archive_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("panel_export.zip");
    let generated_at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();

    let bundle = export_panel(
        &design_with_holes(false),
        &ExportOptions::default(),
        vec![ExportImage::new("front.png", b"png bytes".to_vec())],
        generated_at,
    )
    .unwrap();

    let file = std::fs::File::create(&path).unwrap();
    write_archive(&bundle, file).unwrap();

    let mut archive = zip::ZipArchive::new(std::fs::File::open(&path).unwrap()).unwrap();
    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    assert!(names.contains(&"panel.stl".to_string()));
    assert!(names.contains(&"metadata.txt".to_string()));
    assert!(names.contains(&"image_front.png".to_string()));

    let mut metadata = String::new();
    archive
        .by_name("metadata.txt")
        .unwrap()
        .read_to_string(&mut metadata)
        .unwrap();
    assert!(metadata.starts_with("width_in=8\nheight_in=4\ndepth_in=0.5\n"));
    assert!(metadata.contains("image_filenames=front.png"));
    assert!(metadata.ends_with("generated_at=2025-01-02T03:04:05.000Z"));
}

#[test]
fn test_binary_export_reads_back() {
    let options = ExportOptions {
        stl_format: StlFormat::Binary,
        circle_segments: 12,
        ..ExportOptions::default()
    };
    let bundle = export_panel(&design_with_holes(false), &options, Vec::new(), Utc::now()).unwrap();
    let mesh = read_stl(&bundle.stl).unwrap();
    let size = mesh.size();
    assert!((size.x - 8.0).abs() < 1e-4);
    assert!((size.y - 4.0).abs() < 1e-4);
    // holes are baked in even though the panel has them switched off
    assert!(mesh.triangle_count() > 12);
}

#[test]
fn test_export_can_respect_live_hole_flag() {
    let options = ExportOptions {
        stl_format: StlFormat::Binary,
        force_screw_holes: false,
        ..ExportOptions::default()
    };
    let without = export_panel(&design_with_holes(false), &options, Vec::new(), Utc::now()).unwrap();
    let with = export_panel(&design_with_holes(true), &options, Vec::new(), Utc::now()).unwrap();
    assert_eq!(read_stl(&without.stl).unwrap().triangle_count(), 12);
    assert!(read_stl(&with.stl).unwrap().triangle_count() > 12);
    assert!(archive_bytes(&with).is_ok());
}
