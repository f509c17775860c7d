use facepanel_designer::{
    build_panel_solid, compute_layout, generate_panel, ImageSlot, LayoutMode, PanelDesign,
    PanelSpec, RasterSettings, RasterSize, ScrewHoleSet, SlotArray, SolidOptions,
};
use image::RgbaImage;
use std::sync::Arc;

fn image_slot(w: u32, h: u32) -> ImageSlot {
    ImageSlot::new(Arc::new(RgbaImage::new(w, h)))
}

#[test]
fn test_plain_panel_is_a_box() {
    let spec = PanelSpec::new(10.0, 6.0, 0.5);
    let mesh = build_panel_solid(&spec, &SolidOptions::default());
    let size = mesh.size();
    assert!((size.x - 10.0).abs() < 1e-4, "width was {}", size.x);
    assert!((size.y - 6.0).abs() < 1e-4, "height was {}", size.y);
    assert!((size.z - 0.5).abs() < 1e-4, "depth was {}", size.z);
    assert!((mesh.bounds_min.x + 5.0).abs() < 1e-4);
}

#[test]
fn test_chamfered_panel_dimensions() {
    let spec = PanelSpec::new(10.0, 6.0, 0.5).with_chamfer(true);
    let chamfer = spec.chamfer();
    let printable = spec.printable_area();
    assert!((chamfer.bevel - 0.15).abs() < 1e-9);
    assert!((printable.width - 9.7).abs() < 1e-9);
    assert!((printable.height - 5.7).abs() < 1e-9);
    assert!((chamfer.extrusion_depth - 0.2).abs() < 1e-9);
}

#[test]
fn test_two_images_share_height() {
    let spec = PanelSpec::new(9.0, 6.0, 0.5);
    let slots = [image_slot(50, 50), image_slot(100, 50)];
    let raster = RasterSize::new(900, 600);
    let placements = compute_layout(
        &slots,
        LayoutMode::Horizontal,
        &spec.printable_area(),
        raster,
    );
    assert_eq!(placements.len(), 2);
    let shared = raster.width as f64 / 3.0;
    for placement in &placements {
        assert!((placement.rect.height - shared).abs() < 1e-9);
    }
    assert!(placements[0].rect.right() <= placements[1].rect.x + 1e-9);
}

#[test]
fn test_square_panel_hole_centers() {
    let spec = PanelSpec::new(4.0, 4.0, 0.5).with_screw_holes(true);
    let holes = ScrewHoleSet::compute(&spec);
    assert_eq!(holes.len(), 4);
    for center in holes.centers() {
        assert!((center.x.abs() - 1.5).abs() < 1e-9);
        assert!((center.y.abs() - 1.5).abs() < 1e-9);
    }
}

#[test]
fn test_narrow_width_clamps() {
    let mut spec = PanelSpec::default();
    spec.set_width(0.5);
    assert_eq!(spec.width(), 1.0);
}

#[test]
fn test_grid_of_four() {
    let slots = SlotArray::from_slots([
        image_slot(10, 10),
        image_slot(20, 10),
        image_slot(10, 20),
        image_slot(10, 10),
    ]);
    let design = PanelDesign::new(PanelSpec::new(4.0, 4.0, 0.5), slots, LayoutMode::Grid);
    let panel = generate_panel(&design, &RasterSettings::default(), &SolidOptions::default());

    // four images double the short axis
    assert_eq!(panel.canvas, RasterSize::new(2048, 2048));
    assert_eq!(panel.placements.len(), 4);
    let cell = 1024.0;
    for placement in &panel.placements {
        let column = (placement.slot_index % 2) as f64;
        let row = (placement.slot_index / 2) as f64;
        assert_eq!(placement.rect.x, column * cell);
        assert_eq!(placement.rect.y, row * cell);
    }
    assert!(panel.texture.is_some());
}
