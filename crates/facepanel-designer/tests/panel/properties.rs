use facepanel_core::constants::{SCREW_HOLE_RADIUS, SCREW_KEEPOUT};
use facepanel_designer::{
    build_panel_solid, canvas_size, compute_layout, match_to_content, ImageSlot, LayoutMode,
    Margins, MatchAxis, PanelSpec, RasterSettings, ScrewHoleSet, SolidOptions,
};
use image::RgbaImage;
use proptest::prelude::*;
use std::sync::Arc;

fn arb_spec() -> impl Strategy<Value = PanelSpec> {
    arb_spec_from(1.0)
}

fn arb_spec_from(min_size: f64) -> impl Strategy<Value = PanelSpec> {
    (min_size..40.0f64, min_size..35.0f64, 0.1..1.0f64, any::<bool>(), any::<bool>()).prop_map(
        |(w, h, d, chamfer, holes)| {
            PanelSpec::new(w, h, d)
                .with_chamfer(chamfer)
                .with_screw_holes(holes)
        },
    )
}

fn image_slot(w: u32, h: u32) -> ImageSlot {
    ImageSlot::new(Arc::new(RgbaImage::new(w, h)))
}

proptest! {
    #[test]
    fn printable_area_never_exceeds_panel(spec in arb_spec()) {
        let printable = spec.printable_area();
        prop_assert!(printable.width <= spec.width());
        prop_assert!(printable.height <= spec.height());
        if spec.chamfer_enabled() {
            prop_assert!(printable.width < spec.width());
            prop_assert!(printable.height < spec.height());
        } else {
            prop_assert_eq!(printable.width, spec.width());
            prop_assert_eq!(printable.height, spec.height());
        }
    }

    #[test]
    fn spec_stays_within_limits(w in -100.0..100.0f64, h in -100.0..100.0f64, d in -5.0..5.0f64) {
        let spec = PanelSpec::new(w, h, d);
        prop_assert!(spec.width() >= 1.0);
        prop_assert!((1.0..=35.0).contains(&spec.height()));
        prop_assert!((0.1..=1.0).contains(&spec.depth()));
    }

    #[test]
    fn hole_centers_stay_inside_printable_area(spec in arb_spec()) {
        let holes = ScrewHoleSet::compute(&spec);
        prop_assert!(holes.is_empty() || holes.len() == 4);
        let printable = spec.printable_area();
        let limit_x = printable.width / 2.0 - SCREW_HOLE_RADIUS - SCREW_KEEPOUT;
        let limit_y = printable.height / 2.0 - SCREW_HOLE_RADIUS - SCREW_KEEPOUT;
        for center in holes.centers() {
            prop_assert!(center.x.abs() <= limit_x + 1e-12);
            prop_assert!(center.y.abs() <= limit_y + 1e-12);
        }
    }

    #[test]
    fn horizontal_match_round_trips(
        width in 6.0..20.0f64,
        depth in 0.1..1.0f64,
        chamfer in any::<bool>(),
        margin_x in 0.0..0.2f64,
        margin_y in 0.0..0.2f64,
        images in prop::collection::vec((50u32..100, 50u32..100), 1..=2),
    ) {
        let spec = PanelSpec::new(width, 10.0, depth).with_chamfer(chamfer);
        let slots: Vec<ImageSlot> = images
            .iter()
            .map(|&(w, h)| image_slot(w, h).with_margin(Margins::symmetric(margin_x, margin_y)))
            .collect();

        let by_height = match_to_content(&spec, &slots, LayoutMode::Horizontal, MatchAxis::Height)
            .unwrap();
        prop_assume!(by_height.height() > 1.0 && by_height.height() < 35.0);
        let by_width = match_to_content(&by_height, &slots, LayoutMode::Horizontal, MatchAxis::Width)
            .unwrap();
        prop_assert!(
            (by_width.width() - width).abs() < 1e-6,
            "width {} came back as {}",
            width,
            by_width.width()
        );
    }

    #[test]
    fn vertical_match_round_trips(
        height in 6.0..20.0f64,
        depth in 0.1..1.0f64,
        chamfer in any::<bool>(),
        margin_x in 0.0..0.2f64,
        margin_y in 0.0..0.2f64,
        images in prop::collection::vec((50u32..100, 50u32..100), 1..=2),
    ) {
        let spec = PanelSpec::new(10.0, height, depth).with_chamfer(chamfer);
        let slots: Vec<ImageSlot> = images
            .iter()
            .map(|&(w, h)| image_slot(w, h).with_margin(Margins::symmetric(margin_x, margin_y)))
            .collect();

        let by_width = match_to_content(&spec, &slots, LayoutMode::Vertical, MatchAxis::Width)
            .unwrap();
        prop_assume!(by_width.width() > 1.0);
        let by_height = match_to_content(&by_width, &slots, LayoutMode::Vertical, MatchAxis::Height)
            .unwrap();
        prop_assert!(
            (by_height.height() - height).abs() < 1e-6,
            "height {} came back as {}",
            height,
            by_height.height()
        );
    }

    #[test]
    fn raster_aspect_matches_printable_aspect(spec in arb_spec(), count in 0usize..=4) {
        let printable = spec.printable_area();
        let size = canvas_size(printable.width, printable.height, count, &RasterSettings::default());
        prop_assert!(size.width <= 4096 && size.height <= 4096);
        let (long, short) = if printable.width >= printable.height {
            (size.width as f64, size.height as f64)
        } else {
            (size.height as f64, size.width as f64)
        };
        let ratio = printable.width.max(printable.height) / printable.width.min(printable.height);
        prop_assert!((long - short * ratio).abs() <= 0.5 + 1e-6);
    }

    #[test]
    fn horizontal_placements_stay_on_raster(
        width in 2.0..20.0f64,
        height in 2.0..20.0f64,
        images in prop::collection::vec((50u32..200, 50u32..200, 0i32..4), 1..=4),
    ) {
        let spec = PanelSpec::new(width, height, 0.5);
        let slots: Vec<ImageSlot> = images
            .iter()
            .map(|&(w, h, quarter)| image_slot(w, h).with_rotation(quarter * 90))
            .collect();
        let printable = spec.printable_area();
        let raster = canvas_size(printable.width, printable.height, slots.len(), &RasterSettings::default());
        let placements = compute_layout(&slots, LayoutMode::Horizontal, &printable, raster);
        prop_assert_eq!(placements.len(), slots.len());

        let target = placements[0].rect.height;
        for placement in &placements {
            let rect = placement.rect;
            prop_assert!((rect.height - target).abs() < 1e-6);
            prop_assert!(rect.x >= -1e-6 && rect.y >= -1e-6);
            prop_assert!(rect.right() <= raster.width as f64 + 1e-6);
            prop_assert!(rect.bottom() <= raster.height as f64 + 1e-6);
            let aspect = slots[placement.slot_index].aspect();
            prop_assert!((rect.width / rect.height - aspect).abs() < 1e-6 * aspect.max(1.0));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn solid_builder_is_idempotent(spec in arb_spec_from(2.0), force in any::<bool>()) {
        let options = SolidOptions { force_screw_holes: force, circle_segments: 12 };
        let first = build_panel_solid(&spec, &options);
        let second = build_panel_solid(&spec, &options);
        prop_assert_eq!(first.triangle_count(), second.triangle_count());
        prop_assert_eq!(first.bounds_min, second.bounds_min);
        prop_assert_eq!(first.bounds_max, second.bounds_max);
        prop_assert_eq!(first.to_buffers().vertex_count(), second.to_buffers().vertex_count());
    }

    #[test]
    fn solid_matches_panel_extent(spec in arb_spec_from(2.0)) {
        let mesh = build_panel_solid(&spec, &SolidOptions::default());
        let size = mesh.size();
        prop_assert!((size.x as f64 - spec.width()).abs() < 1e-3);
        prop_assert!((size.y as f64 - spec.height()).abs() < 1e-3);
        prop_assert!((size.z as f64 - spec.depth()).abs() < 1e-3);
    }
}
