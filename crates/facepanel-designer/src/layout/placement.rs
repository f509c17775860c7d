use super::{image_aspect, margins_px, MarginsPx, Placement, RasterSize, Rect};
use crate::dimensions::PrintableArea;
use crate::slots::ImageSlot;
use facepanel_core::constants::{GRID_COLUMNS, GRID_ROWS, MIN_CONTENT_PX};
use facepanel_core::LayoutMode;
use tracing::debug;

struct LayoutItem {
    index: usize,
    aspect: f64,
    margins: MarginsPx,
}

/// Compute the placement of every active slot that holds an image.
///
/// Placements come back in slot order. An empty result means nothing to draw.
pub fn compute_layout(
    slots: &[ImageSlot],
    mode: LayoutMode,
    printable: &PrintableArea,
    raster: RasterSize,
) -> Vec<Placement> {
    let items: Vec<LayoutItem> = slots
        .iter()
        .enumerate()
        .filter_map(|(index, slot)| {
            let aspect = image_aspect(slot);
            (aspect > 0.0).then(|| LayoutItem {
                index,
                aspect,
                margins: margins_px(slot, printable, raster),
            })
        })
        .collect();

    if items.is_empty() {
        return Vec::new();
    }

    let placements = match mode {
        LayoutMode::Horizontal => layout_horizontal(&items, raster),
        LayoutMode::Vertical => layout_vertical(&items, raster),
        LayoutMode::Grid => layout_grid(&items, raster),
    };

    debug!(
        "Laid out {} slots ({}) on {}x{} raster",
        placements.len(),
        mode,
        raster.width,
        raster.height
    );
    placements
}

fn layout_horizontal(items: &[LayoutItem], raster: RasterSize) -> Vec<Placement> {
    let raster_w = raster.width as f64;
    let raster_h = raster.height as f64;

    let sum_aspect: f64 = items.iter().map(|item| item.aspect).sum();
    let sum_margin_x: f64 = items.iter().map(|item| item.margins.horizontal()).sum();
    let min_avail_h = items
        .iter()
        .map(|item| raster_h - item.margins.vertical())
        .fold(f64::INFINITY, f64::min);

    let target_h = min_avail_h
        .min((raster_w - sum_margin_x) / sum_aspect)
        .max(MIN_CONTENT_PX);

    let widths: Vec<f64> = items
        .iter()
        .map(|item| (item.aspect * target_h).max(MIN_CONTENT_PX))
        .collect();
    let used: f64 = sum_margin_x + widths.iter().sum::<f64>();

    // Leftover width splits evenly on both ends of the row
    let mut cursor = ((raster_w - used) / 2.0).max(0.0);

    items
        .iter()
        .zip(widths)
        .map(|(item, width)| {
            let avail_h = raster_h - item.margins.vertical();
            let x = cursor + item.margins.left;
            let y = item.margins.top + (avail_h - target_h) / 2.0;
            cursor = x + width + item.margins.right;
            Placement {
                slot_index: item.index,
                rect: Rect::new(x, y, width, target_h),
            }
        })
        .collect()
}

fn layout_vertical(items: &[LayoutItem], raster: RasterSize) -> Vec<Placement> {
    let raster_w = raster.width as f64;
    let raster_h = raster.height as f64;

    let sum_inv_aspect: f64 = items.iter().map(|item| 1.0 / item.aspect).sum();
    let sum_margin_y: f64 = items.iter().map(|item| item.margins.vertical()).sum();
    let min_avail_w = items
        .iter()
        .map(|item| raster_w - item.margins.horizontal())
        .fold(f64::INFINITY, f64::min);

    let target_w = min_avail_w
        .min((raster_h - sum_margin_y) / sum_inv_aspect)
        .max(MIN_CONTENT_PX);

    let heights: Vec<f64> = items
        .iter()
        .map(|item| (target_w / item.aspect).max(MIN_CONTENT_PX))
        .collect();
    let used: f64 = sum_margin_y + heights.iter().sum::<f64>();

    let mut cursor = ((raster_h - used) / 2.0).max(0.0);

    items
        .iter()
        .zip(heights)
        .map(|(item, height)| {
            let avail_w = raster_w - item.margins.horizontal();
            let x = item.margins.left + (avail_w - target_w) / 2.0;
            let y = cursor + item.margins.top;
            cursor = y + height + item.margins.bottom;
            Placement {
                slot_index: item.index,
                rect: Rect::new(x, y, target_w, height),
            }
        })
        .collect()
}

fn layout_grid(items: &[LayoutItem], raster: RasterSize) -> Vec<Placement> {
    let cell_w = raster.width as f64 / GRID_COLUMNS as f64;
    let cell_h = raster.height as f64 / GRID_ROWS as f64;

    items
        .iter()
        .map(|item| {
            let column = item.index % GRID_COLUMNS;
            let row = item.index / GRID_COLUMNS;
            let margins = &item.margins;
            Placement {
                slot_index: item.index,
                rect: Rect::new(
                    column as f64 * cell_w + margins.left,
                    row as f64 * cell_h + margins.top,
                    (cell_w - margins.horizontal()).max(MIN_CONTENT_PX),
                    (cell_h - margins.vertical()).max(MIN_CONTENT_PX),
                ),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::Margins;
    use image::RgbaImage;
    use std::sync::Arc;

    fn slot(w: u32, h: u32) -> ImageSlot {
        ImageSlot::new(Arc::new(RgbaImage::new(w, h)))
    }

    fn printable(w: f64, h: f64) -> PrintableArea {
        PrintableArea {
            width: w,
            height: h,
        }
    }

    #[test]
    fn test_horizontal_shares_height() {
        let slots = [slot(100, 100), slot(200, 100)];
        let placements = compute_layout(
            &slots,
            LayoutMode::Horizontal,
            &printable(9.0, 6.0),
            RasterSize::new(900, 600),
        );
        assert_eq!(placements.len(), 2);
        let target = 900.0 / 3.0;
        for p in &placements {
            assert!((p.rect.height - target).abs() < 1e-9);
        }
        assert!((placements[0].rect.width - 300.0).abs() < 1e-9);
        assert!((placements[1].rect.width - 600.0).abs() < 1e-9);
        assert!((placements[1].rect.x - 300.0).abs() < 1e-9);
        assert!((placements[0].rect.y - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_horizontal_height_limited_row_is_centered() {
        let slots = [slot(100, 100)];
        let placements = compute_layout(
            &slots,
            LayoutMode::Horizontal,
            &printable(10.0, 5.0),
            RasterSize::new(1000, 500),
        );
        let rect = placements[0].rect;
        assert!((rect.height - 500.0).abs() < 1e-9);
        assert!((rect.x - 250.0).abs() < 1e-9);
    }

    #[test]
    fn test_margins_inset_content() {
        let slots = [slot(100, 100).with_margin(Margins::uniform(1.0))];
        let placements = compute_layout(
            &slots,
            LayoutMode::Horizontal,
            &printable(10.0, 10.0),
            RasterSize::new(1000, 1000),
        );
        let rect = placements[0].rect;
        assert!((rect.width - 800.0).abs() < 1e-9);
        assert!((rect.x - 100.0).abs() < 1e-9);
        assert!((rect.y - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_vertical_shares_width() {
        let slots = [slot(100, 100), slot(100, 200)];
        let placements = compute_layout(
            &slots,
            LayoutMode::Vertical,
            &printable(4.0, 9.0),
            RasterSize::new(400, 900),
        );
        assert_eq!(placements.len(), 2);
        for p in &placements {
            assert!((p.rect.width - 300.0).abs() < 1e-9);
        }
        assert!((placements[1].rect.height - 600.0).abs() < 1e-9);
        assert!((placements[1].rect.y - 300.0).abs() < 1e-9);
        assert!((placements[0].rect.x - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_grid_keeps_cells_for_empty_slots() {
        let slots = [slot(10, 10), ImageSlot::empty(), ImageSlot::empty(), slot(10, 10)];
        let placements = compute_layout(
            &slots,
            LayoutMode::Grid,
            &printable(8.0, 8.0),
            RasterSize::new(800, 800),
        );
        assert_eq!(placements.len(), 2);
        assert_eq!(placements[1].slot_index, 3);
        assert_eq!(placements[1].rect, Rect::new(400.0, 400.0, 400.0, 400.0));
    }

    #[test]
    fn test_rotation_changes_aspect() {
        let slots = [slot(200, 100).with_rotation(90)];
        let placements = compute_layout(
            &slots,
            LayoutMode::Horizontal,
            &printable(10.0, 10.0),
            RasterSize::new(1000, 1000),
        );
        let rect = placements[0].rect;
        assert!((rect.width / rect.height - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_no_images_no_placements() {
        let slots = [ImageSlot::empty()];
        let placements = compute_layout(
            &slots,
            LayoutMode::Grid,
            &printable(8.0, 8.0),
            RasterSize::new(800, 800),
        );
        assert!(placements.is_empty());
    }
}
