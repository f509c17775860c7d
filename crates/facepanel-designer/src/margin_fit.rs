//! Margin helpers for single-image panels.
//!
//! `fit_margins_for_contain` picks symmetric margins so a contain-fit image
//! fills the printable face exactly. `sync_margins` keeps the image aspect when
//! the user edits one axis of padding.

use crate::dimensions::PanelSpec;
use crate::slots::{ImageSlot, Margins};
use facepanel_core::constants::{MARGIN_SNAP, MIN_VISIBLE_CONTENT};

/// Which padding the user just edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingSource {
    /// Left/right padding changed
    Horizontal,
    /// Top/bottom padding changed
    Vertical,
    /// Neither; derive both from the image aspect
    Aspect,
}

fn snap(value: f64) -> f64 {
    if value < MARGIN_SNAP {
        0.0
    } else {
        value
    }
}

/// Symmetric margins that make `slot`'s image exactly fill the printable face.
///
/// Returns `None` when the slot has no image.
pub fn fit_margins_for_contain(spec: &PanelSpec, slot: &ImageSlot) -> Option<Margins> {
    let aspect = slot.aspect();
    if aspect <= 0.0 {
        return None;
    }

    let printable = spec.printable_area();
    let (pad_x, pad_y) = if aspect >= printable.aspect() {
        (0.0, ((printable.height - printable.width / aspect) / 2.0).max(0.0))
    } else {
        (((printable.width - printable.height * aspect) / 2.0).max(0.0), 0.0)
    };

    Some(Margins::symmetric(snap(pad_x), snap(pad_y)))
}

/// Recompute symmetric margins after an edit to one padding axis.
///
/// The edited axis is clamped so the image stays inside the other axis and at
/// least `MIN_VISIBLE_CONTENT` of the face remains; the other axis follows from
/// the image aspect. Slots without an image keep their margins.
pub fn sync_margins(spec: &PanelSpec, slot: &ImageSlot, source: PaddingSource) -> Margins {
    let current = slot.margin();
    let aspect = slot.aspect();
    if aspect <= 0.0 {
        return current;
    }

    let width = spec.width();
    let height = spec.height();
    let max_pad_x = ((width - MIN_VISIBLE_CONTENT) / 2.0).max(0.0);
    let max_pad_y = ((height - MIN_VISIBLE_CONTENT) / 2.0).max(0.0);

    let (pad_x, pad_y) = match source {
        PaddingSource::Vertical => {
            let min_pad_y = ((height - width / aspect) / 2.0).max(0.0);
            let pad_y = current.top.max(min_pad_y).min(max_pad_y);
            let content_w = (height - pad_y * 2.0) * aspect;
            let pad_x = ((width - content_w) / 2.0).min(max_pad_x).max(0.0);
            (pad_x, pad_y)
        }
        PaddingSource::Horizontal => {
            let min_pad_x = ((width - height * aspect) / 2.0).max(0.0);
            let pad_x = current.left.max(min_pad_x).min(max_pad_x);
            let content_h = (width - pad_x * 2.0) / aspect;
            let pad_y = ((height - content_h) / 2.0).min(max_pad_y).max(0.0);
            (pad_x, pad_y)
        }
        PaddingSource::Aspect => {
            if aspect >= width / height {
                let content_h = width / aspect;
                (0.0, ((height - content_h) / 2.0).min(max_pad_y).max(0.0))
            } else {
                let content_w = height * aspect;
                (((width - content_w) / 2.0).min(max_pad_x).max(0.0), 0.0)
            }
        }
    };

    Margins::symmetric(pad_x, pad_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;
    use std::sync::Arc;

    fn slot(w: u32, h: u32) -> ImageSlot {
        ImageSlot::new(Arc::new(RgbaImage::new(w, h)))
    }

    #[test]
    fn test_fit_wide_image() {
        let spec = PanelSpec::new(10.0, 6.0, 0.5);
        let margins = fit_margins_for_contain(&spec, &slot(200, 100)).unwrap();
        assert_eq!(margins.left, 0.0);
        assert!((margins.top - 0.5).abs() < 1e-9);
        assert_eq!(margins.top, margins.bottom);
    }

    #[test]
    fn test_fit_tall_image() {
        let spec = PanelSpec::new(10.0, 6.0, 0.5);
        let margins = fit_margins_for_contain(&spec, &slot(100, 100)).unwrap();
        assert!((margins.left - 2.0).abs() < 1e-9);
        assert_eq!(margins.top, 0.0);
    }

    #[test]
    fn test_fit_snaps_tiny_margins() {
        let spec = PanelSpec::new(10.0, 5.01, 0.5);
        let margins = fit_margins_for_contain(&spec, &slot(200, 100)).unwrap();
        assert_eq!(margins.top, 0.0);
    }

    #[test]
    fn test_fit_without_image() {
        let spec = PanelSpec::default();
        assert!(fit_margins_for_contain(&spec, &ImageSlot::empty()).is_none());
    }

    #[test]
    fn test_sync_from_horizontal_edit() {
        let spec = PanelSpec::new(10.0, 6.0, 0.5);
        let s = slot(100, 100).with_margin(Margins::symmetric(3.0, 0.0));
        let margins = sync_margins(&spec, &s, PaddingSource::Horizontal);
        assert!((margins.left - 3.0).abs() < 1e-9);
        // content is 4 x 4, leaving 1 above and below
        assert!((margins.top - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_sync_clamps_edited_axis() {
        let spec = PanelSpec::new(10.0, 6.0, 0.5);
        let s = slot(100, 100).with_margin(Margins::symmetric(0.0, 0.0));
        let margins = sync_margins(&spec, &s, PaddingSource::Horizontal);
        // a square image cannot be wider than the 6 in height allows
        assert!((margins.left - 2.0).abs() < 1e-9);
        assert_eq!(margins.top, 0.0);
    }

    #[test]
    fn test_sync_from_aspect_matches_fit() {
        let spec = PanelSpec::new(10.0, 6.0, 0.5);
        let s = slot(300, 100);
        let synced = sync_margins(&spec, &s, PaddingSource::Aspect);
        let fitted = fit_margins_for_contain(&spec, &s).unwrap();
        assert!((synced.top - fitted.top).abs() < 1e-9);
        assert_eq!(synced.left, 0.0);
    }
}
