//! # Layout Engine
//!
//! Packs the active image slots onto the face raster and solves the inverse
//! "match to content" sizing problem.
//!
//! ## Modes
//! - Horizontal: one row sharing a common content height
//! - Vertical: one column sharing a common content width
//! - Grid: fixed 2x2 cells, slot `i` at column `i % 2`, row `i / 2`
//!
//! Slots without an image have zero aspect and are skipped; in grid mode the
//! remaining slots keep their cell.

mod inverse;
mod placement;

pub use inverse::{match_to_content, MatchAxis};
pub use placement::compute_layout;

use crate::dimensions::PrintableArea;
use crate::slots::ImageSlot;

/// Pixel-space rectangle with a top-left origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Where one slot's content lands on the raster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Ordinal of the owning slot
    pub slot_index: usize,
    pub rect: Rect,
}

/// Slot margins converted to raster pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MarginsPx {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl MarginsPx {
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Raster size the layout targets, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterSize {
    pub width: u32,
    pub height: u32,
}

impl RasterSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Convert a slot's inch margins to pixels using the raster/printable scale per axis
pub fn margins_px(slot: &ImageSlot, printable: &PrintableArea, raster: RasterSize) -> MarginsPx {
    let scale_x = raster.width as f64 / printable.width;
    let scale_y = raster.height as f64 / printable.height;
    let margin = slot.margin();
    MarginsPx {
        left: margin.left * scale_x,
        right: margin.right * scale_x,
        top: margin.top * scale_y,
        bottom: margin.bottom * scale_y,
    }
}

/// Width over height of the slot's rotated image, or zero without an image
pub fn image_aspect(slot: &ImageSlot) -> f64 {
    slot.aspect()
}
