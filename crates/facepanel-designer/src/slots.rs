//! Image slots placed on the panel face.

use facepanel_core::constants::MAX_IMAGE_SLOTS;
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

/// Per-side margin around an image, in inches
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Margins {
    /// Create margins; negative or non-finite sides become zero
    pub fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left: non_negative(left),
            right: non_negative(right),
            top: non_negative(top),
            bottom: non_negative(bottom),
        }
    }

    /// Same margin on left/right and on top/bottom
    pub fn symmetric(x: f64, y: f64) -> Self {
        Self::new(x, x, y, y)
    }

    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Copy with every side clamped to be non-negative
    pub fn normalized(&self) -> Self {
        Self::new(self.left, self.right, self.top, self.bottom)
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// One image position on the face
#[derive(Debug, Clone, Default)]
pub struct ImageSlot {
    image: Option<Arc<RgbaImage>>,
    rotation_degrees: i32,
    margin: Margins,
    file_name: Option<String>,
}

impl ImageSlot {
    pub fn new(image: Arc<RgbaImage>) -> Self {
        Self {
            image: Some(image),
            ..Self::default()
        }
    }

    /// Slot without an image
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_rotation(mut self, degrees: i32) -> Self {
        self.rotation_degrees = degrees;
        self
    }

    pub fn with_margin(mut self, margin: Margins) -> Self {
        self.margin = margin.normalized();
        self
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    pub fn image(&self) -> Option<&Arc<RgbaImage>> {
        self.image.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    pub fn set_image(&mut self, image: Option<Arc<RgbaImage>>) {
        self.image = image;
    }

    pub fn rotation_degrees(&self) -> i32 {
        self.rotation_degrees
    }

    pub fn set_rotation(&mut self, degrees: i32) {
        self.rotation_degrees = degrees;
    }

    /// Rotation in `0..360`
    pub fn normalized_rotation(&self) -> i32 {
        self.rotation_degrees.rem_euclid(360)
    }

    /// True when the rotation swaps the bounding box axes
    pub fn is_sideways(&self) -> bool {
        self.normalized_rotation() % 180 != 0
    }

    pub fn margin(&self) -> Margins {
        self.margin
    }

    pub fn set_margin(&mut self, margin: Margins) {
        self.margin = margin.normalized();
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn set_file_name(&mut self, name: Option<String>) {
        self.file_name = name;
    }

    /// Bounding box of the image after rotation, in pixels
    pub fn rotated_size(&self) -> Option<(u32, u32)> {
        let image = self.image.as_ref()?;
        let (w, h) = image.dimensions();
        if w == 0 || h == 0 {
            return None;
        }
        if self.is_sideways() {
            Some((h, w))
        } else {
            Some((w, h))
        }
    }

    /// Width over height of the rotated image; zero when the slot has no image
    pub fn aspect(&self) -> f64 {
        match self.rotated_size() {
            Some((w, h)) => w as f64 / h as f64,
            None => 0.0,
        }
    }
}

/// Fixed bank of image slots with an active count.
///
/// Slots at or beyond the active count keep their contents but are ignored.
#[derive(Debug, Clone, Default)]
pub struct SlotArray {
    slots: [ImageSlot; MAX_IMAGE_SLOTS],
    active: usize,
}

impl SlotArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill slots in order; anything past the fourth is dropped
    pub fn from_slots(slots: impl IntoIterator<Item = ImageSlot>) -> Self {
        let mut array = Self::new();
        for (index, slot) in slots.into_iter().take(MAX_IMAGE_SLOTS).enumerate() {
            array.slots[index] = slot;
            array.active = index + 1;
        }
        array
    }

    pub fn active_count(&self) -> usize {
        self.active
    }

    pub fn set_active_count(&mut self, count: usize) {
        self.active = count.min(MAX_IMAGE_SLOTS);
    }

    /// Active slots in ordinal order
    pub fn active(&self) -> &[ImageSlot] {
        &self.slots[..self.active]
    }

    /// Number of active slots holding an image
    pub fn image_count(&self) -> usize {
        self.active().iter().filter(|slot| slot.has_image()).count()
    }

    pub fn get(&self, index: usize) -> Option<&ImageSlot> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ImageSlot> {
        self.slots.get_mut(index)
    }

    /// Replace a slot; out-of-range indices are ignored
    pub fn set(&mut self, index: usize, slot: ImageSlot) {
        if let Some(existing) = self.slots.get_mut(index) {
            *existing = slot;
        }
    }

    /// File names of active slots that carry one, in slot order
    pub fn file_names(&self) -> Vec<&str> {
        self.active()
            .iter()
            .filter(|slot| slot.has_image())
            .filter_map(|slot| slot.file_name())
            .collect()
    }
}
