//! Face raster compositor
//! Renders the image layout and the screw-hole mask into fixed-resolution
//! buffers using tiny-skia.
//!
//! Features:
//! - Canvas sizing from print resolution with a texture-size ceiling
//! - Contain-fit image drawing with rotation about each placement center
//! - Hole mask with the same dimensions as the face texture

use crate::dimensions::PrintableArea;
use crate::layout::{compute_layout, Placement, RasterSize};
use crate::screw_holes::ScrewHoleSet;
use crate::slots::ImageSlot;
use facepanel_core::constants::{
    BASE_CANVAS_SIZE, DEFAULT_MAX_TEXTURE_SIZE, DEFAULT_PPI, MAX_COUNT_SCALE,
};
use facepanel_core::LayoutMode;
use image::{GrayImage, Luma, Rgb, RgbImage, RgbaImage};
use tiny_skia::{
    Color, FillRule, FilterQuality, IntSize, Paint, PathBuilder, Pixmap, PixmapPaint, Transform,
};
use tracing::{debug, warn};

/// Raster budget for the face texture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterSettings {
    /// Target print resolution
    pub ppi: f64,
    /// Minimum short-axis size before the image-count scale
    pub base_size: u32,
    /// The long axis never exceeds this
    pub max_texture_size: u32,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            ppi: DEFAULT_PPI,
            base_size: BASE_CANVAS_SIZE,
            max_texture_size: DEFAULT_MAX_TEXTURE_SIZE,
        }
    }
}

fn white() -> Color {
    Color::from_rgba8(255, 255, 255, 255)
}

fn black() -> Color {
    Color::from_rgba8(0, 0, 0, 255)
}

/// Canvas size for a face of `face_width` x `face_height` inches holding
/// `image_count` images
pub fn canvas_size(
    face_width: f64,
    face_height: f64,
    image_count: usize,
    settings: &RasterSettings,
) -> RasterSize {
    let base = settings.base_size.max(1);
    if !face_width.is_finite() || !face_height.is_finite() || face_width <= 0.0 || face_height <= 0.0
    {
        return RasterSize::new(base, base);
    }

    let max_texture = settings.max_texture_size.max(1) as f64;
    let short_in = face_width.min(face_height);
    let ratio = face_width.max(face_height) / short_in;
    let count_scale = (image_count.max(1) as f64).sqrt().min(MAX_COUNT_SCALE);

    let mut short_px = (short_in * settings.ppi).max(base as f64) * count_scale;
    if short_px * ratio > max_texture {
        short_px = max_texture / ratio;
    }
    let short_px = short_px.floor().max(1.0);
    let long_px = (short_px * ratio).round().clamp(1.0, max_texture);

    let (short, long) = (short_px as u32, long_px as u32);
    if face_width >= face_height {
        RasterSize::new(long, short)
    } else {
        RasterSize::new(short, long)
    }
}

/// Composited face texture and hole mask
#[derive(Debug, Clone)]
pub struct FaceRaster {
    pub size: RasterSize,
    pub placements: Vec<Placement>,
    /// RGB face texture; `None` when no slot holds an image
    pub texture: Option<RgbImage>,
    /// White background with black holes; `None` without holes
    pub hole_mask: Option<GrayImage>,
}

/// Lay out `slots` and render the face texture and hole mask.
pub fn composite_face(
    slots: &[ImageSlot],
    mode: LayoutMode,
    printable: &PrintableArea,
    holes: &ScrewHoleSet,
    settings: &RasterSettings,
) -> FaceRaster {
    let image_count = slots.iter().filter(|slot| slot.aspect() > 0.0).count();
    let size = canvas_size(printable.width, printable.height, image_count, settings);
    let placements = compute_layout(slots, mode, printable, size);

    let texture = if placements.is_empty() {
        None
    } else {
        render_texture(slots, &placements, size)
    };
    let hole_mask = render_hole_mask(holes, printable, size);

    debug!(
        "Composited face {}x{}: {} placements, mask {}",
        size.width,
        size.height,
        placements.len(),
        hole_mask.is_some()
    );

    FaceRaster {
        size,
        placements,
        texture,
        hole_mask,
    }
}

/// Premultiply an RGBA image into a pixmap tiny-skia can draw
fn image_to_pixmap(image: &RgbaImage) -> Option<Pixmap> {
    let (width, height) = image.dimensions();
    let size = IntSize::from_wh(width, height)?;
    let mut data = Vec::with_capacity(image.as_raw().len());
    for pixel in image.pixels() {
        let [r, g, b, a] = pixel.0;
        let premultiply = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
        data.extend_from_slice(&[premultiply(r), premultiply(g), premultiply(b), a]);
    }
    Pixmap::from_vec(data, size)
}

fn pixmap_to_rgb(pixmap: &Pixmap) -> RgbImage {
    let width = pixmap.width();
    let height = pixmap.height();
    let data = pixmap.data();
    RgbImage::from_fn(width, height, |x, y| {
        let idx = ((y * width + x) * 4) as usize;
        // Background is opaque, so premultiplied channels are final colors
        Rgb([data[idx], data[idx + 1], data[idx + 2]])
    })
}

fn render_texture(
    slots: &[ImageSlot],
    placements: &[Placement],
    size: RasterSize,
) -> Option<RgbImage> {
    let Some(mut pixmap) = Pixmap::new(size.width, size.height) else {
        warn!("Cannot allocate {}x{} face texture", size.width, size.height);
        return None;
    };
    pixmap.fill(white());

    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..PixmapPaint::default()
    };

    for placement in placements {
        let Some(slot) = slots.get(placement.slot_index) else {
            continue;
        };
        let (Some(image), Some((rotated_w, rotated_h))) = (slot.image(), slot.rotated_size())
        else {
            continue;
        };
        let Some(source) = image_to_pixmap(image) else {
            continue;
        };

        let rect = placement.rect;
        let scale = (rect.width / rotated_w as f64).min(rect.height / rotated_h as f64) as f32;
        let (cx, cy) = rect.center();
        let (iw, ih) = image.dimensions();

        let transform = Transform::from_translate(cx as f32, cy as f32)
            .pre_concat(Transform::from_rotate(slot.normalized_rotation() as f32))
            .pre_scale(scale, scale)
            .pre_translate(-(iw as f32) / 2.0, -(ih as f32) / 2.0);

        pixmap.draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);
    }

    Some(pixmap_to_rgb(&pixmap))
}

fn render_hole_mask(
    holes: &ScrewHoleSet,
    printable: &PrintableArea,
    size: RasterSize,
) -> Option<GrayImage> {
    if holes.is_empty() {
        return None;
    }
    let Some(mut pixmap) = Pixmap::new(size.width, size.height) else {
        warn!("Cannot allocate {}x{} hole mask", size.width, size.height);
        return None;
    };
    pixmap.fill(white());

    let mut paint = Paint::default();
    paint.set_color(black());
    paint.anti_alias = true;

    let scale_x = size.width as f64 / printable.width;
    let scale_y = size.height as f64 / printable.height;
    let radius_x = (holes.radius() * scale_x) as f32;
    let radius_y = (holes.radius() * scale_y) as f32;

    // tiny-skia has no ellipse primitive, so scale a unit circle
    let circle = PathBuilder::from_circle(0.0, 0.0, 1.0)?;
    for center in holes.centers() {
        // Raster y grows downward
        let px = (size.width as f64 / 2.0 + center.x * scale_x) as f32;
        let py = (size.height as f64 / 2.0 - center.y * scale_y) as f32;
        let transform = Transform::identity()
            .pre_translate(px, py)
            .pre_scale(radius_x, radius_y);
        pixmap.fill_path(&circle, &paint, FillRule::Winding, transform, None);
    }

    let width = pixmap.width();
    let data = pixmap.data();
    Some(GrayImage::from_fn(width, pixmap.height(), |x, y| {
        Luma([data[((y * width + x) * 4) as usize]])
    }))
}

/// Combine the face texture with the hole mask as alpha
pub fn apply_mask(texture: &RgbImage, mask: &GrayImage) -> RgbaImage {
    RgbaImage::from_fn(texture.width(), texture.height(), |x, y| {
        let [r, g, b] = texture.get_pixel(x, y).0;
        let alpha = mask.get_pixel_checked(x, y).map_or(255, |p| p.0[0]);
        image::Rgba([r, g, b, alpha])
    })
}
