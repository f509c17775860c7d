//! Panel generation pipeline.
//!
//! Every call builds fresh artifacts from the design; nothing is cached and the
//! design is never mutated.

use crate::dimensions::PanelSpec;
use crate::face_raster::{composite_face, RasterSettings};
use crate::layout::{match_to_content, MatchAxis, Placement, RasterSize};
use crate::margin_fit::fit_margins_for_contain;
use crate::model3d::{Mesh3D, MeshBuffers};
use crate::screw_holes::ScrewHoleSet;
use crate::slots::SlotArray;
use crate::solid::{build_panel_solid, SolidOptions};
use facepanel_core::LayoutMode;
use image::{GrayImage, RgbImage};
use tracing::{debug, info};

/// Everything the user configures for one panel
#[derive(Debug, Clone, Default)]
pub struct PanelDesign {
    pub spec: PanelSpec,
    pub slots: SlotArray,
    pub layout: LayoutMode,
}

impl PanelDesign {
    pub fn new(spec: PanelSpec, slots: SlotArray, layout: LayoutMode) -> Self {
        Self {
            spec,
            slots,
            layout,
        }
    }

    /// Copy with the panel resized so the images fill the face along `axis`.
    ///
    /// Returns the design unchanged when there is nothing to match.
    pub fn matched_to_content(&self, axis: MatchAxis) -> Self {
        match match_to_content(&self.spec, self.slots.active(), self.layout, axis) {
            Some(spec) => Self {
                spec,
                ..self.clone()
            },
            None => self.clone(),
        }
    }

    /// Copy with each image's margins auto-fitted for contain
    pub fn with_fitted_margins(&self) -> Self {
        let mut design = self.clone();
        for index in 0..design.slots.active_count() {
            if let Some(slot) = design.slots.get_mut(index) {
                if let Some(margins) = fit_margins_for_contain(&self.spec, slot) {
                    slot.set_margin(margins);
                }
            }
        }
        design
    }
}

/// Artifacts produced for one design
#[derive(Debug, Clone)]
pub struct GeneratedPanel {
    pub solid: Mesh3D,
    pub holes: ScrewHoleSet,
    pub placements: Vec<Placement>,
    pub canvas: RasterSize,
    /// `None` when no active slot holds an image
    pub texture: Option<RgbImage>,
    /// `None` when the panel has no holes
    pub hole_mask: Option<GrayImage>,
}

impl GeneratedPanel {
    /// Render buffers for the solid
    pub fn mesh_buffers(&self) -> MeshBuffers {
        self.solid.to_buffers()
    }
}

/// Build the solid and face rasters for `design`.
pub fn generate_panel(
    design: &PanelDesign,
    raster: &RasterSettings,
    solid_options: &SolidOptions,
) -> GeneratedPanel {
    let spec = &design.spec;
    let printable = spec.printable_area();
    let holes = ScrewHoleSet::for_spec(spec, solid_options.force_screw_holes);

    debug!(
        "Generating panel {}x{}x{} in, {} active slots",
        spec.width(),
        spec.height(),
        spec.depth(),
        design.slots.active_count()
    );

    let solid = build_panel_solid(spec, solid_options);
    let face = composite_face(design.slots.active(), design.layout, &printable, &holes, raster);

    info!(
        "Generated panel: {} triangles, {}x{} face, {} images",
        solid.triangle_count(),
        face.size.width,
        face.size.height,
        face.placements.len()
    );

    GeneratedPanel {
        solid,
        holes,
        placements: face.placements,
        canvas: face.size,
        texture: face.texture,
        hole_mask: face.hole_mask,
    }
}
