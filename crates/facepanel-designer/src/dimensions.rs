//! # Panel Dimensions
//!
//! Holds the primary panel dimensions and derives the secondary quantities the
//! rest of the pipeline consumes: chamfer bevel, straight extrusion depth and the
//! printable face area.
//!
//! Every mutation path (construction, setters, deserialization) clamps to the
//! panel limits, so a `PanelSpec` is always valid once it exists.

use facepanel_core::constants::{
    CHAMFER_ANGLE_DEG, CHAMFER_DEPTH_RATIO, MAX_DEPTH, MAX_HEIGHT, MIN_BEVEL, MIN_DEPTH,
    MIN_HEIGHT, MIN_PRINTABLE, MIN_WIDTH,
};
use facepanel_core::format_dimension;
use serde::{Deserialize, Serialize};

fn clamp_width(value: f64) -> f64 {
    value.max(MIN_WIDTH)
}

fn clamp_height(value: f64) -> f64 {
    value.clamp(MIN_HEIGHT, MAX_HEIGHT)
}

fn clamp_depth(value: f64) -> f64 {
    value.clamp(MIN_DEPTH, MAX_DEPTH)
}

/// Apply `clamp` to finite input, otherwise keep `previous`.
fn sanitize(value: f64, previous: f64, clamp: fn(f64) -> f64) -> f64 {
    if value.is_finite() {
        clamp(value)
    } else {
        previous
    }
}

/// Primary panel parameters, in inches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPanelSpec", into = "RawPanelSpec")]
pub struct PanelSpec {
    width: f64,
    height: f64,
    depth: f64,
    chamfer_enabled: bool,
    screw_holes_enabled: bool,
}

impl PanelSpec {
    /// Create a panel, clamping each dimension into its limits.
    ///
    /// Non-finite input falls back to the dimension's minimum.
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width: sanitize(width, MIN_WIDTH, clamp_width),
            height: sanitize(height, MIN_HEIGHT, clamp_height),
            depth: sanitize(depth, MIN_DEPTH, clamp_depth),
            chamfer_enabled: false,
            screw_holes_enabled: false,
        }
    }

    pub fn with_chamfer(mut self, enabled: bool) -> Self {
        self.chamfer_enabled = enabled;
        self
    }

    pub fn with_screw_holes(mut self, enabled: bool) -> Self {
        self.screw_holes_enabled = enabled;
        self
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }

    pub fn chamfer_enabled(&self) -> bool {
        self.chamfer_enabled
    }

    pub fn screw_holes_enabled(&self) -> bool {
        self.screw_holes_enabled
    }

    /// Set the width. Non-finite input leaves the current width in place.
    pub fn set_width(&mut self, value: f64) {
        self.width = sanitize(value, self.width, clamp_width);
    }

    /// Set the height. Non-finite input leaves the current height in place.
    pub fn set_height(&mut self, value: f64) {
        self.height = sanitize(value, self.height, clamp_height);
    }

    /// Set the depth. Non-finite input leaves the current depth in place.
    pub fn set_depth(&mut self, value: f64) {
        self.depth = sanitize(value, self.depth, clamp_depth);
    }

    pub fn set_chamfer_enabled(&mut self, enabled: bool) {
        self.chamfer_enabled = enabled;
    }

    pub fn set_screw_holes_enabled(&mut self, enabled: bool) {
        self.screw_holes_enabled = enabled;
    }

    /// Chamfer size on each edge; zero when chamfering is off
    pub fn bevel(&self) -> f64 {
        if !self.chamfer_enabled {
            return 0.0;
        }
        let max_bevel = (self.width / 2.0)
            .min(self.height / 2.0)
            .min(self.depth / 2.0);
        (self.depth * CHAMFER_DEPTH_RATIO)
            .max(MIN_BEVEL)
            .clamp(0.0, max_bevel)
    }

    /// Derived chamfer parameters
    pub fn chamfer(&self) -> ChamferSpec {
        let bevel = self.bevel();
        ChamferSpec {
            enabled: self.chamfer_enabled,
            bevel,
            angle_degrees: if self.chamfer_enabled {
                CHAMFER_ANGLE_DEG
            } else {
                0.0
            },
            extrusion_depth: (self.depth - 2.0 * bevel).max(MIN_PRINTABLE),
        }
    }

    /// Face area left flat after the chamfer is cut
    pub fn printable_area(&self) -> PrintableArea {
        let bevel = self.bevel();
        PrintableArea {
            width: (self.width - 2.0 * bevel).max(MIN_PRINTABLE),
            height: (self.height - 2.0 * bevel).max(MIN_PRINTABLE),
        }
    }

    /// Normalized dimension strings for input fields (two decimals)
    pub fn display_values(&self) -> DisplayValues {
        DisplayValues {
            width: format!("{:.2}", self.width),
            height: format!("{:.2}", self.height),
            depth: format!("{:.2}", self.depth),
        }
    }

    /// Edge annotations for the preview, e.g. `"10 in"`
    pub fn dimension_labels(&self) -> DisplayValues {
        DisplayValues {
            width: format_dimension(self.width),
            height: format_dimension(self.height),
            depth: format_dimension(self.depth),
        }
    }
}

impl Default for PanelSpec {
    fn default() -> Self {
        Self::new(10.0, 6.0, 0.5)
    }
}

/// Unvalidated panel parameters as they appear in project files.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
struct RawPanelSpec {
    width: f64,
    height: f64,
    depth: f64,
    chamfer: bool,
    screw_holes: bool,
}

impl Default for RawPanelSpec {
    fn default() -> Self {
        PanelSpec::default().into()
    }
}

impl From<RawPanelSpec> for PanelSpec {
    fn from(raw: RawPanelSpec) -> Self {
        PanelSpec::new(raw.width, raw.height, raw.depth)
            .with_chamfer(raw.chamfer)
            .with_screw_holes(raw.screw_holes)
    }
}

impl From<PanelSpec> for RawPanelSpec {
    fn from(spec: PanelSpec) -> Self {
        Self {
            width: spec.width,
            height: spec.height,
            depth: spec.depth,
            chamfer: spec.chamfer_enabled,
            screw_holes: spec.screw_holes_enabled,
        }
    }
}

/// Derived chamfer parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChamferSpec {
    pub enabled: bool,
    /// Bevel size on front and back edges
    pub bevel: f64,
    /// 45 when enabled, 0 otherwise
    pub angle_degrees: f64,
    /// Straight section between the two bevels
    pub extrusion_depth: f64,
}

/// Flat face area available for the texture and the screw holes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrintableArea {
    pub width: f64,
    pub height: f64,
}

impl PrintableArea {
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }
}

/// Per-dimension display strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayValues {
    pub width: String,
    pub height: String,
    pub depth: String,
}
