//! Mounting hole placement.
//!
//! One function places the holes for both the solid and the face mask so the
//! two always agree.

use crate::dimensions::PanelSpec;
use facepanel_core::constants::{SCREW_EDGE_OFFSET, SCREW_HOLE_RADIUS, SCREW_KEEPOUT};
use nalgebra::Point2;

/// Mounting holes, centered on the panel origin
#[derive(Debug, Clone, PartialEq)]
pub struct ScrewHoleSet {
    centers: Vec<Point2<f64>>,
    radius: f64,
}

impl ScrewHoleSet {
    /// No holes
    pub fn empty() -> Self {
        Self {
            centers: Vec::new(),
            radius: SCREW_HOLE_RADIUS,
        }
    }

    /// Hole positions for `spec`, ignoring whether holes are switched on.
    ///
    /// Each center sits `SCREW_EDGE_OFFSET` in from the edge, never closer to
    /// the printable edge than the hole radius plus keep-out. Panels too small
    /// to fit a hole get none.
    pub fn compute(spec: &PanelSpec) -> Self {
        let printable = spec.printable_area();
        let radius = SCREW_HOLE_RADIUS;

        let center_x = axis_center(spec.width(), printable.width, radius);
        let center_y = axis_center(spec.height(), printable.height, radius);

        if center_x <= 0.0 || center_y <= 0.0 {
            return Self::empty();
        }

        Self {
            centers: vec![
                Point2::new(-center_x, -center_y),
                Point2::new(center_x, -center_y),
                Point2::new(center_x, center_y),
                Point2::new(-center_x, center_y),
            ],
            radius,
        }
    }

    /// Holes for `spec` when enabled on the panel or forced by the caller
    pub fn for_spec(spec: &PanelSpec, force: bool) -> Self {
        if spec.screw_holes_enabled() || force {
            Self::compute(spec)
        } else {
            Self::empty()
        }
    }

    pub fn centers(&self) -> &[Point2<f64>] {
        &self.centers
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }
}

/// Center offset from the origin along one axis of `size` with `printable` face
fn axis_center(size: f64, printable: f64, radius: f64) -> f64 {
    (size / 2.0 - SCREW_EDGE_OFFSET).min(printable / 2.0 - radius - SCREW_KEEPOUT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_panel_centers() {
        let spec = PanelSpec::new(4.0, 4.0, 0.5).with_screw_holes(true);
        let holes = ScrewHoleSet::for_spec(&spec, false);
        assert_eq!(holes.len(), 4);
        for center in holes.centers() {
            assert!((center.x.abs() - 1.5).abs() < 1e-9);
            assert!((center.y.abs() - 1.5).abs() < 1e-9);
        }
        assert_eq!(holes.centers()[0], Point2::new(-1.5, -1.5));
        assert_eq!(holes.centers()[2], Point2::new(1.5, 1.5));
    }

    #[test]
    fn test_disabled_unless_forced() {
        let spec = PanelSpec::new(4.0, 4.0, 0.5);
        assert!(ScrewHoleSet::for_spec(&spec, false).is_empty());
        assert_eq!(ScrewHoleSet::for_spec(&spec, true).len(), 4);
    }

    #[test]
    fn test_small_panel_has_no_holes() {
        let spec = PanelSpec::new(1.0, 6.0, 0.5).with_screw_holes(true);
        assert!(ScrewHoleSet::compute(&spec).is_empty());
    }

    #[test]
    fn test_edge_offset_inside_deepest_chamfer() {
        let spec = PanelSpec::new(3.0, 3.0, 1.0).with_chamfer(true);
        assert!((spec.bevel() - 0.3).abs() < 1e-12);
        let holes = ScrewHoleSet::compute(&spec);
        let limit = spec.printable_area().width / 2.0 - SCREW_HOLE_RADIUS - SCREW_KEEPOUT;
        // 1.0 from the edge offset, limit 1.2 - r - keep-out
        assert!(1.0 < limit);
        assert_eq!(holes.centers()[2], Point2::new(1.0, 1.0));
    }

    #[test]
    fn test_axis_center_clamps_to_printable_edge() {
        // desired 3 / 2 - 0.5 = 1.0, limit 2 / 2 - r - keep-out
        let limit = 1.0 - SCREW_HOLE_RADIUS - SCREW_KEEPOUT;
        let center = axis_center(3.0, 2.0, SCREW_HOLE_RADIUS);
        assert!(limit < 1.0);
        assert!((center - limit).abs() < 1e-12);

        assert!((axis_center(3.0, 3.0, SCREW_HOLE_RADIUS) - 1.0).abs() < 1e-12);
    }
}
