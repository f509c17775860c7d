//! Shared constants for panel geometry, layout, and raster sizing.
//!
//! All lengths are in inches unless the name says otherwise.

/// Minimum panel width
pub const MIN_WIDTH: f64 = 1.0;
/// Minimum panel height
pub const MIN_HEIGHT: f64 = 1.0;
/// Maximum panel height
pub const MAX_HEIGHT: f64 = 35.0;
/// Minimum panel depth
pub const MIN_DEPTH: f64 = 0.1;
/// Maximum panel depth
pub const MAX_DEPTH: f64 = 1.0;

/// Chamfer size as a fraction of panel depth
pub const CHAMFER_DEPTH_RATIO: f64 = 0.3;
/// Smallest chamfer produced when chamfering is enabled
pub const MIN_BEVEL: f64 = 0.001;
/// Chamfer angle; the bevel is symmetric so it is always 45 degrees
pub const CHAMFER_ANGLE_DEG: f64 = 45.0;
/// Floor for printable dimensions and straight extrusion depth
pub const MIN_PRINTABLE: f64 = 0.01;

/// M4 mounting hole radius (2 mm)
pub const SCREW_HOLE_RADIUS: f64 = 2.0 / 25.4;
/// Distance from the panel edge to a hole center before clamping
pub const SCREW_EDGE_OFFSET: f64 = 0.5;
/// Keep-out between a hole and the printable boundary
pub const SCREW_KEEPOUT: f64 = 0.01;

/// Maximum number of live image slots
pub const MAX_IMAGE_SLOTS: usize = 4;
/// Grid layout rows and columns (fixed 2x2)
pub const GRID_ROWS: usize = 2;
pub const GRID_COLUMNS: usize = 2;

/// Smallest content dimension in raster pixels
pub const MIN_CONTENT_PX: f64 = 1.0;
/// Smallest content dimension in inches
pub const MIN_CONTENT_IN: f64 = 0.01;
/// Smallest panel dimension produced by match-to-content sizing
pub const MIN_MATCHED_DIMENSION: f64 = 1.0;
/// Smallest content extent kept visible when syncing margins
pub const MIN_VISIBLE_CONTENT: f64 = 0.1;
/// Margins below this snap to zero when auto-fitting
pub const MARGIN_SNAP: f64 = 0.01;

/// Canvas size on the short axis before print-resolution scaling
pub const BASE_CANVAS_SIZE: u32 = 1024;
/// Default print resolution
pub const DEFAULT_PPI: f64 = 200.0;
/// Default texture ceiling
pub const DEFAULT_MAX_TEXTURE_SIZE: u32 = 4096;
/// Extra resolution granted to multi-image layouts is capped at this factor
pub const MAX_COUNT_SCALE: f64 = 2.0;
/// Segments used to approximate a screw hole outline in the solid
pub const DEFAULT_CIRCLE_SEGMENTS: usize = 48;
