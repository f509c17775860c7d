//! # FacePanel Designer
//!
//! Parametric geometry and layout engine for face panels. From the primary panel
//! dimensions and up to four images it derives the solid model and a matching
//! print-ready face texture.
//!
//! ## Core Components
//!
//! - **Dimensions**: panel limits, chamfer bevel, printable area
//! - **Screw holes**: mounting hole placement shared by the solid and the mask
//! - **Layout**: horizontal, vertical and 2x2 grid packing plus match-to-content sizing
//! - **Solid**: cap tessellation and straight or beveled extrusion
//! - **Face raster**: texture and hole mask compositing
//! - **Export**: STL, metadata and zip packaging
//!
//! ## Architecture
//!
//! ```text
//! PanelSpec ──► printable area / bevel / screw holes
//!     │                 │
//!     ▼                 ▼
//! LayoutEngine ──► FaceRaster (texture, hole mask)
//!     │
//!     ▼
//! PanelSolid (Mesh3D) ──► STL ──► export archive
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use facepanel_designer::{generate_panel, PanelDesign, RasterSettings, SolidOptions};
//!
//! let design = PanelDesign::default();
//! let panel = generate_panel(&design, &RasterSettings::default(), &SolidOptions::default());
//! println!("{} triangles", panel.solid.triangle_count());
//! ```

pub mod dimensions;
pub mod export;
pub mod face_raster;
pub mod layout;
pub mod margin_fit;
pub mod model3d;
pub mod pipeline;
pub mod screw_holes;
pub mod slots;
pub mod solid;
pub mod stl;

pub use dimensions::{ChamferSpec, DisplayValues, PanelSpec, PrintableArea};
pub use export::{
    archive_bytes, export_metadata, export_panel, write_archive, ExportBundle, ExportImage,
    ExportOptions,
};
pub use face_raster::{apply_mask, canvas_size, composite_face, FaceRaster, RasterSettings};
pub use layout::{
    compute_layout, margins_px, match_to_content, MarginsPx, MatchAxis, Placement, RasterSize,
    Rect,
};
pub use margin_fit::{fit_margins_for_contain, sync_margins, PaddingSource};
pub use model3d::{Mesh3D, MeshBuffers, Triangle3D};
pub use pipeline::{generate_panel, GeneratedPanel, PanelDesign};
pub use screw_holes::ScrewHoleSet;
pub use slots::{ImageSlot, Margins, SlotArray};
pub use solid::{build_panel_solid, SolidOptions};
pub use stl::{read_stl, write_ascii_stl, write_binary_stl, write_stl};

pub use facepanel_core::{LayoutMode, StlFormat};
