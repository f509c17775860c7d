//! # FacePanel Core
//!
//! Core types and utilities shared by the FacePanel crates.
//! Provides the error taxonomy for the adapters around the geometry core,
//! dimension labels, and the panel limits and layout constants.

pub mod constants;
pub mod error;
pub mod types;
pub mod units;

pub use error::{Error, ExportError, ImageError, Result};
pub use types::{LayoutMode, StlFormat};
pub use units::format_dimension;
