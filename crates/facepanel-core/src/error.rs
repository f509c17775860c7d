//! Error handling for FacePanel
//!
//! The geometry and layout core never fails: out-of-range input is clamped and
//! degenerate geometry degrades to a reduced result. Errors only arise at the
//! edges of the system:
//! - Image errors (decoding source images)
//! - Export errors (STL serialization, archive packaging)
//! - Config errors (project and settings files)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Image error type
///
/// Represents failures while reading or decoding face images.
#[derive(Error, Debug, Clone)]
pub enum ImageError {
    /// The image could not be decoded
    #[error("Failed to decode image {path}: {reason}")]
    Decode {
        /// Path or name of the image source.
        path: String,
        /// The decoder's reason.
        reason: String,
    },

    /// The image decoded to an empty raster
    #[error("Image {path} has no pixels")]
    Empty {
        /// Path or name of the image source.
        path: String,
    },

    /// Raster could not be encoded for output
    #[error("Failed to encode raster: {reason}")]
    Encode {
        /// The encoder's reason.
        reason: String,
    },
}

/// Export error type
///
/// Represents failures while serializing the solid or packaging an export.
#[derive(Error, Debug, Clone)]
pub enum ExportError {
    /// STL serialization failed
    #[error("STL serialization failed: {reason}")]
    Stl {
        /// The reason serialization failed.
        reason: String,
    },

    /// Archive packaging failed
    #[error("Failed to write export archive: {reason}")]
    Archive {
        /// The reason packaging failed.
        reason: String,
    },
}

/// Main error type for FacePanel
///
/// A unified error type that can represent any error from the adapters
/// around the core. This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Image error
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Export error
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Project or settings file error
    #[error("Config error: {0}")]
    Config(String),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Create a config error from a string message
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Check if this is an image error
    pub fn is_image_error(&self) -> bool {
        matches!(self, Error::Image(_))
    }

    /// Check if this is an export error
    pub fn is_export_error(&self) -> bool {
        matches!(self, Error::Export(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
