//! Small value types shared between the designer and settings crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How active image slots are arranged on the panel face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// All slots share one row
    #[default]
    Horizontal,
    /// All slots share one column
    Vertical,
    /// Fixed 2x2 cell grid
    Grid,
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => write!(f, "horizontal"),
            Self::Vertical => write!(f, "vertical"),
            Self::Grid => write!(f, "grid"),
        }
    }
}

impl FromStr for LayoutMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "horizontal" | "row" => Ok(Self::Horizontal),
            "vertical" | "column" => Ok(Self::Vertical),
            "grid" => Ok(Self::Grid),
            _ => Err(format!("Unknown layout mode: {}", s)),
        }
    }
}

/// STL encoding used for exported solids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StlFormat {
    /// Plain-text STL
    #[default]
    Ascii,
    /// Binary STL
    Binary,
}

impl fmt::Display for StlFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascii => write!(f, "ascii"),
            Self::Binary => write!(f, "binary"),
        }
    }
}

impl FromStr for StlFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ascii" | "text" => Ok(Self::Ascii),
            "binary" | "bin" => Ok(Self::Binary),
            _ => Err(format!("Unknown STL format: {}", s)),
        }
    }
}
