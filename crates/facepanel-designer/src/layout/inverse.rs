//! Match-to-content sizing.
//!
//! Solves one panel dimension so the laid-out images fill the printable face
//! exactly, holding the other dimension fixed. The solve happens in printable
//! space and the chamfer allowance is added back afterwards; the bevel depends
//! only on depth inside the panel limits, so this is exact.

use super::image_aspect;
use crate::dimensions::PanelSpec;
use crate::slots::{ImageSlot, Margins};
use facepanel_core::constants::{GRID_COLUMNS, GRID_ROWS, MIN_CONTENT_IN, MIN_MATCHED_DIMENSION};
use facepanel_core::LayoutMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Panel dimension solved by [`match_to_content`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchAxis {
    /// Keep the height, solve the width
    Width,
    /// Keep the width, solve the height
    Height,
}

impl fmt::Display for MatchAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Width => write!(f, "width"),
            Self::Height => write!(f, "height"),
        }
    }
}

impl FromStr for MatchAxis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "width" | "w" => Ok(Self::Width),
            "height" | "h" => Ok(Self::Height),
            _ => Err(format!("Unknown match axis: {}", s)),
        }
    }
}

struct ContentItem {
    aspect: f64,
    margin: Margins,
}

/// Resize `spec` along `axis` so the active images fill the face.
///
/// Returns `None` when no active slot holds an image. The result is floored at
/// one inch and clamped to the panel limits.
pub fn match_to_content(
    spec: &PanelSpec,
    slots: &[ImageSlot],
    mode: LayoutMode,
    axis: MatchAxis,
) -> Option<PanelSpec> {
    let items: Vec<ContentItem> = slots
        .iter()
        .filter_map(|slot| {
            let aspect = image_aspect(slot);
            (aspect > 0.0).then(|| ContentItem {
                aspect,
                margin: slot.margin(),
            })
        })
        .collect();

    if items.is_empty() {
        return None;
    }

    let printable = spec.printable_area();
    let allowance = 2.0 * spec.bevel();

    let printable_size = match (mode, axis) {
        (LayoutMode::Horizontal, MatchAxis::Height) => {
            let sum_aspect: f64 = items.iter().map(|i| i.aspect).sum();
            let sum_margin_x: f64 = items.iter().map(|i| i.margin.horizontal()).sum();
            let max_margin_y = max_of(&items, |i| i.margin.vertical());
            ((printable.width - sum_margin_x) / sum_aspect).max(MIN_CONTENT_IN) + max_margin_y
        }
        (LayoutMode::Horizontal, MatchAxis::Width) => {
            let sum_aspect: f64 = items.iter().map(|i| i.aspect).sum();
            let sum_margin_x: f64 = items.iter().map(|i| i.margin.horizontal()).sum();
            let max_margin_y = max_of(&items, |i| i.margin.vertical());
            (printable.height - max_margin_y).max(MIN_CONTENT_IN) * sum_aspect + sum_margin_x
        }
        (LayoutMode::Vertical, MatchAxis::Width) => {
            let sum_inv: f64 = items.iter().map(|i| 1.0 / i.aspect).sum();
            let sum_margin_y: f64 = items.iter().map(|i| i.margin.vertical()).sum();
            let max_margin_x = max_of(&items, |i| i.margin.horizontal());
            ((printable.height - sum_margin_y) / sum_inv).max(MIN_CONTENT_IN) + max_margin_x
        }
        (LayoutMode::Vertical, MatchAxis::Height) => {
            let sum_inv: f64 = items.iter().map(|i| 1.0 / i.aspect).sum();
            let sum_margin_y: f64 = items.iter().map(|i| i.margin.vertical()).sum();
            let max_margin_x = max_of(&items, |i| i.margin.horizontal());
            (printable.width - max_margin_x).max(MIN_CONTENT_IN) * sum_inv + sum_margin_y
        }
        (LayoutMode::Grid, MatchAxis::Height) => {
            let cell_w = printable.width / GRID_COLUMNS as f64;
            let cell_h = max_of(&items, |i| {
                (cell_w - i.margin.horizontal()).max(MIN_CONTENT_IN) / i.aspect
                    + i.margin.vertical()
            });
            cell_h * GRID_ROWS as f64
        }
        (LayoutMode::Grid, MatchAxis::Width) => {
            let cell_h = printable.height / GRID_ROWS as f64;
            let cell_w = max_of(&items, |i| {
                (cell_h - i.margin.vertical()).max(MIN_CONTENT_IN) * i.aspect
                    + i.margin.horizontal()
            });
            cell_w * GRID_COLUMNS as f64
        }
    };

    let solved = (printable_size + allowance).max(MIN_MATCHED_DIMENSION);
    debug!("Matched {} to content ({}): {:.4} in", axis, mode, solved);

    let mut matched = *spec;
    match axis {
        MatchAxis::Width => matched.set_width(solved),
        MatchAxis::Height => matched.set_height(solved),
    }
    Some(matched)
}

fn max_of(items: &[ContentItem], f: impl Fn(&ContentItem) -> f64) -> f64 {
    items.iter().map(f).fold(0.0, f64::max)
}
