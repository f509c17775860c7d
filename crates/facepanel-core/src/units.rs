//! Unit labels
//!
//! Panel geometry is carried in inches throughout.

/// Format a dimension label the way the panel preview annotates its edges
pub fn format_dimension(value_in: f64) -> String {
    format!("{} in", value_in)
}
