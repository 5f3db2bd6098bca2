#![forbid(unsafe_code)]

use std::fmt;

/// Rejected table configuration.
///
/// Raised eagerly when a column policy is constructed through a validating
/// constructor. The layout pass itself never fails.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// A `Weight` column with a negative or non-finite weight.
    InvalidWeight(f32),
    /// A `Fixed` column with a negative or non-finite width (in dp).
    InvalidFixedWidth(f32),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWeight(weight) => {
                write!(f, "column weight must be finite and >= 0, got {weight}")
            }
            Self::InvalidFixedWidth(width) => {
                write!(f, "fixed column width must be finite and >= 0dp, got {width}dp")
            }
        }
    }
}

impl std::error::Error for LayoutError {}
