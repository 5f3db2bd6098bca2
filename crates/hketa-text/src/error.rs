#![forbid(unsafe_code)]

use std::fmt;

/// Errors raised by the auto-resize text engine.
#[derive(Debug, Clone, PartialEq)]
pub enum TextError {
    /// `min` is not below `max`, or either bound is not finite.
    InvalidFontSizeRange { min: f32, max: f32 },
    /// The shrink step is zero, negative, or not finite.
    InvalidStep(f32),
    /// A group kept changing after the maximum number of render passes.
    DidNotConverge { passes: usize },
}

impl fmt::Display for TextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFontSizeRange { min, max } => {
                write!(f, "font size range requires finite min < max, got {min}sp..{max}sp")
            }
            Self::InvalidStep(step) => {
                write!(f, "font size step must be finite and > 0, got {step}sp")
            }
            Self::DidNotConverge { passes } => {
                write!(f, "auto-resize group did not settle after {passes} render passes")
            }
        }
    }
}

impl std::error::Error for TextError {}
