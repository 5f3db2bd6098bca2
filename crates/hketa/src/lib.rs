#![forbid(unsafe_code)]

//! hketa public facade.
//!
//! Re-exports the layout and text engines, a prelude for day-to-day use, a
//! top-level [`Error`], and [`logging::init`] for binaries.

use std::fmt;

pub mod logging;

// --- Core re-exports -------------------------------------------------------

pub use hketa_core::{
    Constraints, Density, DisplayConfig, Dp, LayoutDirection, Rect, Size, Sp,
};

// --- Layout re-exports -----------------------------------------------------

pub use hketa_layout::{
    AlignmentLine, ColumnWidth, FixedNode, HorizontalAlignment, LayoutContext, LayoutError,
    Measurable, Measured, Placement, PlacementKind, RowAlignment, Table, TableColumn,
    TableLayout, TableRow, VerticalAlignment,
};

// --- Text re-exports -------------------------------------------------------

pub use hketa_text::{
    AutoResizeState, AutoResizeStateHandle, AutoResizeText, FontSizeRange, MonospaceMeasurer,
    RenderEnv, RenderedText, TextError, TextLayoutResult, TextMeasurer, TextStyle, converge,
    converge_with, remember_auto_resize_state,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for hketa callers.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Rejected table configuration.
    Layout(LayoutError),
    /// Rejected font size range or a group that did not settle.
    Text(TextError),
    /// The global log subscriber could not be installed.
    Logging(logging::LoggingError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(err) => write!(f, "layout: {err}"),
            Self::Text(err) => write!(f, "text: {err}"),
            Self::Logging(err) => write!(f, "logging: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(err) => Some(err),
            Self::Text(err) => Some(err),
            Self::Logging(err) => Some(err),
        }
    }
}

impl From<LayoutError> for Error {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

impl From<TextError> for Error {
    fn from(err: TextError) -> Self {
        Self::Text(err)
    }
}

impl From<logging::LoggingError> for Error {
    fn from(err: logging::LoggingError) -> Self {
        Self::Logging(err)
    }
}

/// Standard result type for hketa APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        AutoResizeText, ColumnWidth, Constraints, DisplayConfig, Dp, Error, FontSizeRange,
        LayoutContext, Measurable, MonospaceMeasurer, RenderEnv, Result, Sp, Table, TableColumn,
        TableRow, converge, remember_auto_resize_state,
    };

    pub use crate::{core, layout, text};
}

pub use hketa_core as core;
pub use hketa_layout as layout;
pub use hketa_text as text;
