#![forbid(unsafe_code)]

//! Layout primitives and the adaptive table engine.
//!
//! This crate provides:
//!
//! - [`Measurable`] / [`Measured`] - the two-phase (measure, then place) contract
//!   every laid-out child implements
//! - [`HorizontalAlignment`] / [`VerticalAlignment`] - offsets inside a slot,
//!   direction aware
//! - [`round_largest_remainder`] - integer rounding with exact sum conservation
//! - [`Table`] - a grid with per-column width policies and per-row alignment
//!
//! # Example
//!
//! ```
//! use hketa_core::{Constraints, Dp};
//! use hketa_layout::{ColumnWidth, FixedNode, LayoutContext, Table, TableColumn};
//!
//! let cells = [FixedNode::new(30, 10), FixedNode::new(80, 10)];
//! let table = Table::new(2).columns(|col| match col {
//!     0 => TableColumn::new(ColumnWidth::Fixed(Dp(50.0))),
//!     _ => TableColumn::new(ColumnWidth::Weight(1.0)),
//! });
//!
//! let layout = table.layout(&cells, Constraints::new(0, 200, 0, 100), &LayoutContext::default());
//! assert_eq!(layout.column_widths(), &[50, 150]);
//! ```

pub mod alignment;
mod error;
pub mod measure;
pub mod rounding;
pub mod table;

pub use alignment::{HorizontalAlignment, VerticalAlignment};
pub use error::LayoutError;
pub use hketa_core::{Constraints, Density, Dp, LayoutDirection, Rect, Size};
pub use measure::{AlignmentLine, FixedNode, LayoutContext, Measurable, Measured};
pub use rounding::round_largest_remainder;
pub use table::{
    ClickHandler, ColumnWidth, Placement, PlacementKind, RowAlignment, Table, TableColumn,
    TableLayout, TableRow,
};
