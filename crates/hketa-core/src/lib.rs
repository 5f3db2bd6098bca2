#![forbid(unsafe_code)]

//! Core: geometry, layout constraints, density-independent units, and
//! display configuration shared by the layout and text engines.

pub mod config;
pub mod constraints;
pub mod direction;
pub mod geometry;
pub mod unit;

pub use config::DisplayConfig;
pub use constraints::Constraints;
pub use direction::LayoutDirection;
pub use geometry::{Rect, Size};
pub use unit::{Density, Dp, Sp};
