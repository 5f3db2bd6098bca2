#![forbid(unsafe_code)]

//! ETA board demo: an auto-sized stop title above a route table whose
//! destinations share one auto-resized font size.

pub mod board;
pub mod cli;
pub mod text_cell;
