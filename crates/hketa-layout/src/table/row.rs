#![forbid(unsafe_code)]

use std::fmt;
use std::sync::Arc;

use hketa_core::Dp;

use crate::alignment::VerticalAlignment;
use crate::measure::{AlignmentLine, Measurable};

/// Callback invoked when a row's click target is hit.
pub type ClickHandler = Arc<dyn Fn() + Send + Sync>;

/// Renderer measured to fill a row's background.
pub type RowBackground = Arc<dyn Measurable + Send + Sync>;

/// How cells line up vertically within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAlignment {
    /// Align each cell's box within the row height.
    Vertical(VerticalAlignment),
    /// Put every cell's chosen baseline on one line.
    Baseline(AlignmentLine),
}

impl Default for RowAlignment {
    fn default() -> Self {
        Self::Vertical(VerticalAlignment::Center)
    }
}

/// Per-row presentation: alignment, click handling, background, bleed.
#[derive(Clone, Default)]
pub struct TableRow {
    pub alignment: RowAlignment,
    pub on_click: Option<ClickHandler>,
    pub background: Option<RowBackground>,
    /// How far the background and click target extend past each side.
    pub horizontal_bleed: Dp,
}

impl TableRow {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn alignment(mut self, alignment: RowAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    #[must_use]
    pub fn on_click<F>(mut self, handler: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_click = Some(Arc::new(handler));
        self
    }

    #[must_use]
    pub fn background<B>(mut self, background: B) -> Self
    where
        B: Measurable + Send + Sync + 'static,
    {
        self.background = Some(Arc::new(background));
        self
    }

    #[must_use]
    pub fn horizontal_bleed(mut self, bleed: Dp) -> Self {
        self.horizontal_bleed = bleed;
        self
    }
}

impl fmt::Debug for TableRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableRow")
            .field("alignment", &self.alignment)
            .field("on_click", &self.on_click.is_some())
            .field("background", &self.background.is_some())
            .field("horizontal_bleed", &self.horizontal_bleed)
            .finish()
    }
}
