#![forbid(unsafe_code)]

use std::fmt;

use hketa_core::{Rect, Size};
use smallvec::SmallVec;

use crate::measure::Measured;
use crate::table::row::ClickHandler;

/// What a placement is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacementKind {
    /// Row background, bled horizontally.
    Background { row: usize },
    /// Invisible full-row hit target.
    ClickTarget { row: usize },
    /// A cell, by flat index.
    Cell {
        index: usize,
        row: usize,
        column: usize,
    },
    /// Divider below `after_row`.
    Divider { after_row: usize },
}

/// A measured child and where it goes, relative to the table's origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub kind: PlacementKind,
    pub rect: Rect,
    pub measured: Measured,
}

pub(crate) struct ClickTarget {
    pub(crate) row: usize,
    pub(crate) rect: Rect,
    pub(crate) handler: ClickHandler,
}

/// Result of one table layout pass.
///
/// Placements are in draw order: for each row its background, click target,
/// cells, then the divider below it.
pub struct TableLayout {
    pub(crate) size: Size,
    pub(crate) column_widths: SmallVec<[u32; 8]>,
    pub(crate) column_x: SmallVec<[i32; 8]>,
    pub(crate) row_heights: Vec<u32>,
    pub(crate) row_y: Vec<i32>,
    pub(crate) divider_height: u32,
    pub(crate) placements: Vec<Placement>,
    pub(crate) click_targets: Vec<ClickTarget>,
}

impl TableLayout {
    pub(crate) fn empty(size: Size) -> Self {
        Self {
            size,
            column_widths: SmallVec::new(),
            column_x: SmallVec::new(),
            row_heights: Vec::new(),
            row_y: Vec::new(),
            divider_height: 0,
            placements: Vec::new(),
            click_targets: Vec::new(),
        }
    }

    /// Final size, clamped into the incoming constraints.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Resolved pixel width of each column.
    #[inline]
    pub fn column_widths(&self) -> &[u32] {
        &self.column_widths
    }

    /// Left edge of each column.
    #[inline]
    pub fn column_x(&self) -> &[i32] {
        &self.column_x
    }

    /// Height of each row (excluding divider and spacing).
    #[inline]
    pub fn row_heights(&self) -> &[u32] {
        &self.row_heights
    }

    /// Top edge of each row.
    #[inline]
    pub fn row_y(&self) -> &[i32] {
        &self.row_y
    }

    #[inline]
    pub fn row_count(&self) -> usize {
        self.row_heights.len()
    }

    #[inline]
    pub fn divider_height(&self) -> u32 {
        self.divider_height
    }

    /// Every placement, in draw order.
    #[inline]
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Cell placements only, in flat index order.
    pub fn cells(&self) -> impl Iterator<Item = &Placement> {
        self.placements
            .iter()
            .filter(|p| matches!(p.kind, PlacementKind::Cell { .. }))
    }

    /// Placement of the cell at flat `index`.
    pub fn cell(&self, index: usize) -> Option<&Placement> {
        self.cells()
            .find(|p| matches!(p.kind, PlacementKind::Cell { index: i, .. } if i == index))
    }

    /// Number of cells placed in `row`.
    pub fn cells_in_row(&self, row: usize) -> usize {
        self.cells()
            .filter(|p| matches!(p.kind, PlacementKind::Cell { row: r, .. } if r == row))
            .count()
    }

    /// Row whose click target contains `(x, y)`; the topmost wins.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<usize> {
        self.click_targets
            .iter()
            .rev()
            .find(|target| target.rect.contains(x, y))
            .map(|target| target.row)
    }

    /// Invoke the handler of the row under `(x, y)`.
    ///
    /// Returns `true` if a handler ran.
    pub fn click(&self, x: i32, y: i32) -> bool {
        match self
            .click_targets
            .iter()
            .rev()
            .find(|target| target.rect.contains(x, y))
        {
            Some(target) => {
                tracing::debug!(row = target.row, x, y, "table row clicked");
                (target.handler)();
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for TableLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableLayout")
            .field("size", &self.size)
            .field("column_widths", &self.column_widths)
            .field("row_heights", &self.row_heights)
            .field("divider_height", &self.divider_height)
            .field("placements", &self.placements.len())
            .field("click_targets", &self.click_targets.len())
            .finish()
    }
}
