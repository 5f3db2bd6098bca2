#![forbid(unsafe_code)]

//! Adaptive table layout.
//!
//! A [`Table`] lays out a flat list of cells into `columns_count` columns,
//! row by row. Layout runs in two passes:
//!
//! 1. **Measure**: resolve each column's width from its [`ColumnWidth`]
//!    policy (fixed and wrap columns first, then weighted columns share what
//!    is left), measure every cell against its column's width, measure the
//!    dividers, and derive each row's height from its [`RowAlignment`].
//! 2. **Place**: walk rows top to bottom emitting, in draw order, the row
//!    background, the row click target, the cells, and the divider below.
//!
//! Cells never negotiate their column's width: a cell wider than its column
//! is measured with the column width as its maximum.
//!
//! # Example
//!
//! ```
//! use hketa_core::{Constraints, Dp};
//! use hketa_layout::{
//!     AlignmentLine, ColumnWidth, FixedNode, LayoutContext, RowAlignment, Table, TableColumn,
//!     TableRow,
//! };
//!
//! let cells = [
//!     FixedNode::new(20, 16).with_baseline(12),
//!     FixedNode::new(60, 30).with_baseline(24),
//! ];
//! let table = Table::new(2)
//!     .columns(|col| match col {
//!         0 => TableColumn::new(ColumnWidth::Wrap),
//!         _ => TableColumn::new(ColumnWidth::Weight(1.0)),
//!     })
//!     .rows(|_| TableRow::new().alignment(RowAlignment::Baseline(AlignmentLine::FirstBaseline)));
//!
//! let layout = table.layout(&cells, Constraints::new(0, 120, 0, 200), &LayoutContext::default());
//! assert_eq!(layout.row_heights(), &[30]);
//! // Both baselines land on y = 24.
//! assert_eq!(layout.cell(0).map(|p| p.rect.y + 12), Some(24));
//! assert_eq!(layout.cell(1).map(|p| p.rect.y + 24), Some(24));
//! ```

mod layout;
mod policy;
mod row;

pub use layout::{Placement, PlacementKind, TableLayout};
pub use policy::{ColumnWidth, TableColumn};
pub use row::{ClickHandler, RowAlignment, RowBackground, TableRow};

use hketa_core::geometry::clamp_to_i32;
use hketa_core::{Constraints, Dp, Rect, Size};
use smallvec::SmallVec;

use crate::measure::{LayoutContext, Measurable, Measured};
use layout::ClickTarget;
use policy::{resolve_column_widths, spacing_total};

type ColumnProvider<'a> = Box<dyn Fn(usize) -> TableColumn + 'a>;
type RowProvider<'a> = Box<dyn Fn(usize) -> TableRow + 'a>;

/// A grid of cells with per-column width policies and per-row alignment.
pub struct Table<'a> {
    columns_count: usize,
    columns: Option<ColumnProvider<'a>>,
    rows: Option<RowProvider<'a>>,
    row_spacing: Dp,
    column_spacing: Dp,
    row_divider: Option<Box<dyn Measurable + 'a>>,
}

impl<'a> Table<'a> {
    /// A table with `columns_count` equally weighted columns.
    pub fn new(columns_count: usize) -> Self {
        Self {
            columns_count,
            columns: None,
            rows: None,
            row_spacing: Dp::ZERO,
            column_spacing: Dp::ZERO,
            row_divider: None,
        }
    }

    /// Set the column provider, called once per column per layout pass.
    #[must_use]
    pub fn columns<F>(mut self, columns: F) -> Self
    where
        F: Fn(usize) -> TableColumn + 'a,
    {
        self.columns = Some(Box::new(columns));
        self
    }

    /// Set the row provider, called once per row per layout pass.
    #[must_use]
    pub fn rows<F>(mut self, rows: F) -> Self
    where
        F: Fn(usize) -> TableRow + 'a,
    {
        self.rows = Some(Box::new(rows));
        self
    }

    /// Vertical space added below every divider.
    #[must_use]
    pub fn row_spacing(mut self, spacing: Dp) -> Self {
        self.row_spacing = spacing;
        self
    }

    /// Horizontal space between adjacent columns.
    #[must_use]
    pub fn column_spacing(mut self, spacing: Dp) -> Self {
        self.column_spacing = spacing;
        self
    }

    /// Divider drawn between consecutive rows, spanning the table width.
    #[must_use]
    pub fn row_divider<D>(mut self, divider: D) -> Self
    where
        D: Measurable + 'a,
    {
        self.row_divider = Some(Box::new(divider));
        self
    }

    #[inline]
    pub fn columns_count(&self) -> usize {
        self.columns_count
    }

    fn column(&self, index: usize) -> TableColumn {
        match &self.columns {
            Some(columns) => columns(index),
            None => TableColumn::default_for(self.columns_count),
        }
    }

    fn row(&self, index: usize) -> TableRow {
        match &self.rows {
            Some(rows) => rows(index),
            None => TableRow::default(),
        }
    }

    /// Measure and place `cells` within `constraints`.
    ///
    /// Cell `i` goes to row `i / columns_count`, column `i % columns_count`;
    /// the last row may be partial.
    pub fn layout<C: Measurable>(
        &self,
        cells: &[C],
        constraints: Constraints,
        ctx: &LayoutContext,
    ) -> TableLayout {
        let _span = tracing::debug_span!(
            "table_layout",
            columns = self.columns_count,
            cells = cells.len(),
            max_width = constraints.max_width,
            max_height = constraints.max_height
        )
        .entered();

        if self.columns_count == 0 || cells.is_empty() {
            return TableLayout::empty(constraints.constrain(Size::ZERO));
        }

        let columns_count = self.columns_count;
        let density = ctx.density;
        let row_spacing = density.round_to_px(self.row_spacing);
        let column_spacing = density.round_to_px(self.column_spacing);
        let max_height = constraints.max_height;

        // 1. Column policies & widths
        let columns: Vec<TableColumn> = (0..columns_count).map(|c| self.column(c)).collect();
        let policies: Vec<ColumnWidth> = columns.iter().map(|c| c.width.clone()).collect();
        let available_width = constraints
            .has_bounded_width()
            .then_some(constraints.max_width);
        let column_widths: SmallVec<[u32; 8]> = resolve_column_widths(
            &policies,
            cells,
            available_width,
            max_height,
            column_spacing,
            density,
        )
        .into_iter()
        .collect();

        // 2. Measure cells against their column width
        let measured: Vec<Measured> = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let cell_constraints =
                    Constraints::new(0, column_widths[i % columns_count], 0, max_height);
                clamp_measured(cell.measure(cell_constraints), cell_constraints)
            })
            .collect();
        let row_count = cells.len().div_ceil(columns_count);

        // 3. Dividers
        let table_width = column_widths
            .iter()
            .fold(0u32, |acc, &w| acc.saturating_add(w))
            .saturating_add(spacing_total(columns_count, column_spacing));
        let divider_constraints = Constraints::fixed_width(table_width, 0, max_height);
        let dividers: Vec<Measured> = match &self.row_divider {
            Some(divider) => (0..row_count.saturating_sub(1))
                .map(|_| clamp_measured(divider.measure(divider_constraints), divider_constraints))
                .collect(),
            None => Vec::new(),
        };
        let divider_height = dividers.first().map_or(0, |d| d.size.height);

        // 4. Row heights & baselines
        let rows: Vec<TableRow> = (0..row_count).map(|r| self.row(r)).collect();
        let mut row_heights = vec![0u32; row_count];
        let mut baseline_above = vec![0u32; row_count];
        for (r, row) in rows.iter().enumerate() {
            let start = r * columns_count;
            let end = (start + columns_count).min(measured.len());
            let row_cells = &measured[start..end];

            match row.alignment {
                RowAlignment::Baseline(line) => {
                    let mut above = 0u32;
                    let mut below = 0u32;
                    for cell in row_cells {
                        let baseline = cell.baseline_or_bottom(line);
                        above = above.max(baseline);
                        below = below.max(cell.size.height.saturating_sub(baseline));
                    }
                    baseline_above[r] = above;
                    row_heights[r] = above.saturating_add(below);
                }
                RowAlignment::Vertical(_) => {
                    row_heights[r] = row_cells.iter().map(|c| c.size.height).max().unwrap_or(0);
                }
            }
        }

        // 5. Overall size
        let gap = divider_height.saturating_add(row_spacing);
        let content_height = row_heights
            .iter()
            .fold(0u32, |acc, &h| acc.saturating_add(h))
            .saturating_add(spacing_total(row_count, gap));
        let size = Size::new(
            constraints.constrain_width(table_width),
            constraints.constrain_height(content_height),
        );

        // 6. Placement
        let mut column_x: SmallVec<[i32; 8]> = SmallVec::with_capacity(columns_count);
        let mut x = 0i32;
        for &width in &column_widths {
            column_x.push(x);
            x = x
                .saturating_add(clamp_to_i32(width))
                .saturating_add(clamp_to_i32(column_spacing));
        }

        let mut placements = Vec::with_capacity(cells.len() + row_count * 2);
        let mut click_targets = Vec::new();
        let mut row_y = Vec::with_capacity(row_count);
        let mut y = 0i32;

        for (r, row) in rows.iter().enumerate() {
            row_y.push(y);
            let row_height = row_heights[r];
            let bleed = density.round_to_px(row.horizontal_bleed);
            let band = Rect::new(
                -clamp_to_i32(bleed),
                y,
                size.width.saturating_add(bleed.saturating_mul(2)),
                row_height.saturating_add(gap),
            );

            // 6a. Background
            if let Some(background) = &row.background {
                let band_constraints = Constraints::fixed(band.width, band.height);
                let measured_bg =
                    clamp_measured(background.measure(band_constraints), band_constraints);
                placements.push(Placement {
                    kind: PlacementKind::Background { row: r },
                    rect: Rect::at(band.x, band.y, measured_bg.size),
                    measured: measured_bg,
                });
            }

            // 6b. Click target
            if let Some(handler) = &row.on_click {
                placements.push(Placement {
                    kind: PlacementKind::ClickTarget { row: r },
                    rect: band,
                    measured: Measured::new(band.size()),
                });
                click_targets.push(ClickTarget {
                    row: r,
                    rect: band,
                    handler: handler.clone(),
                });
            }

            // 6c. Cells
            for (c, column) in columns.iter().enumerate() {
                let index = r * columns_count + c;
                let Some(cell) = measured.get(index) else {
                    break;
                };
                let dx = column
                    .alignment
                    .offset(cell.size.width, column_widths[c], ctx.direction);
                let dy = match row.alignment {
                    RowAlignment::Baseline(line) => {
                        baseline_above[r].saturating_sub(cell.baseline_or_bottom(line))
                    }
                    RowAlignment::Vertical(alignment) => {
                        alignment.offset(cell.size.height, row_height)
                    }
                };
                placements.push(Placement {
                    kind: PlacementKind::Cell {
                        index,
                        row: r,
                        column: c,
                    },
                    rect: Rect::at(
                        column_x[c].saturating_add(clamp_to_i32(dx)),
                        y.saturating_add(clamp_to_i32(dy)),
                        cell.size,
                    ),
                    measured: *cell,
                });
            }

            y = y.saturating_add(clamp_to_i32(row_height));

            // 6d. Divider
            if r + 1 < row_count {
                if let Some(divider) = dividers.get(r) {
                    placements.push(Placement {
                        kind: PlacementKind::Divider { after_row: r },
                        rect: Rect::at(0, y, divider.size),
                        measured: *divider,
                    });
                }
                y = y.saturating_add(clamp_to_i32(gap));
            }
        }

        tracing::debug!(
            width = size.width,
            height = size.height,
            rows = row_count,
            placements = placements.len(),
            "table layout complete"
        );

        TableLayout {
            size,
            column_widths,
            column_x,
            row_heights,
            row_y,
            divider_height,
            placements,
            click_targets,
        }
    }
}

/// Clamp a child's reported size into the constraints it was measured with.
fn clamp_measured(measured: Measured, constraints: Constraints) -> Measured {
    Measured {
        size: constraints.constrain(measured.size),
        ..measured
    }
}
