#![forbid(unsafe_code)]

//! Board assembly and ASCII rendering.
//!
//! Layout runs in two passes. The first resolves the destination column's
//! width; the destinations then converge on one font size inside that width,
//! and the second pass lays the table out at that size.

use std::cell::RefCell;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use hketa::text::wrap::{WrapMode, wrap_text};
use hketa::{
    AlignmentLine, AutoResizeText, ColumnWidth, Constraints, Density, DisplayConfig, Dp,
    FixedNode, FontSizeRange, HorizontalAlignment, LayoutContext, MonospaceMeasurer,
    PlacementKind, RenderEnv, Result, RowAlignment, Sp, Table, TableColumn, TableLayout,
    TableRow, TextStyle, converge, remember_auto_resize_state,
};

use crate::text_cell::TextCell;

const ROUTE_SIZE: Sp = Sp(18.0);
const ETA_SIZE: Sp = Sp(14.0);
const PADDING: Dp = Dp(16.0);
const NOTHING_SELECTED: usize = usize::MAX;

/// One upcoming bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub route: String,
    pub destination: String,
    /// `None` when no estimate is available.
    pub eta_minutes: Option<u32>,
}

impl Departure {
    pub fn new(route: &str, destination: &str, eta_minutes: Option<u32>) -> Self {
        Self {
            route: route.to_string(),
            destination: destination.to_string(),
            eta_minutes,
        }
    }

    pub fn eta_label(&self) -> String {
        match self.eta_minutes {
            Some(0) => "Arriving".to_string(),
            Some(minutes) => format!("{minutes} min"),
            None => "-".to_string(),
        }
    }
}

pub fn sample_departures() -> Vec<Departure> {
    vec![
        Departure::new("1A", "Sau Mau Ping (Central)", Some(3)),
        Departure::new("5C", "Tsim Sha Tsui Star Ferry", Some(0)),
        Departure::new("13D", "Po Tat", Some(11)),
        Departure::new("260", "Tuen Mun Road Interchange via Kwai Chung", Some(17)),
        Departure::new("N241", "Cheung Sha Wan (Sham Shui Po)", None),
    ]
}

fn title_range() -> Result<FontSizeRange> {
    Ok(FontSizeRange::new(Sp(14.0), Sp(28.0), Sp(1.0))?)
}

fn destination_range() -> Result<FontSizeRange> {
    Ok(FontSizeRange::new(Sp(10.0), Sp(18.0), Sp(1.0))?)
}

/// A laid-out ETA board.
pub struct Board {
    pub title: String,
    pub title_size: Sp,
    pub destination_size: Sp,
    pub layout: TableLayout,
    cell_texts: Vec<String>,
    content_width: u32,
    selected: Arc<AtomicUsize>,
}

impl Board {
    pub fn build(
        stop: &str,
        departures: &[Departure],
        config: &DisplayConfig,
        measurer: &RefCell<MonospaceMeasurer>,
    ) -> Result<Self> {
        let _span =
            tracing::info_span!("build_board", stop, departures = departures.len()).entered();

        let density = config.density;
        let env = RenderEnv::from(config);
        let padding = density.round_to_px(PADDING).saturating_mul(2);
        let content_width = config.window_size.width.saturating_sub(padding).max(1);
        let content = Constraints::new(0, content_width, 0, config.window_size.height);
        let ctx = LayoutContext::from(config);

        let title_range = title_range()?;
        let title_state = remember_auto_resize_state(title_range, true);
        let mut title = [AutoResizeText::new(stop, &title_state)];
        let title_size = converge(&mut title, &mut *measurer.borrow_mut(), content, env)?
            .first()
            .map_or(title_range.max(), |r| r.font_size);

        let selected = Arc::new(AtomicUsize::new(NOTHING_SELECTED));
        let table = eta_table(departures, &selected);

        let destination_range = destination_range()?;
        let probe = table.layout(
            &cells(departures, destination_range.max(), density, measurer),
            content,
            &ctx,
        );
        let destination_width = probe.column_widths().get(1).copied().unwrap_or(content_width);

        let destination_state = remember_auto_resize_state(destination_range, true);
        let mut destinations: Vec<_> = departures
            .iter()
            .map(|d| AutoResizeText::new(d.destination.as_str(), &destination_state).max_lines(2))
            .collect();
        let destination_size = converge(
            &mut destinations,
            &mut *measurer.borrow_mut(),
            Constraints::new(0, destination_width, 0, content.max_height),
            env,
        )?
        .first()
        .map_or(destination_range.max(), |r| r.font_size);

        let layout = table.layout(
            &cells(departures, destination_size, density, measurer),
            content,
            &ctx,
        );
        tracing::info!(
            title_size = %title_size,
            destination_size = %destination_size,
            rows = layout.row_count(),
            "board laid out"
        );

        Ok(Self {
            title: stop.to_string(),
            title_size,
            destination_size,
            layout,
            cell_texts: departures
                .iter()
                .flat_map(|d| [d.route.clone(), d.destination.clone(), d.eta_label()])
                .collect(),
            content_width,
            selected,
        })
    }

    /// Click the middle of `row`; returns the row whose handler ran.
    pub fn select(&self, row: usize) -> Option<usize> {
        let top = *self.layout.row_y().get(row)?;
        let height = *self.layout.row_heights().get(row)?;
        let y = top.saturating_add(i32::try_from(height / 2).unwrap_or(i32::MAX));
        let x = i32::try_from(self.layout.size().width / 2).unwrap_or(i32::MAX);
        if !self.layout.click(x, y) {
            return None;
        }
        match self.selected.load(Ordering::Relaxed) {
            NOTHING_SELECTED => None,
            selected => Some(selected),
        }
    }

    /// Draw the board `columns` characters wide.
    pub fn render_ascii(&self, columns: usize) -> Vec<String> {
        let columns = columns.max(1);
        let scale = (self.content_width as f32 / columns as f32).max(1.0);
        let to_col = |px: i32| -> usize { (px.max(0) as f32 / scale).round() as usize };

        let mut out = vec![self.title.clone(), "=".repeat(columns)];
        let rows = self.layout.row_count();
        for row in 0..rows {
            let mut grid: Vec<Vec<char>> = Vec::new();
            for placement in self.layout.cells() {
                let PlacementKind::Cell { index, row: r, .. } = placement.kind else {
                    continue;
                };
                if r != row {
                    continue;
                }
                let Some(text) = self.cell_texts.get(index) else {
                    continue;
                };
                let start = to_col(placement.rect.x);
                let width = to_col(placement.rect.right()).saturating_sub(start).max(1);
                for (i, line) in wrap_text(text, width, WrapMode::WordChar).iter().enumerate() {
                    if grid.len() <= i {
                        grid.push(vec![' '; columns]);
                    }
                    for (slot, ch) in grid[i].iter_mut().skip(start).zip(line.text.chars()) {
                        *slot = ch;
                    }
                }
            }
            out.extend(
                grid.into_iter()
                    .map(|line| line.into_iter().collect::<String>().trim_end().to_string()),
            );
            if row + 1 < rows {
                out.push("-".repeat(columns));
            }
        }
        out
    }
}

fn eta_table(departures: &[Departure], selected: &Arc<AtomicUsize>) -> Table<'static> {
    let routes: Arc<[String]> = departures.iter().map(|d| d.route.clone()).collect();
    let selected = Arc::clone(selected);

    Table::new(3)
        .columns(|column| match column {
            0 => TableColumn::new(ColumnWidth::max(ColumnWidth::Wrap, ColumnWidth::Fixed(Dp(48.0)))),
            1 => TableColumn::new(ColumnWidth::Weight(1.0)),
            _ => TableColumn::new(ColumnWidth::Wrap).alignment(HorizontalAlignment::End),
        })
        .rows(move |row| {
            let selected = Arc::clone(&selected);
            let route = routes.get(row).cloned().unwrap_or_default();
            TableRow::new()
                .alignment(RowAlignment::Baseline(AlignmentLine::FirstBaseline))
                .horizontal_bleed(Dp(8.0))
                .on_click(move || {
                    tracing::info!(row, route = %route, "departure selected");
                    selected.store(row, Ordering::Relaxed);
                })
        })
        .row_spacing(Dp(4.0))
        .column_spacing(Dp(8.0))
        .row_divider(FixedNode::new(0, 1))
}

fn cells<'m>(
    departures: &[Departure],
    destination_size: Sp,
    density: Density,
    measurer: &'m RefCell<MonospaceMeasurer>,
) -> Vec<TextCell<'m, MonospaceMeasurer>> {
    departures
        .iter()
        .flat_map(|d| {
            [
                TextCell::new(d.route.as_str(), TextStyle::new(ROUTE_SIZE), density, measurer),
                TextCell::new(
                    d.destination.as_str(),
                    TextStyle::new(destination_size).max_lines(2),
                    density,
                    measurer,
                ),
                TextCell::new(d.eta_label(), TextStyle::new(ETA_SIZE).max_lines(1), density, measurer),
            ]
        })
        .collect()
}
