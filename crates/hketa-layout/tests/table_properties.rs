#![forbid(unsafe_code)]

//! Table layout invariants under generated inputs.
//!
//! | Property          | Checked by                         |
//! |-------------------|------------------------------------|
//! | Width conservation| `weighted_widths_fill_remaining`   |
//! | Overflow          | `weights_are_zero_when_fixed_fill` |
//! | Row partition     | `rows_partition_cells`             |
//! | Baseline sharing  | `baselines_share_one_y`            |
//! | Containment       | `size_respects_constraints`        |

use hketa_layout::{
    AlignmentLine, ColumnWidth, Constraints, Dp, FixedNode, LayoutContext, PlacementKind,
    RowAlignment, Table, TableColumn, TableRow,
};
use proptest::prelude::*;

fn ctx() -> LayoutContext {
    LayoutContext::default()
}

#[derive(Debug, Clone)]
enum Policy {
    Fixed(u16),
    Weight(f32),
}

impl Policy {
    fn column(&self) -> TableColumn {
        match *self {
            Policy::Fixed(px) => TableColumn::new(ColumnWidth::Fixed(Dp(f32::from(px)))),
            Policy::Weight(w) => TableColumn::new(ColumnWidth::Weight(w)),
        }
    }
}

fn policy_strategy() -> impl Strategy<Value = Policy> {
    prop_oneof![
        (0u16..120).prop_map(Policy::Fixed),
        (0.05f32..5.0).prop_map(Policy::Weight),
    ]
}

fn layout_with(policies: &[Policy], width: u32, spacing: u16) -> Vec<u32> {
    let cells = vec![FixedNode::new(1, 1); policies.len()];
    let table = Table::new(policies.len())
        .column_spacing(Dp(f32::from(spacing)))
        .columns(|c| policies[c].column());
    table
        .layout(&cells, Constraints::new(0, width, 0, 100), &ctx())
        .column_widths()
        .to_vec()
}

fn fixed_total(policies: &[Policy], spacing: u16) -> u32 {
    let fixed: u32 = policies
        .iter()
        .map(|p| match p {
            Policy::Fixed(px) => u32::from(*px),
            Policy::Weight(_) => 0,
        })
        .sum();
    fixed + u32::from(spacing) * (policies.len() as u32 - 1)
}

#[test]
fn fixed_plus_weight_scenario() {
    let cells = [FixedNode::new(10, 10), FixedNode::new(10, 10)];
    let columns = |c: usize| match c {
        0 => TableColumn::new(ColumnWidth::Fixed(Dp(50.0))),
        _ => TableColumn::new(ColumnWidth::Weight(1.0)),
    };

    let plain = Table::new(2).columns(columns);
    let layout = plain.layout(&cells, Constraints::new(0, 200, 0, 100), &ctx());
    assert_eq!(layout.column_widths(), &[50, 150]);

    let spaced = Table::new(2).columns(columns).column_spacing(Dp(12.0));
    let layout = spaced.layout(&cells, Constraints::new(0, 200, 0, 100), &ctx());
    assert_eq!(layout.column_widths(), &[50, 138]);
}

proptest! {
    #[test]
    fn weighted_widths_fill_remaining(
        policies in prop::collection::vec(policy_strategy(), 1..8),
        width in 0u32..2000,
        spacing in 0u16..10,
    ) {
        let widths = layout_with(&policies, width, spacing);
        let fixed = fixed_total(&policies, spacing);
        let has_weight = policies.iter().any(|p| matches!(p, Policy::Weight(_)));
        prop_assume!(has_weight && width >= fixed);

        let weighted: u32 = widths
            .iter()
            .zip(&policies)
            .filter(|(_, p)| matches!(p, Policy::Weight(_)))
            .map(|(w, _)| *w)
            .sum();
        prop_assert_eq!(weighted, width - fixed);
    }

    #[test]
    fn weights_are_zero_when_fixed_fill(
        policies in prop::collection::vec(policy_strategy(), 1..8),
        spacing in 0u16..10,
    ) {
        let fixed = fixed_total(&policies, spacing);
        let widths = layout_with(&policies, fixed, spacing);
        for (w, p) in widths.iter().zip(&policies) {
            if matches!(p, Policy::Weight(_)) {
                prop_assert_eq!(*w, 0);
            }
        }
    }

    #[test]
    fn rows_partition_cells(cells_count in 1usize..60, columns in 1usize..9) {
        let cells = vec![FixedNode::new(3, 4); cells_count];
        let layout = Table::new(columns).layout(&cells, Constraints::new(0, 400, 0, 4000), &ctx());

        let rows = cells_count.div_ceil(columns);
        prop_assert_eq!(layout.row_count(), rows);
        let last = if cells_count % columns == 0 { columns } else { cells_count % columns };
        prop_assert_eq!(layout.cells_in_row(rows - 1), last);
        for row in 0..rows - 1 {
            prop_assert_eq!(layout.cells_in_row(row), columns);
        }
        for (i, placement) in layout.cells().enumerate() {
            prop_assert_eq!(
                placement.kind,
                PlacementKind::Cell { index: i, row: i / columns, column: i % columns }
            );
        }
    }

    #[test]
    fn baselines_share_one_y(
        nodes in prop::collection::vec((1u32..60, prop::option::of(0u32..60)), 1..12),
        columns in 1usize..5,
        last in any::<bool>(),
    ) {
        let line = if last { AlignmentLine::LastBaseline } else { AlignmentLine::FirstBaseline };
        let cells: Vec<FixedNode> = nodes
            .iter()
            .map(|&(h, b)| {
                let node = FixedNode::new(5, h);
                match b {
                    Some(b) => node.with_baseline(b.min(h)),
                    None => node,
                }
            })
            .collect();
        let table = Table::new(columns)
            .row_spacing(Dp(2.0))
            .row_divider(FixedNode::new(0, 1))
            .rows(move |_| TableRow::new().alignment(RowAlignment::Baseline(line)));
        let layout = table.layout(&cells, Constraints::new(0, 200, 0, u32::MAX), &ctx());

        for row in 0..layout.row_count() {
            let lines: Vec<i32> = layout
                .cells()
                .filter_map(|p| match p.kind {
                    PlacementKind::Cell { row: r, .. } if r == row => {
                        Some(p.rect.y + p.measured.baseline_or_bottom(line) as i32)
                    }
                    _ => None,
                })
                .collect();
            prop_assert!(lines.windows(2).all(|w| w[0] == w[1]), "row {row}: {lines:?}");
        }
    }

    #[test]
    fn size_respects_constraints(
        cells_count in 0usize..30,
        columns in 0usize..6,
        min_w in 0u32..200,
        max_w in 0u32..400,
        min_h in 0u32..200,
        max_h in 0u32..400,
    ) {
        let constraints = Constraints::new(min_w, max_w, min_h, max_h);
        let cells = vec![FixedNode::new(17, 9); cells_count];
        let layout = Table::new(columns)
            .row_spacing(Dp(3.0))
            .layout(&cells, constraints, &ctx());
        prop_assert!(constraints.is_satisfied_by(layout.size()));
    }
}
