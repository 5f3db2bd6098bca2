#![forbid(unsafe_code)]

//! Column width policies and their resolution to pixels.

use hketa_core::{Density, Dp};

use crate::alignment::HorizontalAlignment;
use crate::error::LayoutError;
use crate::measure::Measurable;
use crate::rounding::distribute_by_weight;

/// How a column's width is decided.
///
/// Policies nest: `Max`/`Min` combine the intrinsic widths of their two
/// operands, recursively.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnWidth {
    /// A share of the width left over after every non-weight column.
    Weight(f32),
    /// An exact length.
    Fixed(Dp),
    /// The widest max-intrinsic width among the column's cells.
    Wrap,
    /// The larger of two policies.
    Max(Box<ColumnWidth>, Box<ColumnWidth>),
    /// The smaller of two policies.
    Min(Box<ColumnWidth>, Box<ColumnWidth>),
}

impl ColumnWidth {
    /// `Max(a, b)` without spelling out the boxes.
    pub fn max(a: ColumnWidth, b: ColumnWidth) -> Self {
        Self::Max(Box::new(a), Box::new(b))
    }

    /// `Min(a, b)` without spelling out the boxes.
    pub fn min(a: ColumnWidth, b: ColumnWidth) -> Self {
        Self::Min(Box::new(a), Box::new(b))
    }

    /// Check every weight and fixed width in the policy tree.
    pub fn validate(&self) -> Result<(), LayoutError> {
        match self {
            Self::Weight(weight) if !weight.is_finite() || *weight < 0.0 => {
                Err(LayoutError::InvalidWeight(*weight))
            }
            Self::Fixed(width) if !width.0.is_finite() || width.0 < 0.0 => {
                Err(LayoutError::InvalidFixedWidth(width.0))
            }
            Self::Max(a, b) | Self::Min(a, b) => {
                a.validate()?;
                b.validate()
            }
            Self::Weight(_) | Self::Fixed(_) | Self::Wrap => Ok(()),
        }
    }

    /// Weight of a top-level `Weight` policy.
    pub(crate) fn weight(&self) -> Option<f32> {
        match self {
            Self::Weight(weight) => Some(*weight),
            _ => None,
        }
    }

    /// Width before weighted distribution. `Weight` contributes nothing here.
    pub(crate) fn intrinsic_width<F>(&self, density: Density, wrap_width: &F) -> u32
    where
        F: Fn() -> u32,
    {
        match self {
            Self::Weight(_) => 0,
            Self::Fixed(width) => density.round_to_px(*width),
            Self::Wrap => wrap_width(),
            Self::Max(a, b) => a
                .intrinsic_width(density, wrap_width)
                .max(b.intrinsic_width(density, wrap_width)),
            Self::Min(a, b) => a
                .intrinsic_width(density, wrap_width)
                .min(b.intrinsic_width(density, wrap_width)),
        }
    }
}

/// Width policy and content alignment of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct TableColumn {
    pub width: ColumnWidth,
    pub alignment: HorizontalAlignment,
}

impl TableColumn {
    /// A start-aligned column.
    pub fn new(width: ColumnWidth) -> Self {
        Self {
            width,
            alignment: HorizontalAlignment::Start,
        }
    }

    /// A start-aligned column, rejecting invalid weights or widths.
    pub fn try_new(width: ColumnWidth) -> Result<Self, LayoutError> {
        width.validate()?;
        Ok(Self::new(width))
    }

    /// Set the alignment of cells within the column.
    #[must_use]
    pub fn alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// The column used when the caller supplies none: an equal weight share.
    pub fn default_for(columns_count: usize) -> Self {
        Self::new(ColumnWidth::Weight(1.0 / columns_count.max(1) as f32))
    }
}

/// Resolve every column's pixel width.
///
/// `available_width` is `None` when the incoming width is unbounded, in
/// which case weighted columns get nothing.
pub(crate) fn resolve_column_widths<C: Measurable>(
    policies: &[ColumnWidth],
    cells: &[C],
    available_width: Option<u32>,
    available_height: u32,
    column_spacing: u32,
    density: Density,
) -> Vec<u32> {
    let columns_count = policies.len();

    let mut widths: Vec<u32> = policies
        .iter()
        .enumerate()
        .map(|(col, policy)| {
            let wrap_width = || {
                cells
                    .iter()
                    .skip(col)
                    .step_by(columns_count)
                    .map(|cell| cell.max_intrinsic_width(available_height))
                    .max()
                    .unwrap_or(0)
            };
            policy.intrinsic_width(density, &wrap_width)
        })
        .collect();

    let total_fixed = widths
        .iter()
        .fold(0u32, |acc, &w| acc.saturating_add(w))
        .saturating_add(spacing_total(columns_count, column_spacing));
    let remaining = available_width.map_or(0, |w| w.saturating_sub(total_fixed));

    let weighted: Vec<(usize, f32)> = policies
        .iter()
        .enumerate()
        .filter_map(|(col, policy)| policy.weight().map(|w| (col, w)))
        .collect();

    if !weighted.is_empty() {
        let weights: Vec<f32> = weighted.iter().map(|&(_, w)| w).collect();
        let shares = distribute_by_weight(&weights, remaining);
        for (&(col, _), share) in weighted.iter().zip(shares) {
            widths[col] = share;
        }
    }

    tracing::trace!(
        total_fixed,
        remaining,
        weighted = weighted.len(),
        ?widths,
        "resolved column widths"
    );

    widths
}

/// Total spacing between `count` columns (or rows).
#[inline]
pub(crate) fn spacing_total(count: usize, spacing: u32) -> u32 {
    let gaps = u32::try_from(count.saturating_sub(1)).unwrap_or(u32::MAX);
    gaps.saturating_mul(spacing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::FixedNode;

    fn resolve(policies: &[ColumnWidth], cells: &[FixedNode], width: u32, spacing: u32) -> Vec<u32> {
        resolve_column_widths(policies, cells, Some(width), 100, spacing, Density::ONE)
    }

    #[test]
    fn fixed_plus_weight_takes_the_rest() {
        let policies = [ColumnWidth::Fixed(Dp(50.0)), ColumnWidth::Weight(1.0)];
        assert_eq!(resolve(&policies, &[], 200, 0), vec![50, 150]);
    }

    #[test]
    fn spacing_is_subtracted_before_weights() {
        let policies = [ColumnWidth::Fixed(Dp(50.0)), ColumnWidth::Weight(1.0)];
        assert_eq!(resolve(&policies, &[], 200, 8), vec![50, 142]);
    }

    #[test]
    fn wrap_uses_widest_cell_of_its_column_only() {
        let cells = [
            FixedNode::new(12, 1),
            FixedNode::new(99, 1),
            FixedNode::new(30, 1),
            FixedNode::new(5, 1),
            FixedNode::new(7, 1),
        ];
        let policies = [ColumnWidth::Wrap, ColumnWidth::Weight(1.0)];
        assert_eq!(resolve(&policies, &cells, 100, 0), vec![30, 70]);
    }

    #[test]
    fn max_and_min_recurse() {
        let cells = [FixedNode::new(40, 1)];
        let max = ColumnWidth::max(ColumnWidth::Wrap, ColumnWidth::Fixed(Dp(25.0)));
        let min = ColumnWidth::min(
            ColumnWidth::Wrap,
            ColumnWidth::max(ColumnWidth::Fixed(Dp(10.0)), ColumnWidth::Fixed(Dp(20.0))),
        );
        assert_eq!(resolve(&[max], &cells, 100, 0), vec![40]);
        assert_eq!(resolve(&[min], &cells, 100, 0), vec![20]);
    }

    #[test]
    fn weight_inside_combinator_counts_as_zero() {
        let policy = ColumnWidth::max(ColumnWidth::Weight(1.0), ColumnWidth::Fixed(Dp(15.0)));
        assert_eq!(resolve(&[policy, ColumnWidth::Weight(1.0)], &[], 100, 0), vec![15, 85]);
    }

    #[test]
    fn weights_get_zero_when_fixed_exceeds_available() {
        let policies = [ColumnWidth::Fixed(Dp(300.0)), ColumnWidth::Weight(2.0)];
        assert_eq!(resolve(&policies, &[], 200, 0), vec![300, 0]);
    }

    #[test]
    fn zero_total_weight_does_not_divide_by_zero() {
        let policies = [ColumnWidth::Weight(0.0), ColumnWidth::Weight(0.0)];
        assert_eq!(resolve(&policies, &[], 200, 0), vec![0, 0]);
    }

    #[test]
    fn unbounded_width_gives_weights_nothing() {
        let policies = [ColumnWidth::Fixed(Dp(10.0)), ColumnWidth::Weight(1.0)];
        let widths = resolve_column_widths::<FixedNode>(&policies, &[], None, 100, 0, Density::ONE);
        assert_eq!(widths, vec![10, 0]);
    }

    #[test]
    fn fixed_width_scales_with_density() {
        let policies = [ColumnWidth::Fixed(Dp(20.0)), ColumnWidth::Weight(1.0)];
        let widths =
            resolve_column_widths::<FixedNode>(&policies, &[], Some(100), 0, 0, Density::new(2.0, 1.0));
        assert_eq!(widths, vec![40, 60]);
    }

    #[test]
    fn validate_rejects_bad_values_anywhere_in_tree() {
        assert_eq!(
            ColumnWidth::Weight(-1.0).validate(),
            Err(LayoutError::InvalidWeight(-1.0))
        );
        let nested = ColumnWidth::min(ColumnWidth::Wrap, ColumnWidth::Fixed(Dp(-4.0)));
        assert_eq!(nested.validate(), Err(LayoutError::InvalidFixedWidth(-4.0)));
        assert!(TableColumn::try_new(ColumnWidth::Weight(f32::INFINITY)).is_err());
        assert!(TableColumn::try_new(ColumnWidth::Wrap).is_ok());
    }

    #[test]
    fn default_column_is_equal_weight() {
        let column = TableColumn::default_for(4);
        assert_eq!(column.width, ColumnWidth::Weight(0.25));
        assert_eq!(column.alignment, HorizontalAlignment::Start);
    }
}
