#![forbid(unsafe_code)]

//! Integer rounding with exact sum conservation.

use std::cmp::Ordering;

/// Round real-valued targets to whole pixels whose sum is exactly `total`.
///
/// # Algorithm: Largest Remainder
///
/// 1. **Floor phase**: `x_i = floor(r_i)`.
/// 2. **Deficit**: `D = total - Σ x_i` pixels are still unassigned.
/// 3. **Priority**: rank by fractional remainder (descending), ties broken by
///    smaller index.
/// 4. **Distribute**: one extra pixel to each of the top `D` entries, cycling
///    if `D` exceeds the entry count.
///
/// Each result differs from its target by less than one pixel when the
/// targets already sum to `total`. If the floors overshoot `total` (only
/// possible with inconsistent targets) the largest entries give back one
/// pixel at a time.
///
/// # Example
///
/// ```
/// use hketa_layout::round_largest_remainder;
///
/// let result = round_largest_remainder(&[10.4, 20.6, 9.0], 40);
/// assert_eq!(result, vec![10, 21, 9]);
/// ```
pub fn round_largest_remainder(targets: &[f64], total: u32) -> Vec<u32> {
    if targets.is_empty() {
        return Vec::new();
    }

    let mut result: Vec<u32> = targets
        .iter()
        .map(|&r| {
            if r.is_finite() && r > 0.0 {
                r.floor().min(f64::from(u32::MAX)) as u32
            } else {
                0
            }
        })
        .collect();

    let floor_sum: u64 = result.iter().map(|&x| u64::from(x)).sum();
    let total_wide = u64::from(total);

    if floor_sum > total_wide {
        give_back_overflow(&mut result, floor_sum - total_wide);
        return result;
    }

    let deficit = total_wide - floor_sum;
    if deficit == 0 {
        return result;
    }

    let mut priority: Vec<(usize, f64)> = targets
        .iter()
        .zip(&result)
        .enumerate()
        .map(|(i, (&r, &floor))| {
            let remainder = if r.is_finite() { r - f64::from(floor) } else { 0.0 };
            (i, remainder)
        })
        .collect();

    priority.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    let n = priority.len() as u64;
    let rounds = deficit / n;
    let extra = (deficit % n) as usize;
    for (rank, &(i, _)) in priority.iter().enumerate() {
        let bonus = rounds + u64::from(rank < extra);
        result[i] = result[i].saturating_add(u32::try_from(bonus).unwrap_or(u32::MAX));
    }

    result
}

/// Split `total` pixels among entries proportionally to `weights`.
///
/// Negative and non-finite weights count as zero. If no weight is positive
/// every entry gets zero.
pub fn distribute_by_weight(weights: &[f32], total: u32) -> Vec<u32> {
    let sane: Vec<f64> = weights
        .iter()
        .map(|&w| if w.is_finite() && w > 0.0 { f64::from(w) } else { 0.0 })
        .collect();
    let total_weight: f64 = sane.iter().sum();

    if total_weight <= 0.0 || !total_weight.is_finite() {
        return vec![0; weights.len()];
    }

    let targets: Vec<f64> = sane
        .iter()
        .map(|w| w / total_weight * f64::from(total))
        .collect();
    round_largest_remainder(&targets, total)
}

/// Remove `excess` pixels, one at a time from the current largest entry.
fn give_back_overflow(result: &mut [u32], mut excess: u64) {
    while excess > 0 {
        let Some((idx, _)) = result
            .iter()
            .enumerate()
            .filter(|item| *item.1 > 0)
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(&a.0)))
        else {
            break;
        };
        result[idx] -= 1;
        excess -= 1;
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn weighted_sum_is_exact(
            weights in prop::collection::vec(0.01f32..10.0, 1..12),
            total in 0u32..5000,
        ) {
            let sizes = distribute_by_weight(&weights, total);
            prop_assert_eq!(sizes.iter().sum::<u32>(), total);
        }

        #[test]
        fn rounding_stays_within_one_pixel(
            weights in prop::collection::vec(0.01f64..10.0, 1..12),
            total in 0u32..5000,
        ) {
            let sum: f64 = weights.iter().sum();
            let targets: Vec<f64> = weights.iter().map(|w| w / sum * f64::from(total)).collect();
            let sizes = round_largest_remainder(&targets, total);
            for (size, target) in sizes.iter().zip(&targets) {
                prop_assert!((f64::from(*size) - target).abs() < 1.0 + 1e-6);
            }
        }
    }
}
