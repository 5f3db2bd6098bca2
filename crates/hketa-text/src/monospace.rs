#![forbid(unsafe_code)]

//! Reference [`TextMeasurer`] for fixed-advance fonts.
//!
//! Every display cell advances by `font_px * advance_ratio`; lines are
//! `ceil(font_px * line_height_ratio)` pixels tall. Lines are broken with
//! [`WrapMode::WordChar`] when soft wrap is on.

use hketa_core::{Constraints, Density, Size};
use smallvec::SmallVec;

use crate::measure::{TextLayoutResult, TextMeasurer, TextStyle};
use crate::measure_cache::{CacheStats, MeasureCache};
use crate::wrap::{WrapMode, wrap_text};

// Absorbs float error at exact pixel boundaries.
const FIT_EPSILON: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Metrics {
    advance_ratio: f32,
    line_height_ratio: f32,
    ascent_ratio: f32,
}

impl Metrics {
    fn layout(
        self,
        text: &str,
        style: &TextStyle,
        constraints: Constraints,
        density: Density,
    ) -> TextLayoutResult {
        let font_px = density.sp_to_px(style.font_size).max(0.0);
        let advance = font_px * self.advance_ratio;
        let line_height = to_px((font_px * self.line_height_ratio - FIT_EPSILON).ceil()).max(1);
        let baseline = to_px(
            ((line_height as f32 - font_px) / 2.0 + font_px * self.ascent_ratio).round(),
        )
        .min(line_height);

        let max_cells = if constraints.has_bounded_width() && advance > 0.0 {
            let cells = ((constraints.max_width as f32 + FIT_EPSILON) / advance).floor();
            if cells.is_finite() { cells as usize } else { usize::MAX }
        } else {
            usize::MAX
        };
        let mode = if style.soft_wrap {
            WrapMode::WordChar
        } else {
            WrapMode::None
        };
        let lines = wrap_text(text, max_cells, mode);

        let line_count = lines.len().min(style.max_lines.max(1));
        let widths: SmallVec<[usize; 8]> = lines[..line_count].iter().map(|l| l.width).collect();
        let widest = widths.iter().copied().max().unwrap_or(0);

        let natural_width = to_px((widest as f32 * advance - FIT_EPSILON).ceil());
        let natural_height = line_height.saturating_mul(u32::try_from(line_count).unwrap_or(u32::MAX));
        let did_overflow_width = max_cells != usize::MAX && widest > max_cells;
        let did_overflow_height = lines.len() > line_count
            || (constraints.has_bounded_height() && natural_height > constraints.max_height);

        tracing::trace!(
            font_px,
            lines = lines.len(),
            visible = line_count,
            did_overflow_width,
            did_overflow_height,
            "measured text"
        );

        TextLayoutResult {
            size: constraints.constrain(Size::new(natural_width, natural_height)),
            line_count,
            did_overflow_width,
            did_overflow_height,
            first_baseline: baseline,
            last_baseline: line_height
                .saturating_mul(u32::try_from(line_count - 1).unwrap_or(u32::MAX))
                .saturating_add(baseline),
            font_size: style.font_size,
        }
    }
}

fn to_px(value: f32) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.min(u32::MAX as f32) as u32
    } else {
        0
    }
}

/// Fixed-advance measurer with an LRU cache of results.
///
/// # Example
///
/// ```
/// use hketa_core::{Constraints, Density, Sp};
/// use hketa_text::{MonospaceMeasurer, TextMeasurer, TextStyle};
///
/// let mut measurer = MonospaceMeasurer::new().advance_ratio(1.0);
/// let style = TextStyle::new(Sp(10.0));
/// let result = measurer.measure("Hello", &style, Constraints::new(0, 100, 0, 100), Density::ONE);
/// assert_eq!(result.size.width, 50);
/// assert_eq!(result.line_count, 1);
/// ```
#[derive(Debug)]
pub struct MonospaceMeasurer {
    metrics: Metrics,
    cache: MeasureCache,
}

impl MonospaceMeasurer {
    pub const DEFAULT_ADVANCE_RATIO: f32 = 0.6;
    pub const DEFAULT_LINE_HEIGHT_RATIO: f32 = 1.2;
    pub const DEFAULT_ASCENT_RATIO: f32 = 0.8;

    pub fn new() -> Self {
        Self {
            metrics: Metrics {
                advance_ratio: Self::DEFAULT_ADVANCE_RATIO,
                line_height_ratio: Self::DEFAULT_LINE_HEIGHT_RATIO,
                ascent_ratio: Self::DEFAULT_ASCENT_RATIO,
            },
            cache: MeasureCache::default(),
        }
    }

    /// Cell advance as a fraction of the font size in pixels.
    #[must_use]
    pub fn advance_ratio(mut self, ratio: f32) -> Self {
        self.metrics.advance_ratio = sanitize_ratio(ratio, Self::DEFAULT_ADVANCE_RATIO);
        self.cache.clear();
        self
    }

    /// Line height as a fraction of the font size in pixels.
    #[must_use]
    pub fn line_height_ratio(mut self, ratio: f32) -> Self {
        self.metrics.line_height_ratio = sanitize_ratio(ratio, Self::DEFAULT_LINE_HEIGHT_RATIO);
        self.cache.clear();
        self
    }

    /// Replace the cache with one of `capacity` entries.
    #[must_use]
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache = MeasureCache::new(capacity);
        self
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(
        &mut self,
        text: &str,
        style: &TextStyle,
        constraints: Constraints,
        density: Density,
    ) -> TextLayoutResult {
        let metrics = self.metrics;
        self.cache
            .get_or_compute(text, style, constraints, density, || {
                metrics.layout(text, style, constraints, density)
            })
    }
}

fn sanitize_ratio(ratio: f32, fallback: f32) -> f32 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hketa_core::Sp;

    fn unit_measurer() -> MonospaceMeasurer {
        MonospaceMeasurer::new().advance_ratio(1.0)
    }

    fn width(max: u32) -> Constraints {
        Constraints::new(0, max, 0, Constraints::INFINITY)
    }

    #[test]
    fn single_line_size_and_baseline() {
        let mut m = unit_measurer();
        let r = m.measure("Hello", &TextStyle::new(Sp(20.0)), width(380), Density::ONE);
        assert_eq!(r.size, Size::new(100, 24));
        assert_eq!(r.line_count, 1);
        // (24 - 20) / 2 + 16
        assert_eq!(r.first_baseline, 18);
        assert_eq!(r.last_baseline, 18);
        assert!(!r.did_overflow_width && !r.did_overflow_height);
    }

    #[test]
    fn long_word_fits_at_11_and_wraps_at_12() {
        let mut m = unit_measurer();
        let text = "Supercalifragilisticexpialidocious";
        let at_11 = m.measure(text, &TextStyle::new(Sp(11.0)), width(380), Density::ONE);
        assert_eq!(at_11.line_count, 1);
        assert_eq!(at_11.size.width, 374);

        let at_12 = m.measure(text, &TextStyle::new(Sp(12.0)), width(380), Density::ONE);
        assert_eq!(at_12.line_count, 2);
        assert!(!at_12.did_overflow_height);

        let single = TextStyle::new(Sp(12.0)).max_lines(1);
        let cut = m.measure(text, &single, width(380), Density::ONE);
        assert_eq!(cut.line_count, 1);
        assert!(cut.did_overflow_height);
    }

    #[test]
    fn no_soft_wrap_overflows_width() {
        let mut m = unit_measurer();
        let style = TextStyle::new(Sp(10.0)).soft_wrap(false);
        let r = m.measure("Lei Yue Mun", &style, width(50), Density::ONE);
        assert_eq!(r.line_count, 1);
        assert!(r.did_overflow_width);
        assert_eq!(r.size.width, 50);
    }

    #[test]
    fn height_limit_overflows() {
        let mut m = unit_measurer();
        let style = TextStyle::new(Sp(10.0));
        let r = m.measure("ab cd ef", &style, Constraints::new(0, 20, 0, 30), Density::ONE);
        assert_eq!(r.line_count, 3);
        assert!(r.did_overflow_height);
        assert_eq!(r.size.height, 30);
    }

    #[test]
    fn density_and_font_scale_grow_text() {
        let mut m = unit_measurer();
        let style = TextStyle::new(Sp(10.0));
        let r = m.measure("Hi", &style, Constraints::UNBOUNDED, Density::new(2.0, 1.5));
        assert_eq!(r.size.width, 60);
    }

    #[test]
    fn default_advance_is_narrower() {
        let mut m = MonospaceMeasurer::new();
        let r = m.measure("Hello", &TextStyle::new(Sp(10.0)), Constraints::UNBOUNDED, Density::ONE);
        assert_eq!(r.size.width, 30);
    }

    #[test]
    fn repeated_measurements_hit_cache() {
        let mut m = unit_measurer();
        let style = TextStyle::new(Sp(12.0));
        for _ in 0..3 {
            m.measure("Central", &style, width(200), Density::ONE);
        }
        let stats = m.cache_stats();
        assert_eq!((stats.hits, stats.misses), (2, 1));
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        let mut m = unit_measurer();
        let r = m.measure("", &TextStyle::new(Sp(10.0)), width(100), Density::ONE);
        assert_eq!(r.line_count, 1);
        assert_eq!(r.size, Size::new(0, 12));
    }
}
