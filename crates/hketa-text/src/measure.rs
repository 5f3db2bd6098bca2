#![forbid(unsafe_code)]

//! Text measurement contract.

use hketa_core::{Constraints, Density, Size, Sp};

/// Style inputs that affect a text measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: Sp,
    /// Lines beyond this are cut and reported as height overflow.
    pub max_lines: usize,
    /// Break lines at word boundaries when they exceed the width.
    pub soft_wrap: bool,
}

impl TextStyle {
    pub fn new(font_size: Sp) -> Self {
        Self {
            font_size,
            max_lines: usize::MAX,
            soft_wrap: true,
        }
    }

    #[must_use]
    pub fn max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines.max(1);
        self
    }

    #[must_use]
    pub fn soft_wrap(mut self, soft_wrap: bool) -> Self {
        self.soft_wrap = soft_wrap;
        self
    }
}

/// Outcome of laying out a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextLayoutResult {
    /// Size of the visible lines, clamped into the constraints.
    pub size: Size,
    /// Number of visible lines.
    pub line_count: usize,
    /// Some visible line is wider than the maximum width.
    pub did_overflow_width: bool,
    /// Lines were cut by `max_lines` or the maximum height.
    pub did_overflow_height: bool,
    pub first_baseline: u32,
    pub last_baseline: u32,
    /// Font size the layout was computed at.
    pub font_size: Sp,
}

impl TextLayoutResult {
    /// Whether this layout counts as not fitting.
    ///
    /// Height overflow always counts. With `prefer_single_line`, width
    /// overflow and wrapping onto a second line count too.
    pub fn overflows(&self, prefer_single_line: bool) -> bool {
        self.did_overflow_height
            || (prefer_single_line && (self.did_overflow_width || self.line_count > 1))
    }
}

/// Measures text for a given style and constraints.
pub trait TextMeasurer {
    fn measure(
        &mut self,
        text: &str,
        style: &TextStyle,
        constraints: Constraints,
        density: Density,
    ) -> TextLayoutResult;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &mut M {
    fn measure(
        &mut self,
        text: &str,
        style: &TextStyle,
        constraints: Constraints,
        density: Density,
    ) -> TextLayoutResult {
        (**self).measure(text, style, constraints, density)
    }
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for Box<M> {
    fn measure(
        &mut self,
        text: &str,
        style: &TextStyle,
        constraints: Constraints,
        density: Density,
    ) -> TextLayoutResult {
        (**self).measure(text, style, constraints, density)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_rules() {
        let fits = TextLayoutResult {
            line_count: 1,
            ..TextLayoutResult::default()
        };
        assert!(!fits.overflows(true));

        let wrapped = TextLayoutResult {
            line_count: 2,
            ..TextLayoutResult::default()
        };
        assert!(!wrapped.overflows(false));
        assert!(wrapped.overflows(true));

        let wide = TextLayoutResult {
            line_count: 1,
            did_overflow_width: true,
            ..TextLayoutResult::default()
        };
        assert!(!wide.overflows(false));
        assert!(wide.overflows(true));

        let cut = TextLayoutResult {
            did_overflow_height: true,
            ..TextLayoutResult::default()
        };
        assert!(cut.overflows(false));
    }

    #[test]
    fn style_builder_keeps_at_least_one_line() {
        let style = TextStyle::new(Sp(12.0)).max_lines(0).soft_wrap(false);
        assert_eq!(style.max_lines, 1);
        assert!(!style.soft_wrap);
    }
}
