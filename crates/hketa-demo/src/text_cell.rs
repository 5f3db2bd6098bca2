#![forbid(unsafe_code)]

//! Text as a table cell.

use std::cell::RefCell;

use hketa::{Constraints, Density, Measurable, Measured, TextMeasurer, TextStyle};

/// A piece of text measured through a shared measurer.
pub struct TextCell<'m, M> {
    text: String,
    style: TextStyle,
    density: Density,
    measurer: &'m RefCell<M>,
}

impl<'m, M: TextMeasurer> TextCell<'m, M> {
    pub fn new(
        text: impl Into<String>,
        style: TextStyle,
        density: Density,
        measurer: &'m RefCell<M>,
    ) -> Self {
        Self {
            text: text.into(),
            style,
            density,
            measurer,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl<M: TextMeasurer> Measurable for TextCell<'_, M> {
    fn measure(&self, constraints: Constraints) -> Measured {
        let result =
            self.measurer
                .borrow_mut()
                .measure(&self.text, &self.style, constraints, self.density);
        Measured {
            size: result.size,
            first_baseline: Some(result.first_baseline),
            last_baseline: Some(result.last_baseline),
        }
    }

    fn max_intrinsic_width(&self, _height: u32) -> u32 {
        self.measurer
            .borrow_mut()
            .measure(&self.text, &self.style, Constraints::UNBOUNDED, self.density)
            .size
            .width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hketa::{MonospaceMeasurer, Size, Sp};

    #[test]
    fn reports_text_size_and_baselines() {
        let measurer = RefCell::new(MonospaceMeasurer::new().advance_ratio(1.0));
        let cell = TextCell::new("1A", TextStyle::new(Sp(20.0)), Density::ONE, &measurer);
        let measured = cell.measure(Constraints::new(0, 200, 0, 200));
        assert_eq!(measured.size, Size::new(40, 24));
        assert_eq!(measured.first_baseline, Some(18));
        assert_eq!(cell.max_intrinsic_width(0), 40);
    }
}
