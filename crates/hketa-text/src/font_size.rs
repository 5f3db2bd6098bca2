#![forbid(unsafe_code)]

//! Font size bounds for auto-resizing text.

use hketa_core::Sp;

use crate::error::TextError;

/// Fraction of a step under which a size counts as the floor.
const GRID_TOLERANCE: f32 = 1.0e-3;

/// Inclusive bounds and shrink step for an auto-resize search.
///
/// The search starts at `max` and moves down by `step` until the text fits
/// or `min` is reached. `min` is a floor, not a guaranteed fit.
///
/// # Example
///
/// ```
/// use hketa_core::Sp;
/// use hketa_text::FontSizeRange;
///
/// let range = FontSizeRange::new(Sp(10.0), Sp(20.0), Sp(1.0)).unwrap();
/// assert_eq!(range.steps(), 10);
///
/// assert!(FontSizeRange::new(Sp(20.0), Sp(20.0), Sp(1.0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizeRange {
    min: Sp,
    max: Sp,
    step: Sp,
}

impl FontSizeRange {
    /// Floor used by [`FontSizeRange::up_to`].
    pub const DEFAULT_MIN: Sp = Sp(1.0);
    /// Step used by [`FontSizeRange::up_to`] and [`FontSizeRange::between`].
    pub const DEFAULT_STEP: Sp = Sp(1.0);

    /// Create a range, rejecting `min >= max`, non-finite values, and a step
    /// that is not positive or too small to move `min` or `max` in f32.
    pub fn new(min: Sp, max: Sp, step: Sp) -> Result<Self, TextError> {
        if !min.0.is_finite() || !max.0.is_finite() || min.0 >= max.0 {
            return Err(TextError::InvalidFontSizeRange {
                min: min.0,
                max: max.0,
            });
        }
        if !step.0.is_finite()
            || step.0 <= 0.0
            || max.0 - step.0 == max.0
            || min.0 + step.0 == min.0
        {
            return Err(TextError::InvalidStep(step.0));
        }
        Ok(Self { min, max, step })
    }

    /// `DEFAULT_MIN..=max` with the default step.
    pub fn up_to(max: Sp) -> Result<Self, TextError> {
        Self::new(Self::DEFAULT_MIN, max, Self::DEFAULT_STEP)
    }

    /// `min..=max` with the default step.
    pub fn between(min: Sp, max: Sp) -> Result<Self, TextError> {
        Self::new(min, max, Self::DEFAULT_STEP)
    }

    #[inline]
    pub fn min(&self) -> Sp {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Sp {
        self.max
    }

    #[inline]
    pub fn step(&self) -> Sp {
        self.step
    }

    /// The size one step below `size` on the `max - k * step` grid, or
    /// `None` once that step reaches `min`.
    ///
    /// Sizes are recomputed from `max` rather than by repeated subtraction,
    /// so fractional steps land on the floor in exactly [`steps`] moves.
    ///
    /// [`steps`]: FontSizeRange::steps
    pub fn step_below(&self, size: Sp) -> Option<Sp> {
        let taken = ((self.max.0 - size.0.min(self.max.0)) / self.step.0).round();
        let next = self.max.0 - (taken + 1.0) * self.step.0;
        if next <= self.min.0 + self.step.0 * GRID_TOLERANCE {
            None
        } else {
            Some(Sp(next))
        }
    }

    /// Number of shrink steps from `max` down to `min`, rounded up.
    pub fn steps(&self) -> usize {
        let steps = ((self.max.0 - self.min.0) / self.step.0).ceil();
        if steps.is_finite() && steps > 0.0 {
            steps.min(usize::MAX as f32) as usize
        } else {
            0
        }
    }
}
