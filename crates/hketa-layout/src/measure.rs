#![forbid(unsafe_code)]

//! Two-phase measurement contract.
//!
//! A parent measures each child against [`Constraints`] and receives a
//! [`Measured`] (size plus optional baselines). Placement is the parent's
//! job: it records where each measured child goes, the child never sees
//! its own position.

use std::rc::Rc;
use std::sync::Arc;

use hketa_core::{Constraints, Density, DisplayConfig, LayoutDirection, Size};

/// A horizontal line a child may report for cross-sibling alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlignmentLine {
    /// Baseline of the first line of text.
    #[default]
    FirstBaseline,
    /// Baseline of the last line of text.
    LastBaseline,
}

/// Result of measuring a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Measured {
    /// Measured size.
    pub size: Size,
    /// Distance from the top edge to the first baseline, if the child has text.
    pub first_baseline: Option<u32>,
    /// Distance from the top edge to the last baseline, if the child has text.
    pub last_baseline: Option<u32>,
}

impl Measured {
    /// A measurement without baselines.
    pub const fn new(size: Size) -> Self {
        Self {
            size,
            first_baseline: None,
            last_baseline: None,
        }
    }

    /// Set both baselines to the same offset.
    #[must_use]
    pub const fn with_baseline(mut self, baseline: u32) -> Self {
        self.first_baseline = Some(baseline);
        self.last_baseline = Some(baseline);
        self
    }

    /// Offset of the requested alignment line, if reported.
    #[inline]
    pub const fn baseline(&self, line: AlignmentLine) -> Option<u32> {
        match line {
            AlignmentLine::FirstBaseline => self.first_baseline,
            AlignmentLine::LastBaseline => self.last_baseline,
        }
    }

    /// Offset of the requested alignment line, synthesized from the bottom
    /// edge when the child does not report one.
    #[inline]
    pub fn baseline_or_bottom(&self, line: AlignmentLine) -> u32 {
        self.baseline(line).unwrap_or(self.size.height)
    }
}

/// Something that can be measured by a layout.
pub trait Measurable {
    /// Measure under the given constraints.
    ///
    /// Implementations should return a size that satisfies `constraints`;
    /// layouts clamp the reported size into the constraints regardless.
    fn measure(&self, constraints: Constraints) -> Measured;

    /// The width this child would take with unlimited horizontal space,
    /// given the available `height`.
    fn max_intrinsic_width(&self, height: u32) -> u32;
}

impl<T: Measurable + ?Sized> Measurable for &T {
    fn measure(&self, constraints: Constraints) -> Measured {
        (**self).measure(constraints)
    }

    fn max_intrinsic_width(&self, height: u32) -> u32 {
        (**self).max_intrinsic_width(height)
    }
}

impl<T: Measurable + ?Sized> Measurable for Box<T> {
    fn measure(&self, constraints: Constraints) -> Measured {
        (**self).measure(constraints)
    }

    fn max_intrinsic_width(&self, height: u32) -> u32 {
        (**self).max_intrinsic_width(height)
    }
}

impl<T: Measurable + ?Sized> Measurable for Rc<T> {
    fn measure(&self, constraints: Constraints) -> Measured {
        (**self).measure(constraints)
    }

    fn max_intrinsic_width(&self, height: u32) -> u32 {
        (**self).max_intrinsic_width(height)
    }
}

impl<T: Measurable + ?Sized> Measurable for Arc<T> {
    fn measure(&self, constraints: Constraints) -> Measured {
        (**self).measure(constraints)
    }

    fn max_intrinsic_width(&self, height: u32) -> u32 {
        (**self).max_intrinsic_width(height)
    }
}

/// A child with a preferred size and optional baseline.
///
/// Shrinks to fit its constraints; grows to meet their minimums. Useful for
/// dividers, icons, row backgrounds, and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedNode {
    pub width: u32,
    pub height: u32,
    pub baseline: Option<u32>,
}

impl FixedNode {
    /// A node without a baseline.
    pub const fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            baseline: None,
        }
    }

    /// Report `baseline` as both first and last baseline.
    #[must_use]
    pub const fn with_baseline(mut self, baseline: u32) -> Self {
        self.baseline = Some(baseline);
        self
    }
}

impl Measurable for FixedNode {
    fn measure(&self, constraints: Constraints) -> Measured {
        let measured = Measured::new(constraints.constrain(Size::new(self.width, self.height)));
        match self.baseline {
            Some(baseline) => measured.with_baseline(baseline),
            None => measured,
        }
    }

    fn max_intrinsic_width(&self, _height: u32) -> u32 {
        self.width
    }
}

/// Ambient values a layout pass reads besides its constraints.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutContext {
    /// Converts `Dp` lengths to pixels.
    pub density: Density,
    /// Mirrors start/end alignment.
    pub direction: LayoutDirection,
}

impl LayoutContext {
    pub const fn new(density: Density, direction: LayoutDirection) -> Self {
        Self { density, direction }
    }
}

impl From<&DisplayConfig> for LayoutContext {
    fn from(config: &DisplayConfig) -> Self {
        Self::new(config.density, config.layout_direction)
    }
}
