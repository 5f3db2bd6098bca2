#![forbid(unsafe_code)]

//! Measurement constraints passed from a parent to a child.

use crate::geometry::Size;

/// Minimum and maximum extents a child may take, in pixels.
///
/// `u32::MAX` as a maximum means unbounded. Constructors keep
/// `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Constraints {
    pub min_width: u32,
    pub max_width: u32,
    pub min_height: u32,
    pub max_height: u32,
}

impl Default for Constraints {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

impl Constraints {
    /// Sentinel for an unbounded maximum.
    pub const INFINITY: u32 = u32::MAX;

    /// No minimum and no maximum on either axis.
    pub const UNBOUNDED: Self = Self {
        min_width: 0,
        max_width: Self::INFINITY,
        min_height: 0,
        max_height: Self::INFINITY,
    };

    /// Create constraints, raising each maximum to at least its minimum.
    pub const fn new(min_width: u32, max_width: u32, min_height: u32, max_height: u32) -> Self {
        Self {
            min_width,
            max_width: if max_width < min_width {
                min_width
            } else {
                max_width
            },
            min_height,
            max_height: if max_height < min_height {
                min_height
            } else {
                max_height
            },
        }
    }

    /// Exactly `width` x `height`.
    pub const fn fixed(width: u32, height: u32) -> Self {
        Self::new(width, width, height, height)
    }

    /// Anything from zero up to `size`.
    pub const fn loose(size: Size) -> Self {
        Self::new(0, size.width, 0, size.height)
    }

    /// Exactly `width` wide, height `min_height..=max_height`.
    pub const fn fixed_width(width: u32, min_height: u32, max_height: u32) -> Self {
        Self::new(width, width, min_height, max_height)
    }

    /// Whether the width has a finite maximum.
    #[inline]
    pub const fn has_bounded_width(&self) -> bool {
        self.max_width != Self::INFINITY
    }

    /// Whether the height has a finite maximum.
    #[inline]
    pub const fn has_bounded_height(&self) -> bool {
        self.max_height != Self::INFINITY
    }

    /// Clamp a width into `min_width..=max_width`.
    #[inline]
    pub fn constrain_width(&self, width: u32) -> u32 {
        width.clamp(self.min_width, self.max_width)
    }

    /// Clamp a height into `min_height..=max_height`.
    #[inline]
    pub fn constrain_height(&self, height: u32) -> u32 {
        height.clamp(self.min_height, self.max_height)
    }

    /// Clamp a size into these constraints.
    #[inline]
    pub fn constrain(&self, size: Size) -> Size {
        Size::new(
            self.constrain_width(size.width),
            self.constrain_height(size.height),
        )
    }

    /// Whether `size` satisfies these constraints.
    pub fn is_satisfied_by(&self, size: Size) -> bool {
        (self.min_width..=self.max_width).contains(&size.width)
            && (self.min_height..=self.max_height).contains(&size.height)
    }
}
