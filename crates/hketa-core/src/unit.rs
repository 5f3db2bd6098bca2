#![forbid(unsafe_code)]

//! Density-independent units.
//!
//! Layout lengths are declared in [`Dp`] and font sizes in [`Sp`]; both are
//! converted to pixels through a [`Density`], which carries the display's
//! pixel density and the user's font scale.

use std::fmt;
use std::ops::{Add, Mul, Sub};

/// A density-independent length.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Dp(pub f32);

impl Dp {
    /// Zero length.
    pub const ZERO: Self = Self(0.0);

    /// Raw value in dp.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }
}

impl fmt::Display for Dp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}dp", self.0)
    }
}

/// A scale-independent font size.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Sp(pub f32);

impl Sp {
    /// Raw value in sp.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// The smaller of two sizes.
    #[inline]
    #[must_use]
    pub fn min(self, other: Sp) -> Sp {
        Sp(self.0.min(other.0))
    }

    /// Bit pattern, for hashing and exact comparisons.
    #[inline]
    pub const fn to_bits(self) -> u32 {
        self.0.to_bits()
    }
}

impl Add for Sp {
    type Output = Sp;

    fn add(self, rhs: Sp) -> Sp {
        Sp(self.0 + rhs.0)
    }
}

impl Sub for Sp {
    type Output = Sp;

    fn sub(self, rhs: Sp) -> Sp {
        Sp(self.0 - rhs.0)
    }
}

impl Mul<f32> for Sp {
    type Output = Sp;

    fn mul(self, rhs: f32) -> Sp {
        Sp(self.0 * rhs)
    }
}

impl fmt::Display for Sp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}sp", self.0)
    }
}

/// Pixel density and font scale of the current display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Density {
    /// Pixels per dp.
    pub density: f32,
    /// Multiplier applied to sp on top of `density`.
    pub font_scale: f32,
}

impl Default for Density {
    fn default() -> Self {
        Self::ONE
    }
}

impl Density {
    /// One pixel per dp, no font scaling.
    pub const ONE: Self = Self {
        density: 1.0,
        font_scale: 1.0,
    };

    /// Create a density. Non-finite or non-positive inputs fall back to 1.0.
    pub fn new(density: f32, font_scale: f32) -> Self {
        Self {
            density: sanitize_scale(density),
            font_scale: sanitize_scale(font_scale),
        }
    }

    /// Convert a length to whole pixels, rounding to nearest.
    ///
    /// Negative and non-finite lengths clamp to zero.
    pub fn round_to_px(&self, dp: Dp) -> u32 {
        let px = (dp.0 * self.density).round();
        if px.is_finite() && px > 0.0 {
            px.min(u32::MAX as f32) as u32
        } else {
            0
        }
    }

    /// Convert a font size to fractional pixels.
    #[inline]
    pub fn sp_to_px(&self, sp: Sp) -> f32 {
        sp.0 * self.font_scale * self.density
    }

    /// Bit patterns of both factors, for change detection.
    #[inline]
    pub const fn to_bits(&self) -> (u32, u32) {
        (self.density.to_bits(), self.font_scale.to_bits())
    }
}

fn sanitize_scale(value: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        1.0
    }
}
