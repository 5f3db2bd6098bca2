#![forbid(unsafe_code)]

//! Alignment of a child inside a larger slot.

use hketa_core::LayoutDirection;

/// Horizontal alignment, relative to the reading direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlignment {
    /// Leading edge (left in LTR, right in RTL).
    #[default]
    Start,
    /// Centered.
    Center,
    /// Trailing edge (right in LTR, left in RTL).
    End,
}

impl HorizontalAlignment {
    /// Offset of a child `size` wide from the left edge of a `space` wide slot.
    ///
    /// A child wider than its slot is placed at the left edge.
    pub fn offset(self, size: u32, space: u32, direction: LayoutDirection) -> u32 {
        let free = space.saturating_sub(size);
        match (self, direction) {
            (Self::Start, LayoutDirection::Ltr) | (Self::End, LayoutDirection::Rtl) => 0,
            (Self::End, LayoutDirection::Ltr) | (Self::Start, LayoutDirection::Rtl) => free,
            (Self::Center, _) => centered(free),
        }
    }
}

/// Vertical alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlignment {
    Top,
    #[default]
    Center,
    Bottom,
}

impl VerticalAlignment {
    /// Offset of a child `size` tall from the top of a `space` tall slot.
    pub fn offset(self, size: u32, space: u32) -> u32 {
        let free = space.saturating_sub(size);
        match self {
            Self::Top => 0,
            Self::Center => centered(free),
            Self::Bottom => free,
        }
    }
}

// Half the free space, rounding half up.
#[inline]
fn centered(free: u32) -> u32 {
    free / 2 + free % 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_and_end_mirror_in_rtl() {
        assert_eq!(
            HorizontalAlignment::Start.offset(10, 50, LayoutDirection::Ltr),
            0
        );
        assert_eq!(
            HorizontalAlignment::Start.offset(10, 50, LayoutDirection::Rtl),
            40
        );
        assert_eq!(
            HorizontalAlignment::End.offset(10, 50, LayoutDirection::Ltr),
            40
        );
        assert_eq!(
            HorizontalAlignment::End.offset(10, 50, LayoutDirection::Rtl),
            0
        );
    }

    #[test]
    fn center_rounds_half_up() {
        assert_eq!(
            HorizontalAlignment::Center.offset(10, 13, LayoutDirection::Ltr),
            2
        );
        assert_eq!(VerticalAlignment::Center.offset(4, 10), 3);
        assert_eq!(VerticalAlignment::Center.offset(4, 9), 3);
    }

    #[test]
    fn oversized_child_sits_at_origin() {
        assert_eq!(
            HorizontalAlignment::End.offset(80, 50, LayoutDirection::Ltr),
            0
        );
        assert_eq!(VerticalAlignment::Bottom.offset(12, 3), 0);
    }

    #[test]
    fn vertical_top_and_bottom() {
        assert_eq!(VerticalAlignment::Top.offset(2, 10), 0);
        assert_eq!(VerticalAlignment::Bottom.offset(2, 10), 8);
    }
}
