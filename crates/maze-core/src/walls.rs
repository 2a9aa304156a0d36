//! Per-cell wall bitmask.

use crate::direction::Heading;
use std::fmt;

/// Set of walls around one cell, one bit per absolute heading.
///
/// Bit layout (also the persisted byte format): bit0 North, bit1 East,
/// bit2 South, bit3 West. The upper nibble is always zero.
///
/// Walls only accumulate: the type offers OR-style merges and no way to
/// clear a bit once set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct WallMask(u8);

impl WallMask {
    /// No walls.
    pub const EMPTY: WallMask = WallMask(0);
    /// Every side walled.
    pub const ALL: WallMask = WallMask(0x0F);

    /// Mask with a single wall toward `heading`.
    pub const fn single(heading: Heading) -> Self {
        WallMask(1 << heading.index())
    }

    /// Build a mask from raw bits. The upper nibble is discarded.
    pub const fn from_bits(bits: u8) -> Self {
        WallMask(bits & 0x0F)
    }

    /// Raw bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether a wall is recorded toward `heading`.
    pub const fn has(self, heading: Heading) -> bool {
        self.0 & (1 << heading.index()) != 0
    }

    /// This mask plus a wall toward `heading`.
    #[must_use]
    pub const fn with(self, heading: Heading) -> Self {
        WallMask(self.0 | (1 << heading.index()))
    }

    /// Union of two masks.
    #[must_use]
    pub const fn union(self, other: WallMask) -> Self {
        WallMask(self.0 | other.0)
    }

    /// Whether every wall in `other` is also in `self`.
    pub const fn contains(self, other: WallMask) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether no wall is recorded.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of walls recorded.
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Headings that carry a wall, in North, East, South, West order.
    pub fn headings(self) -> impl Iterator<Item = Heading> {
        Heading::ALL.into_iter().filter(move |h| self.has(*h))
    }
}

impl std::ops::BitOr for WallMask {
    type Output = WallMask;

    fn bitor(self, rhs: WallMask) -> WallMask {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for WallMask {
    fn bitor_assign(&mut self, rhs: WallMask) {
        *self = self.union(rhs);
    }
}

impl fmt::Display for WallMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for h in Heading::ALL {
            if self.has(h) {
                write!(f, "{h}")?;
            } else {
                f.write_str("-")?;
            }
        }
        Ok(())
    }
}
