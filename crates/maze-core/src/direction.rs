//! Absolute headings, vehicle-relative directions, and the rotation
//! between them.
//!
//! Both enums use the same modulo-4 encoding: adding one is a 90°
//! clockwise step. [`rotate`] and [`relative_of`] are the only places
//! where the two frames meet.

use std::fmt;

/// An absolute compass heading on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Heading {
    /// Toward increasing `y`.
    #[default]
    North = 0,
    /// Toward increasing `x`.
    East = 1,
    /// Toward decreasing `y`.
    South = 2,
    /// Toward decreasing `x`.
    West = 3,
}

impl Heading {
    /// All headings in index order.
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    /// Heading for an index, taken modulo 4.
    pub const fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Heading::North,
            1 => Heading::East,
            2 => Heading::South,
            _ => Heading::West,
        }
    }

    /// Index in `0..4`, clockwise from North.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Heading after `quarter_turns` clockwise 90° steps (negative turns
    /// counter-clockwise).
    pub const fn turned(self, quarter_turns: i8) -> Self {
        Self::from_index((self.index() as i16 + quarter_turns as i16).rem_euclid(4) as u8)
    }

    /// Heading after one 90° clockwise turn.
    pub const fn clockwise(self) -> Self {
        self.turned(1)
    }

    /// Heading after one 90° counter-clockwise turn.
    pub const fn counter_clockwise(self) -> Self {
        self.turned(-1)
    }

    /// The reverse heading.
    pub const fn opposite(self) -> Self {
        self.turned(2)
    }

    /// Unit step `(dx, dy)` taken when moving one cell along this heading.
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Heading::North => (0, 1),
            Heading::East => (1, 0),
            Heading::South => (0, -1),
            Heading::West => (-1, 0),
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Heading::North => "N",
            Heading::East => "E",
            Heading::South => "S",
            Heading::West => "W",
        };
        f.write_str(name)
    }
}

/// A direction relative to the vehicle's current heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Relative {
    /// Straight ahead.
    Front = 0,
    /// 90° clockwise from ahead.
    Right = 1,
    /// Directly behind.
    Back = 2,
    /// 90° counter-clockwise from ahead.
    Left = 3,
}

impl Relative {
    /// Clockwise quarter-turn offset from the heading.
    pub const fn offset(self) -> u8 {
        self as u8
    }

    /// Relative direction for an offset, taken modulo 4.
    pub const fn from_offset(offset: u8) -> Self {
        match offset % 4 {
            0 => Relative::Front,
            1 => Relative::Right,
            2 => Relative::Back,
            _ => Relative::Left,
        }
    }
}

/// Rotate a vehicle-relative direction into an absolute heading.
///
/// ```
/// use maze_core::{rotate, Heading, Relative};
///
/// assert_eq!(rotate(Relative::Right, Heading::North), Heading::East);
/// assert_eq!(rotate(Relative::Left, Heading::North), Heading::West);
/// assert_eq!(rotate(Relative::Back, Heading::West), Heading::East);
/// ```
pub const fn rotate(relative: Relative, heading: Heading) -> Heading {
    Heading::from_index(heading.index() + relative.offset())
}

/// Inverse of [`rotate`]: which relative direction points at `absolute`
/// when the vehicle faces `heading`.
pub const fn relative_of(heading: Heading, absolute: Heading) -> Relative {
    Relative::from_offset(absolute.index() + 4 - heading.index())
}
