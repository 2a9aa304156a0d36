//! Cell identity and the propagated distance type.

use std::fmt;

/// Number of moves between a cell and the current propagation target.
pub type Distance = u16;

/// Sentinel distance meaning "not reached from the target".
///
/// Grid sides are bounded so that every real distance stays strictly
/// below this value.
pub const MAX_DISTANCE: Distance = Distance::MAX;

/// A grid cell, identified by integer coordinates.
///
/// The origin is the bottom-left corner: `x` grows toward the East and
/// `y` grows toward the North. Cells are plain values; the grid that
/// owns them decides whether a coordinate is in bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// Column, counted from the West edge.
    pub x: u32,
    /// Row, counted from the South edge.
    pub y: u32,
}

impl Cell {
    /// Create a cell from its coordinates.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Manhattan (L1) distance between two cells.
    ///
    /// This is the graph distance on an open 4-connected grid, used as the
    /// startup heuristic before any wall is known.
    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(u32, u32)> for Cell {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}
