//! Whole-grid wall invariant checks.
//!
//! Used after loading a persisted map and by tests that drive arbitrary
//! observation sequences through the map.

use crate::grid::GridMap;
use maze_core::{Cell, Heading};
use thiserror::Error;

/// The first wall invariant violation found in a grid.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ReciprocityViolation {
    /// `cell` records a wall toward `heading` but `neighbour` lacks the
    /// reciprocal bit (or the other way round).
    #[error("wall {heading} of {cell} not mirrored by {neighbour}")]
    Asymmetric {
        /// Cell whose wall is not mirrored.
        cell: Cell,
        /// Side of `cell` carrying the wall.
        heading: Heading,
        /// Adjacent cell missing the reciprocal bit.
        neighbour: Cell,
    },
    /// A border-facing bit is missing.
    #[error("border wall {heading} of {cell} is missing")]
    MissingBoundary {
        /// Border cell.
        cell: Cell,
        /// Border-facing side.
        heading: Heading,
    },
}

/// Verify the wall invariants of `grid`.
///
/// For every internal pair of adjacent cells the wall toward the
/// neighbour is set iff the neighbour's reciprocal bit is set, and every
/// border-facing bit is set.
///
/// ```
/// use maze_core::{Cell, Heading, WallMask};
/// use maze_grid::{check_reciprocity, GridMap};
///
/// let mut grid = GridMap::new(3).unwrap();
/// grid.add_wall(Cell::new(1, 1), Heading::North);
/// assert!(check_reciprocity(&grid).is_ok());
///
/// grid.set_walls(Cell::new(0, 0), WallMask::single(Heading::East));
/// assert!(check_reciprocity(&grid).is_err());
/// ```
pub fn check_reciprocity(grid: &GridMap) -> Result<(), ReciprocityViolation> {
    for cell in grid.cells() {
        let walls = grid.walls_of(cell);
        for heading in Heading::ALL {
            match grid.neighbour(cell, heading) {
                None => {
                    if !walls.has(heading) {
                        return Err(ReciprocityViolation::MissingBoundary { cell, heading });
                    }
                }
                Some(neighbour) => {
                    let mirrored = grid.walls_of(neighbour).has(heading.opposite());
                    if walls.has(heading) != mirrored {
                        return Err(ReciprocityViolation::Asymmetric {
                            cell,
                            heading,
                            neighbour,
                        });
                    }
                }
            }
        }
    }
    Ok(())
}
