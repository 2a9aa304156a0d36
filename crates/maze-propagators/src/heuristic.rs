//! Wall-blind Manhattan distance propagator.

use crate::propagator::{check_target, DistancePropagator, PropagationStats};
use maze_core::{Cell, Distance, PropagatorError};
use maze_grid::GridMap;

/// Fills every cell with `|x - tx| + |y - ty|`, ignoring walls.
///
/// Seeds the distance field before any real propagation, so the first
/// exploration decision has something to descend. On a grid with no
/// internal walls it agrees with [`FloodFill`](crate::FloodFill).
#[derive(Clone, Copy, Debug, Default)]
pub struct ManhattanHeuristic;

impl DistancePropagator for ManhattanHeuristic {
    fn name(&self) -> &str {
        "ManhattanHeuristic"
    }

    fn propagate(
        &self,
        grid: &mut GridMap,
        target: Cell,
    ) -> Result<PropagationStats, PropagatorError> {
        check_target(grid, target)?;
        for index in 0..grid.cell_count() {
            let cell = grid.cell_at(index);
            // At most 2 * 254 for the largest grid, well inside Distance.
            grid.distances_mut()[index] = cell.manhattan(target) as Distance;
        }
        Ok(PropagationStats {
            passes: 1,
            reachable: grid.cell_count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::Heading;

    #[test]
    fn corner_target() {
        let mut g = GridMap::new(10).unwrap();
        ManhattanHeuristic.propagate(&mut g, Cell::new(9, 9)).unwrap();
        assert_eq!(g.distance_of(Cell::new(0, 0)), 18);
        assert_eq!(g.distance_of(Cell::new(9, 0)), 9);
        assert_eq!(g.distance_of(Cell::new(9, 9)), 0);
    }

    #[test]
    fn walls_are_ignored() {
        let mut g = GridMap::new(3).unwrap();
        g.add_wall(Cell::new(0, 0), Heading::North);
        g.add_wall(Cell::new(0, 0), Heading::East);
        ManhattanHeuristic.propagate(&mut g, Cell::new(2, 2)).unwrap();
        assert_eq!(g.distance_of(Cell::new(0, 0)), 4);
    }

    #[test]
    fn rejects_off_grid_target() {
        let mut g = GridMap::new(3).unwrap();
        assert!(ManhattanHeuristic.propagate(&mut g, Cell::new(0, 3)).is_err());
    }
}
