//! Flood-fill distance propagator.
//!
//! Computes, for every cell, the number of one-cell moves to the target
//! through wall-free passages, by repeated full-grid relaxation.
//!
//! Constructed via the builder pattern: [`FloodFill::builder`].

use crate::propagator::{check_target, DistancePropagator, PropagationStats};
use maze_core::{Cell, Distance, PropagatorError, MAX_DISTANCE};
use maze_grid::GridMap;
use tracing::trace;

/// Iterative-relaxation ("flood fill") distance propagator.
///
/// # Algorithm
///
/// ```text
/// d[*] = MAX, d[target] = 0
/// repeat:
///     for each cell c != target (row-major, updated in place):
///         m = min d[n] over neighbours n reachable without a known wall
///         if m != MAX and d[c] != m + 1: d[c] = m + 1, progress
/// until a full pass makes no progress
/// ```
///
/// This is Bellman-Ford relaxation on an undirected unit-weight graph.
/// Every finite value is the length of a real path, so values only ever
/// decrease and the loop settles on the exact graph distance. Cells with
/// no path to the target keep [`MAX_DISTANCE`].
///
/// The worst case needs on the order of `side²` passes; a pass limit
/// (default `side² + 1`) turns a non-settling run into an error rather
/// than a hang.
///
/// # Construction
///
/// ```
/// use maze_core::Cell;
/// use maze_grid::GridMap;
/// use maze_propagators::{DistancePropagator, FloodFill};
///
/// let fill = FloodFill::builder().build().unwrap();
/// let mut grid = GridMap::new(3).unwrap();
/// fill.propagate(&mut grid, Cell::new(2, 2)).unwrap();
/// assert_eq!(grid.distance_of(Cell::new(0, 0)), 4);
/// ```
#[derive(Clone, Debug, Default)]
pub struct FloodFill {
    max_passes: Option<u32>,
}

/// Builder for [`FloodFill`].
pub struct FloodFillBuilder {
    max_passes: Option<u32>,
}

impl FloodFill {
    /// Create a new builder for configuring a `FloodFill` propagator.
    pub fn builder() -> FloodFillBuilder {
        FloodFillBuilder { max_passes: None }
    }

    /// Pass limit applied to a grid of the given side.
    pub fn pass_limit(&self, side: u32) -> u32 {
        self.max_passes.unwrap_or_else(|| side * side + 1)
    }

    /// One relaxation pass. Returns whether any distance changed.
    fn relax(grid: &mut GridMap, target: Cell) -> bool {
        let mut progress = false;
        for index in 0..grid.cell_count() {
            let cell = grid.cell_at(index);
            if cell == target {
                continue;
            }
            let min_neighbour = grid
                .open_neighbours(cell)
                .iter()
                .map(|&(_, nb)| grid.distance_of(nb))
                .min()
                .unwrap_or(MAX_DISTANCE);
            if min_neighbour == MAX_DISTANCE {
                continue;
            }
            let candidate: Distance = min_neighbour + 1;
            let current = &mut grid.distances_mut()[index];
            if *current != candidate {
                *current = candidate;
                progress = true;
            }
        }
        progress
    }
}

impl FloodFillBuilder {
    /// Override the pass limit. Default: `side² + 1`. Must be at least 1.
    pub fn max_passes(mut self, passes: u32) -> Self {
        self.max_passes = Some(passes);
        self
    }

    /// Build the propagator, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `max_passes` was set to 0.
    pub fn build(self) -> Result<FloodFill, String> {
        if self.max_passes == Some(0) {
            return Err("max_passes must be at least 1".to_string());
        }
        Ok(FloodFill {
            max_passes: self.max_passes,
        })
    }
}

impl DistancePropagator for FloodFill {
    fn name(&self) -> &str {
        "FloodFill"
    }

    fn propagate(
        &self,
        grid: &mut GridMap,
        target: Cell,
    ) -> Result<PropagationStats, PropagatorError> {
        check_target(grid, target)?;
        let limit = self.pass_limit(grid.side());

        grid.fill_distances(MAX_DISTANCE);
        grid.set_distance(target, 0);

        let mut passes = 0u32;
        loop {
            if passes == limit {
                return Err(PropagatorError::PassLimitExceeded { limit });
            }
            passes += 1;
            let progress = Self::relax(grid, target);
            trace!(pass = passes, progress, %target, "flood fill pass");
            if !progress {
                break;
            }
        }

        let reachable = grid
            .distances()
            .iter()
            .filter(|&&d| d != MAX_DISTANCE)
            .count();
        Ok(PropagationStats { passes, reachable })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::Heading;

    fn fill() -> FloodFill {
        FloodFill::builder().build().unwrap()
    }

    // ── Builder tests ───────────────────────────────────────────

    #[test]
    fn builder_default_limit_scales_with_side() {
        let f = fill();
        assert_eq!(f.pass_limit(10), 101);
        assert_eq!(f.pass_limit(1), 2);
    }

    #[test]
    fn builder_rejects_zero_passes() {
        assert!(FloodFill::builder().max_passes(0).build().is_err());
        let f = FloodFill::builder().max_passes(7).build().unwrap();
        assert_eq!(f.pass_limit(10), 7);
    }

    // ── Propagation tests ───────────────────────────────────────

    #[test]
    fn open_grid_matches_manhattan() {
        let mut g = GridMap::new(5).unwrap();
        let target = Cell::new(4, 4);
        fill().propagate(&mut g, target).unwrap();
        for cell in g.cells().collect::<Vec<_>>() {
            assert_eq!(g.distance_of(cell) as u32, cell.manhattan(target), "{cell}");
        }
    }

    #[test]
    fn target_is_zero() {
        let mut g = GridMap::new(4).unwrap();
        fill().propagate(&mut g, Cell::new(1, 2)).unwrap();
        assert_eq!(g.distance_of(Cell::new(1, 2)), 0);
    }

    #[test]
    fn wall_forces_detour() {
        // 3x3, goal at (2, 0). A wall between (1, 0) and (2, 0), and
        // between (1, 1) and (2, 1), forces the path over the top row.
        let mut g = GridMap::new(3).unwrap();
        g.add_wall(Cell::new(1, 0), Heading::East);
        g.add_wall(Cell::new(1, 1), Heading::East);
        fill().propagate(&mut g, Cell::new(2, 0)).unwrap();
        assert_eq!(g.distance_of(Cell::new(2, 1)), 1);
        assert_eq!(g.distance_of(Cell::new(2, 2)), 2);
        assert_eq!(g.distance_of(Cell::new(1, 2)), 3);
        assert_eq!(g.distance_of(Cell::new(1, 0)), 5);
        assert_eq!(g.distance_of(Cell::new(0, 0)), 6);
    }

    #[test]
    fn walled_off_cell_stays_unreached() {
        let mut g = GridMap::new(3).unwrap();
        let island = Cell::new(1, 1);
        for h in Heading::ALL {
            g.add_wall(island, h);
        }
        let stats = fill().propagate(&mut g, Cell::new(0, 0)).unwrap();
        assert_eq!(g.distance_of(island), MAX_DISTANCE);
        assert_eq!(stats.reachable, 8);
    }

    #[test]
    fn walled_off_target_leaves_everything_else_unreached() {
        let mut g = GridMap::new(3).unwrap();
        let goal = Cell::new(2, 2);
        g.add_wall(goal, Heading::West);
        g.add_wall(goal, Heading::South);
        let stats = fill().propagate(&mut g, goal).unwrap();
        assert_eq!(stats.reachable, 1);
        assert_eq!(g.distance_of(Cell::new(0, 0)), MAX_DISTANCE);
    }

    #[test]
    fn repeated_propagation_overwrites_previous_target() {
        let mut g = GridMap::new(4).unwrap();
        fill().propagate(&mut g, Cell::new(3, 3)).unwrap();
        fill().propagate(&mut g, Cell::new(0, 0)).unwrap();
        assert_eq!(g.distance_of(Cell::new(0, 0)), 0);
        assert_eq!(g.distance_of(Cell::new(3, 3)), 6);
    }

    #[test]
    fn single_cell_grid() {
        let mut g = GridMap::new(1).unwrap();
        let stats = fill().propagate(&mut g, Cell::new(0, 0)).unwrap();
        assert_eq!(stats, PropagationStats { passes: 1, reachable: 1 });
    }

    #[test]
    fn out_of_bounds_target_is_rejected() {
        let mut g = GridMap::new(4).unwrap();
        assert_eq!(
            fill().propagate(&mut g, Cell::new(4, 0)),
            Err(PropagatorError::TargetOutOfBounds {
                target: Cell::new(4, 0)
            })
        );
    }

    #[test]
    fn tight_pass_limit_is_reported() {
        // Row-major in-place relaxation toward the top-right corner only
        // advances one row per pass, so a 6x6 grid needs more than 2.
        let f = FloodFill::builder().max_passes(2).build().unwrap();
        let mut g = GridMap::new(6).unwrap();
        assert_eq!(
            f.propagate(&mut g, Cell::new(5, 5)),
            Err(PropagatorError::PassLimitExceeded { limit: 2 })
        );
    }
}
