//! The [`DistancePropagator`] trait.
//!
//! A propagator recomputes the grid's whole distance field for one target
//! cell. There is no incremental update: each call overwrites every cell.

use maze_core::{Cell, PropagatorError};
use maze_grid::GridMap;

/// Summary of one propagation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PropagationStats {
    /// Full-grid passes executed, including the final pass that made no
    /// change. Single-pass propagators report 1.
    pub passes: u32,
    /// Cells left with a finite distance.
    pub reachable: usize,
}

/// A stateless operator that fills the distance field toward a target.
///
/// # Contract
///
/// - `propagate()` MUST be deterministic: same walls and target produce
///   an identical distance field.
/// - The target's distance is 0 on success.
/// - Walls are read-only; a propagator never changes them.
///
/// # Examples
///
/// ```
/// use maze_core::{Cell, PropagatorError};
/// use maze_grid::GridMap;
/// use maze_propagators::{DistancePropagator, PropagationStats};
///
/// struct ZeroFill;
///
/// impl DistancePropagator for ZeroFill {
///     fn name(&self) -> &str { "zero_fill" }
///
///     fn propagate(&self, grid: &mut GridMap, target: Cell)
///         -> Result<PropagationStats, PropagatorError>
///     {
///         grid.try_index(target)
///             .map_err(|_| PropagatorError::TargetOutOfBounds { target })?;
///         grid.fill_distances(0);
///         Ok(PropagationStats { passes: 1, reachable: grid.cell_count() })
///     }
/// }
///
/// let mut grid = GridMap::new(3).unwrap();
/// let stats = ZeroFill.propagate(&mut grid, Cell::new(1, 1)).unwrap();
/// assert_eq!(stats.reachable, 9);
/// ```
pub trait DistancePropagator {
    /// Human-readable name for logs.
    fn name(&self) -> &str;

    /// Overwrite every distance in `grid` relative to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`PropagatorError::TargetOutOfBounds`] if `target` is off
    /// the grid; implementations may add their own failure modes.
    fn propagate(
        &self,
        grid: &mut GridMap,
        target: Cell,
    ) -> Result<PropagationStats, PropagatorError>;
}

/// Reject targets that are not on the grid.
pub(crate) fn check_target(grid: &GridMap, target: Cell) -> Result<(), PropagatorError> {
    if grid.contains(target) {
        Ok(())
    } else {
        Err(PropagatorError::TargetOutOfBounds { target })
    }
}
