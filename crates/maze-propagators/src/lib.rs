//! Distance propagation and wall observation over a [`GridMap`].
//!
//! Propagators fill the grid's distance field toward a target cell:
//!
//! - [`FloodFill`]: full-grid relaxation respecting known walls.
//! - [`ManhattanHeuristic`]: straight-line distance, ignoring walls; used
//!   before any real propagation has run.
//!
//! [`WallObserver`] turns range readings into wall bits on the map.
//!
//! [`GridMap`]: maze_grid::GridMap

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod flood_fill;
pub mod heuristic;
pub mod propagator;
pub mod wall_observer;

pub use flood_fill::{FloodFill, FloodFillBuilder};
pub use heuristic::ManhattanHeuristic;
pub use propagator::{DistancePropagator, PropagationStats};
pub use wall_observer::{RangeReadings, WallObserver};
