//! Maze: a flood-fill navigation engine for micromouse-style vehicles.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all maze sub-crates. For most users, adding `maze` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use maze::prelude::*;
//!
//! // A 3×3 grid with one known wall north of the start cell.
//! let mut grid = GridMap::new(3).unwrap();
//! grid.add_wall(Cell::new(0, 0), Heading::North);
//!
//! // Distances toward the far corner, respecting the wall.
//! let stats = FloodFill::default().propagate(&mut grid, Cell::new(2, 2)).unwrap();
//! assert_eq!(grid.distance_of(Cell::new(0, 0)), 4);
//! assert_eq!(stats.reachable, 9);
//!
//! // Facing north into the wall, the best open move is to the right.
//! let pose = Pose::new(Cell::new(0, 0), Heading::North);
//! let action = NavigationPolicy.decide(&grid, pose).unwrap();
//! assert_eq!(action, Action::TurnRight90);
//! assert_eq!(action.heading_after(pose.heading), Heading::East);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `maze-core` | Cells, headings, wall masks, poses, errors, hardware traits |
//! | [`grid`] | `maze-grid` | The wall and distance map, reciprocity checks, ASCII rendering |
//! | [`propagators`] | `maze-propagators` | Flood fill, Manhattan seeding, wall observation |
//! | [`engine`] | `maze-engine` | Policy, motion, persistence, configuration, run control |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and errors (`maze-core`).
///
/// Contains [`types::Cell`], [`types::Heading`], [`types::WallMask`], the
/// error enums, and the collaborator traits ([`types::RangeSensor`],
/// [`types::DriveActuator`], [`types::ByteStorage`] and friends).
pub use maze_core as types;

/// The grid map (`maze-grid`).
///
/// [`grid::GridMap`] stores one wall mask and one distance per cell.
pub use maze_grid as grid;

/// Distance propagation and wall observation (`maze-propagators`).
///
/// The [`propagators::DistancePropagator`] trait with
/// [`propagators::FloodFill`] and [`propagators::ManhattanHeuristic`],
/// plus [`propagators::WallObserver`].
pub use maze_propagators as propagators;

/// Run control (`maze-engine`).
///
/// [`engine::RunController`] drives a vehicle through exploration and
/// the fast run; [`engine::MapStore`] persists the explored map.
pub use maze_engine as engine;

/// Common imports for typical maze usage.
///
/// ```rust
/// use maze::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use maze_core::{
        Action, ByteStorage, Cell, Clock, Distance, DriveActuator, Heading, Odometry, Pose,
        RangeSensor, RateGyro, Relative, RunPhase, WallMask, MAX_DISTANCE,
    };

    // Errors
    pub use maze_core::{GridError, MotionError, PolicyError, PropagatorError, StorageError};

    // Grid
    pub use maze_grid::{render_ascii, GridMap};

    // Propagation
    pub use maze_propagators::{
        DistancePropagator, FloodFill, ManhattanHeuristic, RangeReadings, WallObserver,
    };

    // Engine
    pub use maze_engine::{
        Hardware, MapStore, NavConfig, NavigationPolicy, RunController, RunError, RunMetrics,
        RunReport,
    };
}
