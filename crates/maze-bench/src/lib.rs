//! Benchmark profiles and utilities for the maze navigation engine.
//!
//! Provides deterministic maze fixtures for benchmarks and examples:
//!
//! - [`open_grid`]: a grid with no interior walls
//! - [`perfect_maze`]: a seeded spanning-tree maze
//! - [`centre_goal_config`]: a [`NavConfig`] aiming at the centre cell
//! - [`explore`]: an exploration run against the simulated vehicle
//! - [`fast_run_from_true_map`]: a fast run over a pre-stored map

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use maze_core::{Cell, GridError, Pose, RunPhase};
use maze_engine::{
    Hardware, MapStore, NavConfig, RunController, RunError, RunMetrics, RunReport,
};
use maze_grid::GridMap;
use maze_test_utils::{
    MazeLayout, MemoryStorage, SimClock, SimDrive, SimGyro, SimOdometry, SimRanger, SimRobot,
};

type SimHardware<'a> =
    Hardware<SimRanger, SimDrive, SimOdometry, SimGyro, &'a mut MemoryStorage, SimClock>;

/// Seed used by every benchmark profile.
pub const BENCH_SEED: u64 = 42;

/// An empty `side`×`side` grid.
pub fn open_grid(side: u32) -> Result<GridMap, GridError> {
    GridMap::new(side)
}

/// The walls of a seeded perfect maze as a [`GridMap`].
///
/// Every cell is reachable from every other through exactly one path,
/// which is the slowest case for row-major relaxation.
pub fn perfect_maze(side: u32, seed: u64) -> Result<GridMap, GridError> {
    Ok(MazeLayout::random_perfect(side, seed)?.to_grid_map())
}

/// Default configuration with the goal moved to the centre cell.
pub fn centre_goal_config(side: u32) -> NavConfig {
    NavConfig {
        side,
        goal: Cell::new(side / 2, side / 2),
        ..NavConfig::default()
    }
}

/// Explore `layout` until the goal is reached and return the counters.
///
/// Uses fresh storage, so the controller always starts exploring.
pub fn explore(config: &NavConfig, layout: &MazeLayout) -> Result<RunMetrics, RunError> {
    let sim = SimRobot::new(layout.clone(), start_pose(config));
    let mut storage = MemoryStorage::new(config.storage.required_capacity(config.side));
    let mut controller = RunController::new(config.clone(), hardware(&sim, &mut storage))?;
    while controller.phase() == RunPhase::Exploring {
        controller.step()?;
    }
    Ok(controller.metrics().clone())
}

/// Run the fast run alone, starting from the true walls of `layout`
/// already persisted in storage.
pub fn fast_run_from_true_map(
    config: &NavConfig,
    layout: &MazeLayout,
) -> Result<RunReport, RunError> {
    let mut storage = MemoryStorage::new(config.storage.required_capacity(config.side));
    // Side mismatch is the only save error on a fresh in-memory store.
    if let Err(e) =
        MapStore::new(config.storage, config.side).save(&mut storage, layout.grid())
    {
        tracing::warn!(error = %e, "true map could not be stored");
    }
    let sim = SimRobot::new(layout.clone(), start_pose(config));
    RunController::new(config.clone(), hardware(&sim, &mut storage))?.run()
}

fn start_pose(config: &NavConfig) -> Pose {
    Pose::new(config.start, config.start_heading)
}

fn hardware<'a>(sim: &SimRobot, storage: &'a mut MemoryStorage) -> SimHardware<'a> {
    Hardware {
        ranger: sim.ranger(),
        drive: sim.drive(),
        odometry: sim.odometry(),
        gyro: sim.gyro(),
        storage,
        clock: sim.clock(),
    }
}
