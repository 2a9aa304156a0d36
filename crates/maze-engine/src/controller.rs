//! The run controller: a two-phase state machine over one vehicle.
//!
//! ```text
//! Exploring ──(at goal)──▶ GoalReached ──(one shot)──▶ FastRun ──(at goal)──▶ Done
//!     ▲                                                   ▲
//!     └── no persisted map                persisted map ──┘   (at startup)
//! ```
//!
//! Each [`step()`](RunController::step) is one control cycle. Exploring
//! senses, updates the map, re-propagates and moves; the fast run trusts
//! the map and only moves. Motion is blocking, so a cycle returns only
//! once the vehicle has physically finished its action.

use crate::config::{ConfigError, NavConfig};
use crate::metrics::RunMetrics;
use crate::motion::{MotionExecutor, SpeedProfile};
use crate::persist::MapStore;
use crate::policy::NavigationPolicy;
use maze_core::{
    Action, ByteStorage, Clock, DriveActuator, GridError, MotionError, Odometry, PolicyError,
    Pose, PropagatorError, RangeSensor, RateGyro, RunPhase, MAX_DISTANCE,
};
use maze_grid::GridMap;
use maze_propagators::{
    DistancePropagator, FloodFill, ManhattanHeuristic, PropagationStats, RangeReadings,
    WallObserver,
};
use thiserror::Error;
use tracing::{debug, error, info, warn};

// ── RunError ───────────────────────────────────────────────────────

/// Errors that end a run.
///
/// Storage problems are never fatal and do not appear here; they are
/// logged and the run falls back to exploring.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RunError {
    /// The configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The grid could not be created.
    #[error(transparent)]
    Grid(#[from] GridError),
    /// Distance propagation failed.
    #[error(transparent)]
    Propagation(#[from] PropagatorError),
    /// The policy found no legal action.
    #[error(transparent)]
    Policy(#[from] PolicyError),
    /// The vehicle stalled or would have left the grid.
    #[error(transparent)]
    Motion(#[from] MotionError),
    /// [`run()`](RunController::run) hit the configured cycle limit.
    #[error("run did not finish within {limit} cycles")]
    CycleLimit {
        /// The configured limit.
        limit: u64,
    },
}

// ── Hardware ───────────────────────────────────────────────────────

/// The collaborators of one vehicle.
#[derive(Debug)]
pub struct Hardware<R, D, O, G, S, C> {
    /// Front, left and right range sensors.
    pub ranger: R,
    /// Differential drive.
    pub drive: D,
    /// Wheel odometry.
    pub odometry: O,
    /// Yaw-rate gyro.
    pub gyro: G,
    /// Non-volatile map storage.
    pub storage: S,
    /// Monotonic time source.
    pub clock: C,
}

/// Outcome of a completed run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    /// Final counters.
    pub metrics: RunMetrics,
    /// Pose at the end of the fast run.
    pub final_pose: Pose,
}

// ── RunController ──────────────────────────────────────────────────

/// Owns the map, the pose and the hardware, and drives the run phases.
pub struct RunController<R, D, O, G, S, C> {
    config: NavConfig,
    ranger: R,
    storage: S,
    motion: MotionExecutor<D, O, G, C>,
    observer: WallObserver,
    flood: FloodFill,
    policy: NavigationPolicy,
    store: MapStore,
    grid: GridMap,
    pose: Pose,
    phase: RunPhase,
    metrics: RunMetrics,
}

impl<R, D, O, G, S, C> RunController<R, D, O, G, S, C>
where
    R: RangeSensor,
    D: DriveActuator,
    O: Odometry,
    G: RateGyro,
    S: ByteStorage,
    C: Clock,
{
    /// Validate `config`, calibrate the gyro and prepare the map.
    ///
    /// When a valid persisted map exists (and reuse is enabled) the
    /// controller starts in [`RunPhase::FastRun`] with distances already
    /// propagated over it. Otherwise it starts in
    /// [`RunPhase::Exploring`] with Manhattan distances to the goal.
    ///
    /// # Errors
    ///
    /// [`RunError::Config`] for an invalid configuration. Storage errors
    /// are logged and ignored.
    pub fn new(config: NavConfig, hardware: Hardware<R, D, O, G, S, C>) -> Result<Self, RunError> {
        config.validate()?;
        let Hardware {
            ranger,
            drive,
            odometry,
            gyro,
            storage,
            clock,
        } = hardware;

        let mut motion = MotionExecutor::new(
            drive,
            odometry,
            gyro,
            clock,
            config.cell_ticks,
            config.side,
            config.motion_limits(),
        );
        let bias = motion.calibrate_gyro(config.gyro_calibration_samples);
        debug!(bias_dps = bias, samples = config.gyro_calibration_samples, "gyro calibrated");

        let mut grid = GridMap::new(config.side)?;
        if config.start_enclosure {
            grid.mark_start_enclosure(config.start);
        }

        let mut controller = Self {
            observer: WallObserver::new(config.wall_threshold_cm),
            flood: FloodFill::default(),
            policy: NavigationPolicy,
            store: MapStore::new(config.storage, config.side),
            pose: Pose::new(config.start, config.start_heading),
            phase: RunPhase::Exploring,
            metrics: RunMetrics::default(),
            grid,
            config,
            ranger,
            storage,
            motion,
        };

        if controller.config.reuse_persisted_map && controller.try_persisted_map()? {
            controller.phase = RunPhase::FastRun;
            controller.metrics.from_persisted_map = true;
            info!(pose = %controller.pose, "persisted map loaded, starting fast run");
        } else {
            let goal = controller.config.goal;
            let stats = ManhattanHeuristic.propagate(&mut controller.grid, goal)?;
            controller.record_propagation(stats);
            info!(pose = %controller.pose, goal = %goal, "starting exploration");
        }
        Ok(controller)
    }

    /// Load the persisted map and propagate over it. Returns whether it
    /// is usable.
    fn try_persisted_map(&mut self) -> Result<bool, RunError> {
        let loaded = match self.store.load(&mut self.storage) {
            Ok(Some(map)) => map,
            Ok(None) => {
                debug!("no persisted map");
                return Ok(false);
            }
            Err(e) => {
                warn!(error = %e, "persisted map unreadable, exploring instead");
                return Ok(false);
            }
        };

        let mut grid = loaded;
        if self.config.start_enclosure {
            grid.mark_start_enclosure(self.config.start);
        }
        let stats = self.flood.propagate(&mut grid, self.config.goal)?;
        if grid.distance_of(self.config.start) == MAX_DISTANCE {
            warn!("persisted map has no path from start to goal, exploring instead");
            return Ok(false);
        }
        self.grid = grid;
        self.record_propagation(stats);
        Ok(true)
    }

    /// Run one control cycle and return the phase after it.
    ///
    /// # Errors
    ///
    /// Policy, motion and propagation failures are fatal: the drive is
    /// stopped and the phase is left unchanged. After a stall the pose
    /// reflects the segments that did complete.
    pub fn step(&mut self) -> Result<RunPhase, RunError> {
        match self.phase {
            RunPhase::Exploring => self.explore_cycle()?,
            RunPhase::GoalReached => self.prepare_fast_run()?,
            RunPhase::FastRun => self.fast_run_cycle()?,
            RunPhase::Done => return Ok(RunPhase::Done),
        }
        self.metrics.cycles += 1;
        Ok(self.phase)
    }

    /// Step until [`RunPhase::Done`].
    ///
    /// # Errors
    ///
    /// Any error from [`step()`](Self::step), or [`RunError::CycleLimit`]
    /// once `max_cycles` cycles have run without finishing.
    pub fn run(&mut self) -> Result<RunReport, RunError> {
        while self.phase != RunPhase::Done {
            if self.metrics.cycles >= self.config.max_cycles {
                let err = RunError::CycleLimit {
                    limit: self.config.max_cycles,
                };
                return Err(self.fail(err));
            }
            self.step()?;
        }
        Ok(RunReport {
            metrics: self.metrics.clone(),
            final_pose: self.pose,
        })
    }

    /// Current phase.
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Current logical pose.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// The map, with distances toward the goal from the latest
    /// propagation.
    pub fn grid(&self) -> &GridMap {
        &self.grid
    }

    /// Counters so far.
    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }

    /// The validated configuration.
    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    // ── Phases ──────────────────────────────────────────────────

    fn explore_cycle(&mut self) -> Result<(), RunError> {
        let goal = self.config.goal;
        if self.pose.cell == goal {
            self.enter(RunPhase::GoalReached);
            return Ok(());
        }

        let readings = RangeReadings::sample(&mut self.ranger);
        let before = self.grid.wall_bit_count();
        let seen = self.observer.observe(&mut self.grid, self.pose, readings);
        self.metrics.wall_bits_discovered += self.grid.wall_bit_count() - before;

        let stats = self
            .flood
            .propagate(&mut self.grid, goal)
            .map_err(|e| self.fail(e.into()))?;
        self.record_propagation(stats);

        let profile = self.config.explore_profile();
        let action = self.advance(profile, |c| {
            debug!(cycle = c.metrics.cycles, pose = %c.pose, walls = %seen,
                distance = c.grid.distance_of(c.pose.cell), "exploring");
        })?;
        self.metrics.explore_cells += 1;
        self.metrics.quarter_turns += u32::from(action.quarter_turns().unsigned_abs());

        if self.pose.cell == goal {
            self.enter(RunPhase::GoalReached);
        }
        Ok(())
    }

    fn prepare_fast_run(&mut self) -> Result<(), RunError> {
        match self.store.save(&mut self.storage, &self.grid) {
            Ok(written) => {
                self.metrics.map_saved = true;
                info!(bytes_written = written, "map persisted");
            }
            Err(e) => warn!(error = %e, "map could not be persisted"),
        }

        let stats = self
            .flood
            .propagate(&mut self.grid, self.config.goal)
            .map_err(|e| self.fail(e.into()))?;
        self.record_propagation(stats);

        self.pose = Pose::new(self.config.start, self.config.start_heading);
        self.motion.restart_at(self.pose);
        self.enter(RunPhase::FastRun);
        Ok(())
    }

    fn fast_run_cycle(&mut self) -> Result<(), RunError> {
        if self.pose.cell != self.config.goal {
            let profile = self.config.fast_profile();
            let action = self.advance(profile, |c| {
                debug!(cycle = c.metrics.cycles, pose = %c.pose,
                    distance = c.grid.distance_of(c.pose.cell), "fast run");
            })?;
            self.metrics.fast_run_cells += 1;
            self.metrics.quarter_turns += u32::from(action.quarter_turns().unsigned_abs());
        }
        if self.pose.cell == self.config.goal {
            self.motion.halt();
            self.enter(RunPhase::Done);
            info!(metrics = %self.metrics, "run complete");
        }
        Ok(())
    }

    // ── Helpers ─────────────────────────────────────────────────

    /// Decide and execute one action, updating the pose.
    fn advance(
        &mut self,
        profile: SpeedProfile,
        log: impl FnOnce(&Self),
    ) -> Result<Action, RunError> {
        let action = self
            .policy
            .decide(&self.grid, self.pose)
            .map_err(|e| self.fail(e.into()))?;
        log(self);
        debug!(%action, "executing");

        let result = self.motion.execute(action, profile, self.pose);
        self.metrics.motion_us = self.motion.busy_us();
        match result {
            Ok(pose) => {
                self.pose = pose;
                Ok(action)
            }
            Err(e) => {
                if let MotionError::Stalled { reached, .. } = &e {
                    self.pose = *reached;
                }
                Err(self.fail(e.into()))
            }
        }
    }

    fn record_propagation(&mut self, stats: PropagationStats) {
        self.metrics.propagations += 1;
        self.metrics.propagation_passes += u64::from(stats.passes);
    }

    fn enter(&mut self, phase: RunPhase) {
        info!(from = %self.phase, to = %phase, pose = %self.pose, "phase transition");
        self.phase = phase;
    }

    /// Stop the drive and log a fatal error.
    fn fail(&mut self, err: RunError) -> RunError {
        self.motion.halt();
        error!(error = %err, phase = %self.phase, pose = %self.pose, "run aborted");
        err
    }
}

impl<R, D, O, G, S, C> std::fmt::Debug for RunController<R, D, O, G, S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunController")
            .field("phase", &self.phase)
            .field("pose", &self.pose)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}
