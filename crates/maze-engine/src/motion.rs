//! Blocking execution of discrete actions against the drive collaborators.
//!
//! Every action is a sequence of segments: zero, one or two in-place
//! quarter turns (rate-integrated from the gyro) followed by a one-cell
//! advance (measured by odometry). Each segment is a busy-wait against
//! the [`Clock`], bounded by [`MotionLimits`]. A wait that runs out stops
//! the drive and reports [`MotionError::Stalled`].

use maze_core::{
    Action, Cell, Clock, DriveActuator, Heading, MotionError, MotionSegment, Odometry, Pose,
    RateGyro,
};
use tracing::{trace, warn};

/// Rotation per turn segment.
const QUARTER_TURN_DEG: f32 = 90.0;

/// A calibrated bias larger than this suggests the vehicle moved while
/// calibrating.
const BIAS_WARN_DPS: f32 = 5.0;

/// Wheel commands used for one phase of the run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedProfile {
    /// Command for both wheels while advancing, in `(0, 1]`.
    pub drive: f32,
    /// Magnitude of the opposite wheel commands while turning, in `(0, 1]`.
    pub turn: f32,
}

/// Upper bounds on each busy-wait.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MotionLimits {
    /// Longest a one-cell advance may take.
    pub move_timeout_us: u64,
    /// Longest a single quarter turn may take.
    pub turn_timeout_us: u64,
}

/// Drives the vehicle one action at a time.
///
/// Owns the drive, odometry, gyro and clock collaborators. Poses are
/// passed in and returned rather than stored: the run controller owns
/// the pose.
#[derive(Debug)]
pub struct MotionExecutor<D, O, G, C> {
    drive: D,
    odometry: O,
    gyro: G,
    clock: C,
    cell_ticks: u32,
    side: u32,
    limits: MotionLimits,
    gyro_bias_dps: f32,
    busy_us: u64,
}

impl<D, O, G, C> MotionExecutor<D, O, G, C>
where
    D: DriveActuator,
    O: Odometry,
    G: RateGyro,
    C: Clock,
{
    /// Create an executor for a grid of `side` cells, where one cell is
    /// `cell_ticks` odometry ticks long. The gyro is uncalibrated (zero
    /// bias) until [`calibrate_gyro`](Self::calibrate_gyro) runs.
    pub fn new(
        drive: D,
        odometry: O,
        gyro: G,
        clock: C,
        cell_ticks: u32,
        side: u32,
        limits: MotionLimits,
    ) -> Self {
        Self {
            drive,
            odometry,
            gyro,
            clock,
            cell_ticks,
            side,
            limits,
            gyro_bias_dps: 0.0,
            busy_us: 0,
        }
    }

    /// Average `samples` readings of the stationary gyro into its static
    /// bias, which is subtracted from every later reading. Returns the
    /// bias. Zero samples leaves the bias at zero.
    pub fn calibrate_gyro(&mut self, samples: u32) -> f32 {
        if samples == 0 {
            self.gyro_bias_dps = 0.0;
            return 0.0;
        }
        let sum: f64 = (0..samples)
            .map(|_| f64::from(self.gyro.angular_rate_dps()))
            .sum();
        let bias = (sum / f64::from(samples)) as f32;
        if !bias.is_finite() {
            warn!(samples, "gyro calibration produced a non-finite bias, using 0");
            self.gyro_bias_dps = 0.0;
            return 0.0;
        }
        if bias.abs() > BIAS_WARN_DPS {
            warn!(bias_dps = bias, "gyro bias unusually large; was the vehicle moving?");
        }
        self.gyro_bias_dps = bias;
        bias
    }

    /// Current gyro bias estimate.
    pub fn gyro_bias_dps(&self) -> f32 {
        self.gyro_bias_dps
    }

    /// Total time spent inside motion segments.
    pub fn busy_us(&self) -> u64 {
        self.busy_us
    }

    /// Perform `action` from `pose` and return the new pose.
    ///
    /// Turns first (a 180° turn is two clockwise quarter turns), then
    /// advances one cell. The drive is stopped after every segment.
    ///
    /// # Errors
    ///
    /// - [`MotionError::LeavesGrid`] if the advance would cross the grid
    ///   border. Nothing moves.
    /// - [`MotionError::Stalled`] if a segment outlasts its limit. The
    ///   drive is stopped and the error carries the pose reached.
    pub fn execute(
        &mut self,
        action: Action,
        profile: SpeedProfile,
        pose: Pose,
    ) -> Result<Pose, MotionError> {
        let heading = action.heading_after(pose.heading);
        let Some(next) = self.step_cell(pose.cell, heading) else {
            return Err(MotionError::LeavesGrid {
                from: Pose::new(pose.cell, heading),
            });
        };

        let mut reached = pose;
        let turns = action.quarter_turns();
        let clockwise = turns > 0;
        for _ in 0..turns.unsigned_abs() {
            self.quarter_turn(action, clockwise, profile.turn, reached)?;
            reached.heading = if clockwise {
                reached.heading.clockwise()
            } else {
                reached.heading.counter_clockwise()
            };
        }

        self.advance(action, profile.drive, reached)?;
        Ok(Pose::new(next, heading))
    }

    /// Halt the drive.
    pub fn halt(&mut self) {
        self.drive.stop();
    }

    /// Tell the drive the vehicle is being returned to `start`.
    pub fn restart_at(&mut self, start: Pose) {
        self.drive.restart_at(start);
    }

    fn step_cell(&self, cell: Cell, heading: Heading) -> Option<Cell> {
        let (dx, dy) = heading.delta();
        let x = cell.x.checked_add_signed(dx)?;
        let y = cell.y.checked_add_signed(dy)?;
        (x < self.side && y < self.side).then_some(Cell::new(x, y))
    }

    fn quarter_turn(
        &mut self,
        action: Action,
        clockwise: bool,
        speed: f32,
        reached: Pose,
    ) -> Result<(), MotionError> {
        let (left, right) = if clockwise { (speed, -speed) } else { (-speed, speed) };
        let start = self.clock.now_us();
        let mut last = start;
        let mut angle = 0.0f32;
        self.drive.drive(left, right);
        loop {
            let now = self.clock.now_us();
            let rate = self.gyro.angular_rate_dps() - self.gyro_bias_dps;
            angle += rate * now.saturating_sub(last) as f32 / 1e6;
            last = now;
            let elapsed = now.saturating_sub(start);
            if angle.abs() >= QUARTER_TURN_DEG {
                self.drive.stop();
                self.busy_us += elapsed;
                trace!(%action, clockwise, elapsed_us = elapsed, "quarter turn complete");
                return Ok(());
            }
            if elapsed >= self.limits.turn_timeout_us {
                self.drive.stop();
                self.busy_us += elapsed;
                return Err(MotionError::Stalled {
                    action,
                    segment: MotionSegment::Turn,
                    elapsed_us: elapsed,
                    reached,
                });
            }
        }
    }

    fn advance(&mut self, action: Action, speed: f32, reached: Pose) -> Result<(), MotionError> {
        let target = u64::from(self.cell_ticks);
        self.odometry.reset();
        let start = self.clock.now_us();
        self.drive.drive(speed, speed);
        loop {
            let now = self.clock.now_us();
            let elapsed = now.saturating_sub(start);
            if self.odometry.ticks().unsigned_abs() >= target {
                self.drive.stop();
                self.busy_us += elapsed;
                trace!(%action, elapsed_us = elapsed, "advance complete");
                return Ok(());
            }
            if elapsed >= self.limits.move_timeout_us {
                self.drive.stop();
                self.busy_us += elapsed;
                return Err(MotionError::Stalled {
                    action,
                    segment: MotionSegment::Advance,
                    elapsed_us: elapsed,
                    reached,
                });
            }
        }
    }
}
