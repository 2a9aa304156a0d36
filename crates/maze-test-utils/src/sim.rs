//! Simulated differential-drive vehicle.
//!
//! [`SimRobot`] owns one shared simulation state and hands out small
//! handle types, one per collaborator trait. Simulated time only moves
//! when the clock handle is polled: every [`Clock::now_us`] call advances
//! the world by one fixed step and integrates the current wheel command.
//!
//! Motion model:
//!
//! - Equal wheel speeds advance along the heading; odometry counts the
//!   travel. Crossing one cell's worth of ticks moves the true cell.
//! - Opposite wheel speeds rotate in place; the gyro reports the rate
//!   (plus a fixed bias). The true heading snaps to the nearest quarter
//!   turn when the drive is stopped.
//! - Driving into a real wall stops after a short nudge and odometry
//!   stops counting, which is what a stall looks like to the executor.

use crate::layout::MazeLayout;
use maze_core::{Clock, DriveActuator, Mount, Odometry, Pose, RangeSensor, RateGyro};
use std::cell::RefCell;
use std::rc::Rc;

/// Physical constants of the simulated vehicle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimParams {
    /// Odometry ticks per cell.
    pub cell_ticks: u32,
    /// Physical cell length.
    pub cell_cm: f32,
    /// Simulated time per clock poll.
    pub dt_us: u64,
    /// Linear speed at wheel command 1.0.
    pub full_speed_ticks_per_s: f64,
    /// Yaw rate at wheel commands (1.0, -1.0).
    pub full_speed_dps: f64,
    /// Static gyro bias added to every reading.
    pub gyro_bias_dps: f32,
    /// Distance from a range sensor to the cell centre.
    pub sensor_inset_cm: f32,
    /// Readings beyond this are clamped.
    pub max_range_cm: f32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            cell_ticks: 200,
            cell_cm: 18.0,
            dt_us: 1_000,
            full_speed_ticks_per_s: 1_000.0,
            full_speed_dps: 360.0,
            gyro_bias_dps: 0.0,
            sensor_inset_cm: 2.0,
            max_range_cm: 200.0,
        }
    }
}

#[derive(Debug)]
struct SimState {
    layout: MazeLayout,
    params: SimParams,
    pose: Pose,
    left: f32,
    right: f32,
    /// Ticks since the last odometry reset.
    travel: f64,
    /// Ticks into the current cell.
    advance: f64,
    /// Yaw since the last stop.
    yaw_deg: f64,
    rate_dps: f64,
    now_us: u64,
    stuck: bool,
    stops: usize,
    restarts: usize,
}

impl SimState {
    fn step(&mut self) {
        self.now_us += self.params.dt_us;
        if self.stuck {
            self.rate_dps = 0.0;
            return;
        }
        let dt = self.params.dt_us as f64 / 1e6;
        let (l, r) = (f64::from(self.left), f64::from(self.right));
        self.rate_dps = (l - r) / 2.0 * self.params.full_speed_dps;
        self.yaw_deg += self.rate_dps * dt;

        let step = (l + r) / 2.0 * self.params.full_speed_ticks_per_s * dt;
        if step <= 0.0 {
            return;
        }
        let cell_ticks = f64::from(self.params.cell_ticks);
        match self.ahead() {
            Some(next) => {
                self.advance += step;
                self.travel += step;
                if self.advance >= cell_ticks {
                    self.advance -= cell_ticks;
                    self.pose.cell = next.cell;
                }
            }
            None => {
                let room = (cell_ticks * 0.25 - self.advance).max(0.0);
                let moved = step.min(room);
                self.advance += moved;
                self.travel += moved;
            }
        }
    }

    /// The pose one open cell ahead, if the way is physically open.
    fn ahead(&self) -> Option<Pose> {
        let Pose { cell, heading } = self.pose;
        if !self.layout.is_open(cell, heading) {
            return None;
        }
        self.layout
            .grid()
            .neighbour(cell, heading)
            .map(|nb| Pose::new(nb, heading))
    }

    fn stop(&mut self) {
        self.left = 0.0;
        self.right = 0.0;
        self.rate_dps = 0.0;
        self.stops += 1;

        let quarters = (self.yaw_deg / 90.0).round() as i64;
        self.pose.heading = self.pose.heading.turned(quarters.rem_euclid(4) as i8);
        self.yaw_deg = 0.0;

        if self.advance >= f64::from(self.params.cell_ticks) / 2.0 {
            if let Some(next) = self.ahead() {
                self.pose.cell = next.cell;
            }
        }
        self.advance = 0.0;
    }

    fn range_cm(&self, mount: Mount) -> f32 {
        let heading = match mount {
            Mount::Front => self.pose.heading,
            Mount::Left => self.pose.heading.counter_clockwise(),
            Mount::Right => self.pose.heading.clockwise(),
        };
        let p = self.params;
        let mut open_cells = 0u32;
        let mut cell = self.pose.cell;
        while self.layout.is_open(cell, heading) {
            let Some(next) = self.layout.grid().neighbour(cell, heading) else {
                break;
            };
            cell = next;
            open_cells += 1;
            if open_cells as f32 * p.cell_cm > p.max_range_cm {
                return p.max_range_cm;
            }
        }
        let reading = open_cells as f32 * p.cell_cm + p.cell_cm / 2.0 - p.sensor_inset_cm;
        reading.min(p.max_range_cm)
    }
}

type Shared = Rc<RefCell<SimState>>;

/// A simulated vehicle in a [`MazeLayout`].
///
/// ```
/// use maze_core::{Cell, Clock, DriveActuator, Heading, Odometry, Pose};
/// use maze_test_utils::{MazeLayout, SimRobot};
///
/// let sim = SimRobot::new(
///     MazeLayout::open(3).unwrap(),
///     Pose::new(Cell::new(0, 0), Heading::North),
/// );
/// let (mut drive, mut odo, mut clock) = (sim.drive(), sim.odometry(), sim.clock());
/// drive.drive(1.0, 1.0);
/// while odo.ticks() < 200 {
///     clock.now_us();
/// }
/// drive.stop();
/// assert_eq!(sim.pose().cell, Cell::new(0, 1));
/// ```
#[derive(Clone, Debug)]
pub struct SimRobot {
    state: Shared,
}

impl SimRobot {
    /// Vehicle at `start` with default physics.
    pub fn new(layout: MazeLayout, start: Pose) -> Self {
        Self::with_params(layout, start, SimParams::default())
    }

    /// Vehicle at `start` with custom physics.
    pub fn with_params(layout: MazeLayout, start: Pose, params: SimParams) -> Self {
        let state = SimState {
            layout,
            params,
            pose: start,
            left: 0.0,
            right: 0.0,
            travel: 0.0,
            advance: 0.0,
            yaw_deg: 0.0,
            rate_dps: 0.0,
            now_us: 0,
            stuck: false,
            stops: 0,
            restarts: 0,
        };
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// Range sensor handle.
    pub fn ranger(&self) -> SimRanger {
        SimRanger(Rc::clone(&self.state))
    }

    /// Drive handle.
    pub fn drive(&self) -> SimDrive {
        SimDrive(Rc::clone(&self.state))
    }

    /// Odometry handle.
    pub fn odometry(&self) -> SimOdometry {
        SimOdometry(Rc::clone(&self.state))
    }

    /// Gyro handle.
    pub fn gyro(&self) -> SimGyro {
        SimGyro(Rc::clone(&self.state))
    }

    /// Clock handle.
    pub fn clock(&self) -> SimClock {
        SimClock(Rc::clone(&self.state))
    }

    /// True pose.
    pub fn pose(&self) -> Pose {
        self.state.borrow().pose
    }

    /// Simulated time elapsed.
    pub fn now_us(&self) -> u64 {
        self.state.borrow().now_us
    }

    /// Jam (or free) both wheels. A jammed vehicle neither moves nor
    /// turns.
    pub fn set_stuck(&self, stuck: bool) {
        self.state.borrow_mut().stuck = stuck;
    }

    /// Current wheel command.
    pub fn wheel_command(&self) -> (f32, f32) {
        let s = self.state.borrow();
        (s.left, s.right)
    }

    /// Number of `stop()` calls.
    pub fn stop_count(&self) -> usize {
        self.state.borrow().stops
    }

    /// Number of `restart_at()` calls.
    pub fn restart_count(&self) -> usize {
        self.state.borrow().restarts
    }

    /// The layout being simulated.
    pub fn layout(&self) -> MazeLayout {
        self.state.borrow().layout.clone()
    }
}

/// [`RangeSensor`] handle of a [`SimRobot`].
#[derive(Debug)]
pub struct SimRanger(Shared);

impl RangeSensor for SimRanger {
    fn measure_cm(&mut self, mount: Mount) -> f32 {
        self.0.borrow().range_cm(mount)
    }
}

/// [`DriveActuator`] handle of a [`SimRobot`].
#[derive(Debug)]
pub struct SimDrive(Shared);

impl DriveActuator for SimDrive {
    fn drive(&mut self, left: f32, right: f32) {
        let mut s = self.0.borrow_mut();
        s.left = left.clamp(-1.0, 1.0);
        s.right = right.clamp(-1.0, 1.0);
    }

    fn stop(&mut self) {
        self.0.borrow_mut().stop();
    }

    fn restart_at(&mut self, start: Pose) {
        let mut s = self.0.borrow_mut();
        s.stop();
        s.pose = start;
        s.restarts += 1;
    }
}

/// [`Odometry`] handle of a [`SimRobot`].
#[derive(Debug)]
pub struct SimOdometry(Shared);

impl Odometry for SimOdometry {
    fn reset(&mut self) {
        self.0.borrow_mut().travel = 0.0;
    }

    fn ticks(&mut self) -> i64 {
        self.0.borrow().travel.floor() as i64
    }
}

/// [`RateGyro`] handle of a [`SimRobot`].
#[derive(Debug)]
pub struct SimGyro(Shared);

impl RateGyro for SimGyro {
    fn angular_rate_dps(&mut self) -> f32 {
        let s = self.0.borrow();
        s.rate_dps as f32 + s.params.gyro_bias_dps
    }
}

/// [`Clock`] handle of a [`SimRobot`]. Each poll advances the world.
#[derive(Debug)]
pub struct SimClock(Shared);

impl Clock for SimClock {
    fn now_us(&mut self) -> u64 {
        let mut s = self.0.borrow_mut();
        s.step();
        s.now_us
    }
}
