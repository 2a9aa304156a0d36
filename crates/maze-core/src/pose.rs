//! Vehicle pose, discrete actions, and run phases.

use crate::cell::Cell;
use crate::direction::{Heading, Relative};
use std::fmt;

/// Where the vehicle is and which way it faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Pose {
    /// Current cell.
    pub cell: Cell,
    /// Current absolute heading.
    pub heading: Heading,
}

impl Pose {
    /// Create a pose.
    pub const fn new(cell: Cell, heading: Heading) -> Self {
        Self { cell, heading }
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.cell, self.heading)
    }
}

/// One discrete move decision.
///
/// Every action ends with the vehicle advancing exactly one cell; the
/// turn variants rotate in place first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Advance one cell along the current heading.
    Forward,
    /// Rotate 90° counter-clockwise, then advance.
    TurnLeft90,
    /// Rotate 90° clockwise, then advance.
    TurnRight90,
    /// Rotate 180° (two clockwise quarter turns), then advance.
    TurnAround180,
}

impl Action {
    /// The action that leaves the vehicle moving toward `relative`.
    pub const fn toward(relative: Relative) -> Self {
        match relative {
            Relative::Front => Action::Forward,
            Relative::Left => Action::TurnLeft90,
            Relative::Right => Action::TurnRight90,
            Relative::Back => Action::TurnAround180,
        }
    }

    /// Signed quarter turns performed before advancing (clockwise positive).
    pub const fn quarter_turns(self) -> i8 {
        match self {
            Action::Forward => 0,
            Action::TurnLeft90 => -1,
            Action::TurnRight90 => 1,
            Action::TurnAround180 => 2,
        }
    }

    /// Heading the vehicle travels along after performing this action.
    pub const fn heading_after(self, heading: Heading) -> Heading {
        heading.turned(self.quarter_turns())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Forward => "forward",
            Action::TurnLeft90 => "left",
            Action::TurnRight90 => "right",
            Action::TurnAround180 => "around",
        };
        f.write_str(name)
    }
}

/// Phase of the two-run state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunPhase {
    /// Sensing and mapping while driving toward the goal.
    Exploring,
    /// Goal reached; the map is persisted and the fast run is prepared.
    GoalReached,
    /// Driving the known map toward the goal without sensing.
    FastRun,
    /// Terminal. Actuation is halted.
    Done,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunPhase::Exploring => "exploring",
            RunPhase::GoalReached => "goal-reached",
            RunPhase::FastRun => "fast-run",
            RunPhase::Done => "done",
        };
        f.write_str(name)
    }
}
