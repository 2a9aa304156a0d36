//! Range readings to wall bits.

use maze_core::{rotate, Mount, Pose, RangeSensor, Relative, WallMask};
use maze_grid::GridMap;

/// One set of range readings, relative to the vehicle heading, in
/// centimeters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RangeReadings {
    /// Front sensor.
    pub front: f32,
    /// Left sensor.
    pub left: f32,
    /// Right sensor.
    pub right: f32,
    /// Rear reading, if any. The vehicle has no rear sensor, so this is
    /// normally `None`, which reads as open.
    pub rear: Option<f32>,
}

impl RangeReadings {
    /// Sample the three mounted sensors once.
    pub fn sample<S: RangeSensor + ?Sized>(sensor: &mut S) -> Self {
        Self {
            front: sensor.measure_cm(Mount::Front),
            left: sensor.measure_cm(Mount::Left),
            right: sensor.measure_cm(Mount::Right),
            rear: None,
        }
    }

    /// Reading for a relative direction.
    pub fn get(&self, relative: Relative) -> Option<f32> {
        match relative {
            Relative::Front => Some(self.front),
            Relative::Right => Some(self.right),
            Relative::Back => self.rear,
            Relative::Left => Some(self.left),
        }
    }
}

/// Thresholds range readings into wall bits on the current cell and its
/// neighbours.
///
/// A reading strictly below `threshold_cm` is a wall. Non-finite and
/// negative readings are sensing anomalies and read as open; the map can
/// only gain walls, so an anomaly at worst delays discovering one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallObserver {
    threshold_cm: f32,
}

impl WallObserver {
    /// Observer with the given detection threshold.
    pub fn new(threshold_cm: f32) -> Self {
        Self { threshold_cm }
    }

    /// Detection threshold in centimeters.
    pub fn threshold_cm(&self) -> f32 {
        self.threshold_cm
    }

    /// Whether a single reading indicates a wall.
    pub fn is_wall(&self, reading_cm: f32) -> bool {
        reading_cm.is_finite() && reading_cm >= 0.0 && reading_cm < self.threshold_cm
    }

    /// Merge the walls seen from `pose` into `grid`.
    ///
    /// Each detected wall is rotated into an absolute heading and set on
    /// the current cell, plus the reciprocal bit on the neighbour when
    /// one exists. Returns the detected walls as an absolute mask, whether
    /// or not they were already known.
    pub fn observe(&self, grid: &mut GridMap, pose: Pose, readings: RangeReadings) -> WallMask {
        let mut seen = WallMask::EMPTY;
        for relative in [Relative::Front, Relative::Right, Relative::Back, Relative::Left] {
            let Some(reading) = readings.get(relative) else {
                continue;
            };
            if self.is_wall(reading) {
                let heading = rotate(relative, pose.heading);
                grid.add_wall(pose.cell, heading);
                seen |= WallMask::single(heading);
            }
        }
        seen
    }
}
