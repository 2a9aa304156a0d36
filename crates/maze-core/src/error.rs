//! Error types for the maze navigation engine, organized by subsystem:
//! grid, propagation, policy, motion, and storage.
//!
//! Sensing anomalies have no error type: a bad range reading at worst
//! adds or misses a wall bit and is tolerated silently.

use crate::cell::{Cell, Distance};
use crate::pose::{Action, Pose};
use thiserror::Error;

/// Errors from grid construction or checked cell access.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// Attempted to construct a grid with zero cells.
    #[error("grid must have at least one cell")]
    EmptyGrid,
    /// The requested side length cannot keep distances below the sentinel.
    #[error("grid side {side} exceeds maximum of {max}")]
    SideTooLarge {
        /// The requested side length.
        side: u32,
        /// The largest supported side length.
        max: u32,
    },
    /// A cell lies outside `[0, side)` on some axis.
    #[error("cell {cell} out of bounds for {side}x{side} grid")]
    CellOutOfBounds {
        /// The offending cell.
        cell: Cell,
        /// Side length of the grid.
        side: u32,
    },
}

/// Errors from a distance propagation run.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PropagatorError {
    /// The propagation target is not on the grid.
    #[error("target {target} is outside the grid")]
    TargetOutOfBounds {
        /// The requested target.
        target: Cell,
    },
    /// Relaxation did not settle within the configured number of passes.
    #[error("relaxation did not converge within {limit} passes")]
    PassLimitExceeded {
        /// The configured pass limit.
        limit: u32,
    },
}

/// Errors from the navigation policy: no legal action exists.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PolicyError {
    /// Every side of the current cell is walled or off the grid.
    #[error("cell {cell} is enclosed on all four sides")]
    Enclosed {
        /// The enclosed cell.
        cell: Cell,
    },
    /// Neither the current cell nor any reachable neighbour has a finite
    /// distance: the target cannot be reached with the walls known so far.
    #[error("cell {cell} is disconnected from the target")]
    Disconnected {
        /// The vehicle's cell.
        cell: Cell,
    },
    /// The current cell is strictly closer than every open neighbour.
    #[error("no neighbour of {cell} improves on distance {distance}")]
    NoDescent {
        /// The vehicle's cell.
        cell: Cell,
        /// The current cell's distance.
        distance: Distance,
    },
}

/// Errors from the motion executor.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MotionError {
    /// A bounded wait expired before the move was judged complete.
    ///
    /// The actuator has been stopped. `reached` is the pose after the
    /// segments that did complete (a finished turn updates the heading
    /// even if the following forward segment stalls).
    #[error("{action} stalled after {elapsed_us} us during {segment} (reached {reached})")]
    Stalled {
        /// The action being executed.
        action: Action,
        /// Which part of the action stalled.
        segment: MotionSegment,
        /// Time spent in the stalled segment, in microseconds.
        elapsed_us: u64,
        /// Pose after the last completed segment.
        reached: Pose,
    },
    /// The forward segment would leave the grid.
    #[error("advancing from {from} leaves the grid")]
    LeavesGrid {
        /// Pose the vehicle would advance from.
        from: Pose,
    },
}

/// The part of an action that was executing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionSegment {
    /// An in-place 90° rotation.
    Turn,
    /// The one-cell forward advance.
    Advance,
}

impl std::fmt::Display for MotionSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MotionSegment::Turn => f.write_str("turn"),
            MotionSegment::Advance => f.write_str("advance"),
        }
    }
}

/// Errors from the persistent storage collaborator or the map codec.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The storage device did not respond or rejected the access.
    #[error("storage unavailable at address {addr}")]
    Unavailable {
        /// Address being accessed.
        addr: usize,
    },
    /// The address is beyond the device capacity.
    #[error("address {addr} beyond storage capacity {capacity}")]
    OutOfRange {
        /// Address being accessed.
        addr: usize,
        /// Device capacity in bytes.
        capacity: usize,
    },
    /// A stored map carried a valid flag but failed validation.
    #[error("persisted map is corrupt: {reason}")]
    Corrupt {
        /// What failed validation.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::direction::Heading;

    #[test]
    fn messages_name_the_cell() {
        let e = PolicyError::Disconnected {
            cell: Cell::new(3, 4),
        };
        assert_eq!(e.to_string(), "cell (3, 4) is disconnected from the target");

        let e = GridError::CellOutOfBounds {
            cell: Cell::new(10, 0),
            side: 10,
        };
        assert_eq!(e.to_string(), "cell (10, 0) out of bounds for 10x10 grid");
    }

    #[test]
    fn stall_message_includes_segment() {
        let e = MotionError::Stalled {
            action: Action::TurnRight90,
            segment: MotionSegment::Advance,
            elapsed_us: 5_000_000,
            reached: Pose::new(Cell::new(0, 0), Heading::East),
        };
        assert_eq!(
            e.to_string(),
            "right stalled after 5000000 us during advance (reached (0, 0)@E)"
        );
    }
}
