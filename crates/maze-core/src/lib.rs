//! Core types and traits for the maze navigation engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the workspace: cell
//! identity, headings and relative directions, wall masks, poses and
//! actions, error types, and the collaborator traits through which the
//! engine reaches sensors, actuators and storage.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod direction;
pub mod error;
pub mod pose;
pub mod traits;
pub mod walls;

pub use cell::{Cell, Distance, MAX_DISTANCE};
pub use direction::{relative_of, rotate, Heading, Relative};
pub use error::{
    GridError, MotionError, MotionSegment, PolicyError, PropagatorError, StorageError,
};
pub use pose::{Action, Pose, RunPhase};
pub use traits::{ByteStorage, Clock, DriveActuator, Mount, Odometry, RangeSensor, RateGyro};
pub use walls::WallMask;
