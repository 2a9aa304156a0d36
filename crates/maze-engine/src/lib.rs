//! Maze run engine: decision making, motion, persistence and the run
//! state machine.
//!
//! [`RunController`] is the entry point. It owns a [`GridMap`], the
//! vehicle pose and the hardware collaborators, and advances one control
//! cycle per [`step()`](RunController::step):
//!
//! - [`NavigationPolicy`] picks the next [`Action`] from the distance field.
//! - [`MotionExecutor`] performs it with bounded busy-waits.
//! - [`MapStore`] persists the explored map so a later run can skip
//!   exploration.
//!
//! Configuration comes from [`NavConfig`], usually parsed from TOML.
//!
//! [`GridMap`]: maze_grid::GridMap
//! [`Action`]: maze_core::Action

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod controller;
pub mod metrics;
pub mod motion;
pub mod persist;
pub mod policy;

pub use config::{ConfigError, NavConfig};
pub use controller::{Hardware, RunController, RunError, RunReport};
pub use metrics::RunMetrics;
pub use motion::{MotionExecutor, MotionLimits, SpeedProfile};
pub use persist::{MapStore, StorageLayout, VALID_FLAG};
pub use policy::{select_action, NavigationPolicy, NeighbourDistances};
