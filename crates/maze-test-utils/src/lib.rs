//! Test utilities for maze engine development.
//!
//! - [`MazeLayout`]: ground-truth walls (ASCII-parsed, open, or a seeded
//!   random perfect maze).
//! - [`SimRobot`]: a simulated vehicle implementing every collaborator
//!   trait against a layout.
//! - [`MemoryStorage`]: byte storage with failure injection.
//! - [`reference_bfs`]: oracle distances for propagator tests.
//! - [`strategies`]: proptest strategies.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod bfs;
pub mod layout;
pub mod sim;
pub mod storage;
pub mod strategies;

pub use bfs::reference_bfs;
pub use layout::MazeLayout;
pub use sim::{SimClock, SimDrive, SimGyro, SimOdometry, SimParams, SimRanger, SimRobot};
pub use storage::MemoryStorage;
