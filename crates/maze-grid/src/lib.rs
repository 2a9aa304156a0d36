//! Grid map storage for the maze navigation engine.
//!
//! This crate defines [`GridMap`], the single owned structure holding a
//! wall mask and a propagated distance per cell, together with the
//! reciprocity checker that guards its wall invariants and an ASCII
//! renderer for log output.
//!
//! # Invariants
//!
//! - Outer-boundary bits are set at construction and never cleared.
//! - Walls only accumulate (OR-merge); no API clears a bit.
//! - [`GridMap::add_wall`] keeps both sides of a shared wall in step;
//!   [`check_reciprocity`] verifies the whole grid.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod grid;
pub mod invariants;
pub mod render;

pub use grid::GridMap;
pub use invariants::{check_reciprocity, ReciprocityViolation};
pub use render::render_ascii;
