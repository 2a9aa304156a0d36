//! Run configuration, validation, and error types.
//!
//! [`NavConfig`] is the input for constructing a
//! [`RunController`](crate::RunController). Every field has a default, so
//! a TOML file only needs the values it changes:
//!
//! ```toml
//! side = 16
//! goal = { x = 7, y = 7 }
//! wall_threshold_cm = 12.5
//!
//! [storage]
//! map_addr = 16
//! ```
//!
//! [`validate()`](NavConfig::validate) checks structural invariants at
//! startup; the controller calls it before touching any hardware.

use crate::motion::{MotionLimits, SpeedProfile};
use crate::persist::StorageLayout;
use maze_core::{Cell, Heading};
use maze_grid::GridMap;
use serde::Deserialize;
use thiserror::Error;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while parsing or validating a [`NavConfig`].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The TOML text could not be parsed into a configuration.
    #[error("configuration parse error: {reason}")]
    Parse {
        /// Parser message.
        reason: String,
    },
    /// Grid side is 0 or above [`GridMap::MAX_SIDE`].
    #[error("grid side {side} is outside 1..={max}")]
    InvalidSide {
        /// The configured side.
        side: u32,
        /// Largest allowed side.
        max: u32,
    },
    /// The start or goal cell is off the grid.
    #[error("{which} cell {cell} is outside the {side}x{side} grid")]
    CellOutsideGrid {
        /// `"start"` or `"goal"`.
        which: &'static str,
        /// The configured cell.
        cell: Cell,
        /// The configured side.
        side: u32,
    },
    /// Wall threshold is NaN, infinite, zero, or negative.
    #[error("wall threshold {value} cm must be finite and positive")]
    InvalidThreshold {
        /// The invalid value.
        value: f32,
    },
    /// A speed is outside `(0, 1]`.
    #[error("{name} {value} is outside (0, 1]")]
    InvalidSpeed {
        /// Which speed.
        name: &'static str,
        /// The invalid value.
        value: f32,
    },
    /// `cell_ticks` is zero.
    #[error("cell_ticks must be positive")]
    ZeroCellTicks,
    /// A motion timeout is zero.
    #[error("{name} must be positive")]
    ZeroTimeout {
        /// Which timeout.
        name: &'static str,
    },
    /// `max_cycles` is zero.
    #[error("max_cycles must be positive")]
    ZeroCycleLimit,
    /// The storage flag byte lies inside the map bytes.
    #[error("storage flag at {flag_addr} overlaps map bytes {map_start}..{map_end}")]
    StorageOverlap {
        /// Configured flag address.
        flag_addr: usize,
        /// First map address.
        map_start: usize,
        /// One past the last map address.
        map_end: usize,
    },
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse {
            reason: e.to_string(),
        }
    }
}

// ── NavConfig ──────────────────────────────────────────────────────

/// Complete configuration of one navigation run.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NavConfig {
    /// Grid side length. Default: 10.
    pub side: u32,
    /// Start cell. Default: `(0, 0)`.
    pub start: Cell,
    /// Goal cell. Default: `(9, 9)`.
    pub goal: Cell,
    /// Heading at the start cell. Default: North.
    pub start_heading: Heading,
    /// Readings below this are walls, in centimeters. Default: 15.0.
    pub wall_threshold_cm: f32,
    /// Odometry ticks per cell. Default: 200.
    pub cell_ticks: u32,
    /// Stationary gyro samples averaged into the bias. Default: 200.
    pub gyro_calibration_samples: u32,
    /// Drive speed while exploring. Default: 0.6.
    pub explore_speed: f32,
    /// Drive speed on the fast run. Default: 0.9.
    pub fast_speed: f32,
    /// Turn speed in both phases. Default: 0.5.
    pub turn_speed: f32,
    /// Longest a one-cell advance may take. Default: 5000.
    pub move_timeout_ms: u64,
    /// Longest a quarter turn may take. Default: 5000.
    pub turn_timeout_ms: u64,
    /// Mark South and West walls at the start cell. Default: false.
    pub start_enclosure: bool,
    /// Skip exploration when a valid persisted map exists. Default: true.
    pub reuse_persisted_map: bool,
    /// Control cycles before [`run()`](crate::RunController::run) gives
    /// up. Default: 10 000.
    pub max_cycles: u64,
    /// Persisted map location.
    pub storage: StorageLayout,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            side: 10,
            start: Cell::new(0, 0),
            goal: Cell::new(9, 9),
            start_heading: Heading::North,
            wall_threshold_cm: 15.0,
            cell_ticks: 200,
            gyro_calibration_samples: 200,
            explore_speed: 0.6,
            fast_speed: 0.9,
            turn_speed: 0.5,
            move_timeout_ms: 5_000,
            turn_timeout_ms: 5_000,
            start_enclosure: false,
            reuse_persisted_map: true,
            max_cycles: 10_000,
            storage: StorageLayout::default(),
        }
    }
}

impl NavConfig {
    /// Parse TOML text and validate the result.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: NavConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check structural invariants. Returns the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.side == 0 || self.side > GridMap::MAX_SIDE {
            return Err(ConfigError::InvalidSide {
                side: self.side,
                max: GridMap::MAX_SIDE,
            });
        }
        for (which, cell) in [("start", self.start), ("goal", self.goal)] {
            if cell.x >= self.side || cell.y >= self.side {
                return Err(ConfigError::CellOutsideGrid {
                    which,
                    cell,
                    side: self.side,
                });
            }
        }
        if !self.wall_threshold_cm.is_finite() || self.wall_threshold_cm <= 0.0 {
            return Err(ConfigError::InvalidThreshold {
                value: self.wall_threshold_cm,
            });
        }
        for (name, value) in [
            ("explore_speed", self.explore_speed),
            ("fast_speed", self.fast_speed),
            ("turn_speed", self.turn_speed),
        ] {
            // NaN fails both comparisons.
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConfigError::InvalidSpeed { name, value });
            }
        }
        if self.cell_ticks == 0 {
            return Err(ConfigError::ZeroCellTicks);
        }
        if self.move_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout {
                name: "move_timeout_ms",
            });
        }
        if self.turn_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout {
                name: "turn_timeout_ms",
            });
        }
        if self.max_cycles == 0 {
            return Err(ConfigError::ZeroCycleLimit);
        }
        if self.storage.overlaps(self.side) {
            let range = self.storage.map_range(self.side);
            return Err(ConfigError::StorageOverlap {
                flag_addr: self.storage.flag_addr,
                map_start: range.start,
                map_end: range.end,
            });
        }
        Ok(())
    }

    /// Busy-wait bounds for the motion executor.
    pub fn motion_limits(&self) -> MotionLimits {
        MotionLimits {
            move_timeout_us: self.move_timeout_ms.saturating_mul(1_000),
            turn_timeout_us: self.turn_timeout_ms.saturating_mul(1_000),
        }
    }

    /// Speeds used while exploring.
    pub fn explore_profile(&self) -> SpeedProfile {
        SpeedProfile {
            drive: self.explore_speed,
            turn: self.turn_speed,
        }
    }

    /// Speeds used on the fast run.
    pub fn fast_profile(&self) -> SpeedProfile {
        SpeedProfile {
            drive: self.fast_speed,
            turn: self.turn_speed,
        }
    }
}
