//! Collaborator traits: the semantic boundary to the vehicle hardware.
//!
//! The engine never touches pins, registers or buses. It consumes the
//! results these traits provide (a distance in centimeters, an angular
//! rate, a tick count, a stored byte) and issues wheel speed commands.
//! All calls are synchronous and blocking.

use crate::error::StorageError;
use crate::pose::Pose;

/// Fixed mounting position of a ranging sensor. There is no rear sensor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mount {
    /// Facing along the vehicle heading.
    Front,
    /// Facing 90° counter-clockwise from the heading.
    Left,
    /// Facing 90° clockwise from the heading.
    Right,
}

/// Distance-to-obstacle sensor bank.
pub trait RangeSensor {
    /// Measure the distance to the nearest obstacle from `mount`, in
    /// centimeters. Out-of-range or failed readings may be any value,
    /// including non-finite ones.
    fn measure_cm(&mut self, mount: Mount) -> f32;
}

/// Yaw-rate sensor.
pub trait RateGyro {
    /// Raw yaw rate in degrees per second, clockwise positive. Includes
    /// the sensor's static bias; the motion executor subtracts it.
    fn angular_rate_dps(&mut self) -> f32;
}

/// Wheel odometry.
pub trait Odometry {
    /// Zero the tick counter.
    fn reset(&mut self);

    /// Signed ticks since the last [`reset`](Odometry::reset).
    fn ticks(&mut self) -> i64;
}

/// Differential drive.
///
/// Speeds are normalized to `[-1.0, 1.0]`. Equal speeds drive straight;
/// equal magnitude with opposite signs rotates in place.
pub trait DriveActuator {
    /// Command both wheel speeds.
    fn drive(&mut self, left: f32, right: f32);

    /// Halt both wheels.
    fn stop(&mut self);

    /// The vehicle is returned to `start` between runs (a stop and
    /// restart, not a driven move). Hardware that relies on an operator
    /// to reposition it keeps the default, which does nothing.
    fn restart_at(&mut self, start: Pose) {
        let _ = start;
    }
}

/// Byte-addressed non-volatile storage (EEPROM-like).
pub trait ByteStorage {
    /// Read one byte.
    fn read_byte(&mut self, addr: usize) -> Result<u8, StorageError>;

    /// Write one byte.
    fn write_byte(&mut self, addr: usize, byte: u8) -> Result<(), StorageError>;
}

/// Monotonic time source used for bounded busy-waits and rate integration.
pub trait Clock {
    /// Microseconds since an arbitrary fixed epoch.
    fn now_us(&mut self) -> u64;
}

impl<T: RangeSensor + ?Sized> RangeSensor for &mut T {
    fn measure_cm(&mut self, mount: Mount) -> f32 {
        (**self).measure_cm(mount)
    }
}

impl<T: ByteStorage + ?Sized> ByteStorage for &mut T {
    fn read_byte(&mut self, addr: usize) -> Result<u8, StorageError> {
        (**self).read_byte(addr)
    }

    fn write_byte(&mut self, addr: usize, byte: u8) -> Result<(), StorageError> {
        (**self).write_byte(addr, byte)
    }
}
