//! Shared primitive types used across the whole crate.

/// An angle in radians. Wheel angles are cumulative and unbounded.
pub type Radians = f64;

/// A host timestamp in milliseconds (same clock as the frame scheduler).
pub type Millis = f64;

/// A stable identifier for one spin, carried from start to winner.
pub type SpinId = String;

/// Full turn in radians.
pub const TAU: Radians = std::f64::consts::TAU;
