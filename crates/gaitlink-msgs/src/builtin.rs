//! Time primitives matching the `builtin_interfaces` wire layout.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A point in time as carried on the wire: whole seconds plus nanoseconds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Time {
    pub sec: u32,
    pub nsec: u32,
}

impl Time {
    pub const ZERO: Time = Time { sec: 0, nsec: 0 };

    /// Convert to floating-point seconds.
    pub fn to_secs_f64(self) -> f64 {
        f64::from(self.sec) + f64::from(self.nsec) * 1e-9
    }
}

/// A signed span of time: whole seconds plus nanoseconds.
///
/// Trajectory points carry their offset from the trajectory start as a
/// `Duration` in the `time_from_start` field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Duration {
    pub sec: i32,
    pub nsec: i32,
}

impl Duration {
    pub const ZERO: Duration = Duration { sec: 0, nsec: 0 };

    /// Convert to floating-point seconds.
    pub fn to_secs_f64(self) -> f64 {
        f64::from(self.sec) + f64::from(self.nsec) * 1e-9
    }

    /// Build a `Duration` from floating-point seconds, truncating sub-nanosecond
    /// precision.
    pub fn from_secs_f64(secs: f64) -> Self {
        let sec = secs.trunc() as i32;
        let nsec = ((secs - secs.trunc()) * 1e9).round() as i32;
        Self { sec, nsec }
    }
}
