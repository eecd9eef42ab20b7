//! Swing descriptions: one leg motion within a step.
//!
//! A [`SwingDescription`] names the limb it moves and holds exactly one
//! trajectory variant. The variant is a Rust enum, so "exactly one is set"
//! holds by construction rather than by convention.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::limb::Limb;

/// Profile kind used when the wire message leaves the field empty.
pub const DEFAULT_PROFILE_KIND: &str = "default";

/// A 3-component cartesian vector (meters, in the frame named alongside it).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vec3 { x, y, z }
    }

    /// Linear interpolation toward `other`; `alpha` outside `[0, 1]`
    /// extrapolates, callers clamp where that matters.
    pub fn lerp(self, other: Vec3, alpha: f64) -> Vec3 {
        Vec3 {
            x: self.x + (other.x - self.x) * alpha,
            y: self.y + (other.y - self.y) * alpha,
            z: self.z + (other.z - self.z) * alpha,
        }
    }
}

/// One sampled support point of a foot-space trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FootKnot {
    /// Seconds from swing start.
    pub time: f64,
    pub position: Vec3,
}

/// Foot-space trajectory: timed cartesian knots for one limb.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FootTrajectory {
    /// Frame the knot positions are expressed in.
    pub frame_id: String,
    /// Knots in ascending time order.
    pub knots: Vec<FootKnot>,
}

impl FootTrajectory {
    /// Time of the last knot, `0.0` when empty.
    pub fn duration(&self) -> f64 {
        self.knots.last().map(|knot| knot.time).unwrap_or(0.0)
    }
}

/// One sampled support point of a joint-space trajectory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct JointKnot {
    /// Seconds from swing start.
    pub time: f64,
    /// One position per joint name, in declaration order.
    pub positions: Vec<f64>,
}

/// Joint-space trajectory: named joints plus timed position rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct JointTrajectory {
    pub joint_names: Vec<String>,
    /// Knots in ascending time order; every row matches `joint_names` in length.
    pub knots: Vec<JointKnot>,
}

impl JointTrajectory {
    /// Time of the last knot, `0.0` when empty.
    pub fn duration(&self) -> f64 {
        self.knots.last().map(|knot| knot.time).unwrap_or(0.0)
    }
}

/// Parametrized swing: lift the foot toward a target over a fixed duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SwingProfile {
    /// Frame the target point is expressed in.
    pub target_frame: String,
    pub target: Vec3,
    /// Apex height above the higher of start and target, meters.
    pub height: f64,
    /// Seconds.
    pub duration: f64,
    /// Shape identifier, [`DEFAULT_PROFILE_KIND`] when the message left it empty.
    pub kind: String,
}

/// The one-of trajectory payload of a swing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum SwingTrajectory {
    FootTrajectory(FootTrajectory),
    JointTrajectory(JointTrajectory),
    Profile(SwingProfile),
}

impl SwingTrajectory {
    /// Nominal duration of the variant, seconds.
    pub fn duration(&self) -> f64 {
        match self {
            SwingTrajectory::FootTrajectory(trajectory) => trajectory.duration(),
            SwingTrajectory::JointTrajectory(trajectory) => trajectory.duration(),
            SwingTrajectory::Profile(profile) => profile.duration,
        }
    }
}

/// One leg motion: which limb, over what surface, along which trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SwingDescription {
    /// Wire branch identifier of the limb, e.g. `"LF_LEG"`.
    pub name: String,
    /// Frame the surface normal is expressed in.
    pub surface_normal_frame: String,
    pub surface_normal: Vec3,
    /// When set, the swing ends without expecting ground contact.
    pub no_touchdown: bool,
    pub trajectory: SwingTrajectory,
}

impl SwingDescription {
    /// Nominal duration of the swing, seconds.
    pub fn duration(&self) -> f64 {
        self.trajectory.duration()
    }

    /// The limb this swing moves, when the name is a known branch identifier.
    pub fn limb(&self) -> Option<Limb> {
        Limb::from_branch_id(&self.name)
    }
}
