//! Definitions from the ROS `trajectory_msgs` package that gaitlink consumes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::builtin::Duration;
use crate::geometry_msgs::{Transform, Twist};
use crate::std_msgs::Header;

/// A single knot on a joint-space trajectory.
///
/// All per-joint arrays are positional: entry `i` belongs to joint `i` of the
/// owning trajectory's `joint_names`. Arrays other than `positions` may be
/// empty when the publisher does not constrain them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct JointTrajectoryPoint {
    pub positions: Vec<f64>,
    pub velocities: Vec<f64>,
    pub accelerations: Vec<f64>,
    pub effort: Vec<f64>,
    /// Offset of this knot from the start of trajectory execution.
    pub time_from_start: Duration,
}

/// A joint-space trajectory: named joints plus an ordered knot sequence.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct JointTrajectory {
    pub header: Header,
    pub joint_names: Vec<String>,
    pub points: Vec<JointTrajectoryPoint>,
}

/// A single knot on a multi-DOF trajectory.
///
/// Entry `i` of each array belongs to joint `i` of the owning trajectory's
/// `joint_names`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MultiDofJointTrajectoryPoint {
    pub transforms: Vec<Transform>,
    pub velocities: Vec<Twist>,
    pub accelerations: Vec<Twist>,
    /// Offset of this knot from the start of trajectory execution.
    pub time_from_start: Duration,
}

/// A trajectory over joints whose state is a full rigid-body transform
/// rather than a scalar angle. Swing foot trajectories arrive in this form,
/// with one named "joint" per limb.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MultiDofJointTrajectory {
    pub header: Header,
    pub joint_names: Vec<String>,
    pub points: Vec<MultiDofJointTrajectoryPoint>,
}
