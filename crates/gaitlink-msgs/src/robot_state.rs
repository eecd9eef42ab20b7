//! The robot stance snapshot published on the robot-state topic.
//!
//! The preview panel retains the latest of these and hands it to the motion
//! synthesizer as the initial stance for the next goal.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::geometry_msgs::Point;
use crate::std_msgs::Header;

/// Current position of one foot, in the header frame of the owning message.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FootState {
    /// Limb identifier (e.g. `"LF_LEG"`).
    pub name: String,
    pub position: Point,
}

/// Snapshot of the robot's stance: where every foot currently is.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RobotState {
    pub header: Header,
    pub feet: Vec<FootState>,
}
