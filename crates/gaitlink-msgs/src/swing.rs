//! The swing-description message and its profile sub-message.
//!
//! A `SwingData` message describes the motion of one limb during one step.
//! Exactly one of its three trajectory sub-messages is meaningful; the
//! others arrive as empty defaults. Which one applies is declared by the
//! `type` field, or – when that is left empty – inferred by the converter in
//! `gaitlink-bridge`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::geometry_msgs::{PointStamped, Vector3Stamped};
use crate::trajectory_msgs::{JointTrajectory, MultiDofJointTrajectory};

/// Wire value of [`SwingData::swing_type`] selecting the foot-space variant.
pub const SWING_TYPE_FOOT_TRAJECTORY: &str = "foot_trajectory";
/// Wire value of [`SwingData::swing_type`] selecting the joint-space variant.
pub const SWING_TYPE_JOINT_TRAJECTORY: &str = "joint_trajectory";
/// Wire value of [`SwingData::swing_type`] selecting the parametrized profile.
pub const SWING_TYPE_PROFILE: &str = "profile";

/// A parametrized swing: lift the foot over an apex and set it down on a
/// target, leaving the actual trajectory shape to the motion core.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SwingProfile {
    /// Desired touchdown position, with its reference frame in the header.
    pub target: PointStamped,
    /// Apex height over the higher of lift-off and touchdown, in meters.
    pub height: f64,
    /// Nominal swing duration in seconds.
    pub duration: f64,
    /// Profile shape identifier; empty selects the core's default shape.
    #[serde(rename = "type")]
    pub profile_type: String,
}

/// Complete description of one limb's swing within a step.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SwingData {
    /// Name of the limb this swing belongs to (e.g. `"LF_LEG"`).
    pub name: String,
    /// Surface normal at the touchdown point, with its reference frame.
    pub surface_normal: Vector3Stamped,
    /// When set, the step ends without establishing ground contact.
    pub no_touchdown: bool,
    /// Explicit trajectory variant selector; empty means "infer".
    #[serde(rename = "type")]
    pub swing_type: String,
    /// Foot-space trajectory (one multi-DOF column per limb name).
    pub foot_trajectory: MultiDofJointTrajectory,
    /// Joint-space trajectory for the limb's actuated joints.
    pub joint_trajectory: JointTrajectory,
    /// Parametrized profile fallback.
    pub profile: SwingProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_swing_data_is_empty() {
        let swing = SwingData::default();
        assert!(swing.name.is_empty());
        assert!(swing.swing_type.is_empty());
        assert!(!swing.no_touchdown);
        assert!(swing.foot_trajectory.joint_names.is_empty());
        assert!(swing.joint_trajectory.joint_names.is_empty());
    }

    #[test]
    fn swing_data_deserializes_from_wire_json() {
        let json = r#"{
            "name": "LF_LEG",
            "surface_normal": {
                "header": {"frame_id": "map"},
                "vector": {"x": 0.0, "y": 0.0, "z": 1.0}
            },
            "no_touchdown": true,
            "type": "profile",
            "profile": {
                "target": {"header": {"frame_id": "map"}, "point": {"x": 0.3, "y": 0.2, "z": 0.0}},
                "height": 0.06,
                "duration": 0.8,
                "type": "square"
            }
        }"#;
        let swing: SwingData = serde_json::from_str(json).unwrap();
        assert_eq!(swing.name, "LF_LEG");
        assert_eq!(swing.surface_normal.header.frame_id, "map");
        assert!(swing.no_touchdown);
        assert_eq!(swing.swing_type, SWING_TYPE_PROFILE);
        assert_eq!(swing.profile.profile_type, "square");
        assert!((swing.profile.duration - 0.8).abs() < 1e-12);
    }

    #[test]
    fn profile_type_field_round_trips_as_type() {
        let profile = SwingProfile {
            profile_type: "triangle".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&profile).unwrap();
        assert!(json.contains(r#""type":"triangle""#));
        let back: SwingProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }
}
