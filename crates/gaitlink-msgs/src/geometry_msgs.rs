//! Definitions from the ROS `geometry_msgs` package that gaitlink consumes.
//!
//! Only the subset embedded in the swing and trajectory messages is defined;
//! this crate is a schema, not a geometry library.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::std_msgs::Header;

/// A free vector in 3D space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A [`Vector3`] with a reference frame and timestamp.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Vector3Stamped {
    pub header: Header,
    pub vector: Vector3,
}

/// A position in 3D space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A [`Point`] with a reference frame and timestamp.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PointStamped {
    pub header: Header,
    pub point: Point,
}

/// An orientation in quaternion form.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Quaternion {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        // Identity rotation.
        Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 }
    }
}

/// A rigid-body transform: translation plus rotation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Transform {
    pub translation: Vector3,
    pub rotation: Quaternion,
}

/// Linear and angular velocity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Twist {
    pub linear: Vector3,
    pub angular: Vector3,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quaternion_default_is_identity() {
        let q = Quaternion::default();
        assert_eq!(q.w, 1.0);
        assert_eq!((q.x, q.y, q.z), (0.0, 0.0, 0.0));
    }

    #[test]
    fn vector3_stamped_deserializes_from_wire_json() {
        let json = r#"{
            "header": {"frame_id": "odom"},
            "vector": {"x": 0.0, "y": 0.0, "z": 1.0}
        }"#;
        let v: Vector3Stamped = serde_json::from_str(json).unwrap();
        assert_eq!(v.header.frame_id, "odom");
        assert_eq!(v.vector.z, 1.0);
    }
}
