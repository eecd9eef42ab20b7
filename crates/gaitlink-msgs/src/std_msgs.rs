//! Definitions from the ROS `std_msgs` package that gaitlink consumes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::builtin::Time;

/// Standard metadata carried by every stamped message.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Header {
    /// Monotonically increasing sequence number assigned by the publisher.
    pub seq: u32,
    /// Acquisition time of the data in this message.
    pub stamp: Time,
    /// Frame this data is associated with.
    pub frame_id: String,
}
