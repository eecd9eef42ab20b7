//! Sampled robot states and the batches the playback engine scrubs through.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::limb::Limb;
use crate::swing::Vec3;

/// Where the feet are at one instant, in `frame_id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Stance {
    pub frame_id: String,
    pub feet: BTreeMap<Limb, Vec3>,
}

impl Stance {
    /// A nominal square stance, used when no robot state has been seen yet.
    pub fn nominal(frame_id: impl Into<String>) -> Self {
        let mut feet = BTreeMap::new();
        feet.insert(Limb::LeftFore, Vec3::new(0.3, 0.2, 0.0));
        feet.insert(Limb::RightFore, Vec3::new(0.3, -0.2, 0.0));
        feet.insert(Limb::LeftHind, Vec3::new(-0.3, 0.2, 0.0));
        feet.insert(Limb::RightHind, Vec3::new(-0.3, -0.2, 0.0));
        Stance {
            frame_id: frame_id.into(),
            feet,
        }
    }
}

/// One sampled instant of a preview: batch time plus the stance at that time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PreviewState {
    /// Seconds from batch start.
    pub time: f64,
    pub feet: BTreeMap<Limb, Vec3>,
}

/// A precomputed, time-ordered run of preview states.
///
/// Produced once per goal by the motion synthesizer, then only read: the
/// playback engine scrubs a cursor across it and the panel derives its
/// slider bounds from [`StateBatch::start_time`] / [`StateBatch::end_time`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StateBatch {
    pub frame_id: String,
    /// States in ascending time order.
    pub states: Vec<PreviewState>,
}

impl StateBatch {
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Time of the first state, `0.0` when empty.
    pub fn start_time(&self) -> f64 {
        self.states.first().map(|state| state.time).unwrap_or(0.0)
    }

    /// Time of the last state, `0.0` when empty.
    pub fn end_time(&self) -> f64 {
        self.states.last().map(|state| state.time).unwrap_or(0.0)
    }

    /// The last state at or before `time`; the first state when `time`
    /// precedes the batch, `None` when the batch is empty.
    pub fn state_at(&self, time: f64) -> Option<&PreviewState> {
        let first = self.states.first()?;
        if time <= first.time {
            return Some(first);
        }
        self.states
            .iter()
            .take_while(|state| state.time <= time)
            .last()
    }
}
