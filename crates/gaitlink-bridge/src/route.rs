//! Topic routing: which wire topic feeds which message lane.
//!
//! The [`SubscriptionTable`] is the bridge's only mutable shared state. The
//! preview panel and the monitor register the topics they care about; the
//! [`FrameRouter`] consults the table for every incoming frame and drops
//! whatever is not mapped. Removing an entry is how a subscription is
//! cancelled – further frames on that topic simply stop being delivered.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde_json::Value;
use tracing::{debug, warn};

use crate::bus::{BusPayload, Event, EventBus};
use gaitlink_msgs::{
    ExecuteStepsFeedback, ExecuteStepsGoal, ExecuteStepsResult, RobotState,
};

/// The kind of message a subscribed topic carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lane {
    Goal,
    Feedback,
    Result,
    RobotState,
}

/// Shared topic → [`Lane`] map. Clone-cheap via [`Arc`]; reads dominate.
#[derive(Debug, Default)]
pub struct SubscriptionTable {
    inner: RwLock<HashMap<String, Lane>>,
}

impl SubscriptionTable {
    pub fn new() -> Arc<Self> {
        Arc::new(SubscriptionTable::default())
    }

    /// Map `topic` to `lane`, replacing any previous mapping for that topic.
    pub fn subscribe(&self, topic: impl Into<String>, lane: Lane) {
        let topic = topic.into();
        debug!(topic = %topic, lane = ?lane, "topic subscribed");
        self.write().insert(topic, lane);
    }

    /// Remove the mapping for `topic`. Returns whether one existed.
    pub fn unsubscribe(&self, topic: &str) -> bool {
        let removed = self.write().remove(topic).is_some();
        if removed {
            debug!(topic = %topic, "topic unsubscribed");
        }
        removed
    }

    /// The lane `topic` feeds, if any.
    pub fn lane_for(&self, topic: &str) -> Option<Lane> {
        self.read().get(topic).copied()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, HashMap<String, Lane>> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, HashMap<String, Lane>> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Parses rosbridge-style text frames and feeds mapped ones onto the bus.
///
/// A frame is `{"op":"publish","topic":"/...","msg":{...}}`. Everything
/// else – other ops, unmapped topics, payloads that do not deserialize as
/// the lane's message type – is dropped without propagating an error, which
/// is the whole error policy of a display layer.
#[derive(Clone)]
pub struct FrameRouter {
    bus: Arc<EventBus>,
    table: Arc<SubscriptionTable>,
}

impl FrameRouter {
    pub fn new(bus: Arc<EventBus>, table: Arc<SubscriptionTable>) -> Self {
        Self { bus, table }
    }

    /// Handle one incoming text frame.
    pub fn route_text(&self, text: &str) {
        let Ok(frame) = serde_json::from_str::<Value>(text) else {
            debug!("dropping frame that is not JSON");
            return;
        };

        let op = frame.get("op").and_then(|v| v.as_str()).unwrap_or("");
        if op != "publish" {
            return;
        }
        let Some(topic) = frame.get("topic").and_then(|t| t.as_str()) else {
            return;
        };
        let Some(lane) = self.table.lane_for(topic) else {
            debug!(topic = %topic, "dropping frame on unmapped topic");
            return;
        };
        let msg = frame.get("msg").cloned().unwrap_or(Value::Null);

        let payload = match lane {
            Lane::Goal => serde_json::from_value::<ExecuteStepsGoal>(msg).map(BusPayload::Goal),
            Lane::Feedback => {
                serde_json::from_value::<ExecuteStepsFeedback>(msg).map(BusPayload::Feedback)
            }
            Lane::Result => {
                serde_json::from_value::<ExecuteStepsResult>(msg).map(BusPayload::Result)
            }
            Lane::RobotState => {
                serde_json::from_value::<RobotState>(msg).map(BusPayload::RobotState)
            }
        };

        match payload {
            Ok(payload) => {
                let _ = self.bus.publish(Event::new(topic, payload));
            }
            Err(e) => {
                warn!(topic = %topic, error = %e, "dropping malformed message");
            }
        }
    }
}
