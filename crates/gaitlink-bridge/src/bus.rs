//! Headless publish/subscribe event bus.
//!
//! Uses a single [`tokio::sync::broadcast`] channel so that every subscriber
//! receives every event without any single subscriber blocking the others,
//! and so that all subscribers observe the same arrival order. The front
//! ends depend on that ordering: a feedback message must never overtake the
//! goal that started it.
//!
//! Subscribers filter by payload variant (and, for wire traffic, by the
//! originating topic carried in [`Event::source`]); uninteresting events are
//! skipped, not routed around.

use chrono::{DateTime, Utc};
use gaitlink_core::{GaitError, MonitorSnapshot, NavCommand, PlaybackCommand, PreviewSnapshot};
use gaitlink_msgs::{ExecuteStepsFeedback, ExecuteStepsGoal, ExecuteStepsResult, RobotState};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::warn;
use uuid::Uuid;

/// Default channel capacity (number of buffered events before old ones are
/// dropped for slow subscribers).
const DEFAULT_CAPACITY: usize = 256;

/// Unified event wrapper for the internal bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    /// The wire topic for ingested traffic (e.g. `"/free_gait/goal"`),
    /// a `crate::module` path for internally produced events.
    pub source: String,
    pub payload: BusPayload,
}

impl Event {
    pub fn new(source: impl Into<String>, payload: BusPayload) -> Self {
        Event {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            source: source.into(),
            payload,
        }
    }
}

/// Variants of data that travel over the bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BusPayload {
    /// A step-execution goal arrived on a goal topic.
    Goal(ExecuteStepsGoal),
    /// Action feedback arrived on the feedback topic.
    Feedback(ExecuteStepsFeedback),
    /// An action result arrived on the result topic.
    Result(ExecuteStepsResult),
    /// A robot-state sample arrived on the robot-state topic.
    RobotState(RobotState),
    /// A user playback control, addressed to the preview panel.
    Playback(PlaybackCommand),
    /// A user history-navigation control, addressed to the monitor.
    Nav(NavCommand),
    /// The monitor's current projection, for any listening dashboard.
    MonitorSnapshot(MonitorSnapshot),
    /// The preview panel's current projection, for any listening dashboard.
    PreviewSnapshot(PreviewSnapshot),
}

/// Shared event bus. Clone it cheaply – all clones share the same underlying
/// broadcast channel.
#[derive(Clone, Debug)]
pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a new bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish `event` to every current subscriber.
    ///
    /// Returns the number of active receivers that were handed the event, or
    /// [`GaitError::Channel`] when nobody is listening.
    pub fn publish(&self, event: Event) -> Result<usize, GaitError> {
        self.sender
            .send(event)
            .map_err(|e| GaitError::Channel(format!("event bus send error: {e}")))
    }

    /// Subscribe to all events on the bus.
    ///
    /// The returned [`BusReceiver`] skips over lag gaps with a warning so
    /// that a slow subscriber degrades instead of stalling.
    pub fn subscribe(&self) -> BusReceiver {
        BusReceiver {
            receiver: self.sender.subscribe(),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// An async receiver over the bus with built-in lag handling.
pub struct BusReceiver {
    receiver: broadcast::Receiver<Event>,
}

impl BusReceiver {
    /// Wait for the next event.
    ///
    /// Returns `None` when the bus has shut down and no further events will
    /// arrive. A lagged subscriber logs the number of dropped events and
    /// keeps receiving from the oldest retained one.
    pub async fn recv(&mut self) -> Option<Event> {
        loop {
            match self.receiver.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(lagged_by = n, "bus subscriber lagged");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Non-blocking receive, for tests and draining.
    pub fn try_recv(&mut self) -> Result<Event, broadcast::error::TryRecvError> {
        self.receiver.try_recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaitlink_core::PlaybackCommand;

    fn make_event(source: &str) -> Event {
        Event::new(source, BusPayload::Playback(PlaybackCommand::Play))
    }

    #[tokio::test]
    async fn publish_and_receive() -> Result<(), Box<dyn std::error::Error>> {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let event = make_event("gaitlink-bridge::test");
        bus.publish(event.clone())?;

        let received = rx.recv().await.ok_or("bus closed")?;
        assert_eq!(received.id, event.id);
        assert_eq!(received.source, event.source);
        Ok(())
    }

    #[tokio::test]
    async fn multiple_subscribers_receive_same_event() -> Result<(), Box<dyn std::error::Error>> {
        let bus = EventBus::default();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        let event = make_event("/free_gait/goal");
        bus.publish(event.clone())?;

        assert_eq!(rx1.recv().await.ok_or("closed")?.id, event.id);
        assert_eq!(rx2.recv().await.ok_or("closed")?.id, event.id);
        Ok(())
    }

    #[tokio::test]
    async fn subscribers_observe_arrival_order() -> Result<(), Box<dyn std::error::Error>> {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        let first = make_event("first");
        let second = make_event("second");
        bus.publish(first.clone())?;
        bus.publish(second.clone())?;

        assert_eq!(rx.recv().await.ok_or("closed")?.id, first.id);
        assert_eq!(rx.recv().await.ok_or("closed")?.id, second.id);
        Ok(())
    }

    #[test]
    fn publish_no_subscribers_returns_error() {
        let bus = EventBus::default();
        let result = bus.publish(make_event("test"));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn slow_subscriber_skips_lag_gap_instead_of_stalling() {
        let bus = EventBus::new(4);
        let mut slow = bus.subscribe();

        for _ in 0..64 {
            let _ = bus.publish(make_event("flood"));
        }

        // The wrapper swallows the Lagged error and hands out the oldest
        // retained event.
        let received = slow.recv().await;
        assert!(received.is_some());
    }
}
