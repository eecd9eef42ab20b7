//! The monitor task: one loop owning the model, fed entirely by the bus.

use std::sync::Arc;

use gaitlink_bridge::bus::{BusPayload, Event, EventBus};
use gaitlink_bridge::route::{Lane, SubscriptionTable};
use tracing::info;

use crate::model::ExecutionMonitor;

/// The three wire topics of one step-execution action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTopics {
    pub goal: String,
    pub feedback: String,
    pub result: String,
}

/// Derive the goal/feedback/result topic names from an action namespace.
pub fn action_topics(namespace: &str) -> ActionTopics {
    let namespace = namespace.trim_end_matches('/');
    ActionTopics {
        goal: format!("{namespace}/goal"),
        feedback: format!("{namespace}/feedback"),
        result: format!("{namespace}/result"),
    }
}

/// Run the execution monitor against the bus until the bus closes.
///
/// Wires the action topics into the routing table, then folds every matching
/// event into the model and publishes a snapshot after each change. History
/// navigation is accepted from any source.
pub async fn run_monitor(
    bus: Arc<EventBus>,
    table: Arc<SubscriptionTable>,
    mut monitor: ExecutionMonitor,
    topics: ActionTopics,
) {
    // Subscribe before wiring the topics so no routed frame can be missed.
    let mut rx = bus.subscribe();
    table.subscribe(&topics.goal, Lane::Goal);
    table.subscribe(&topics.feedback, Lane::Feedback);
    table.subscribe(&topics.result, Lane::Result);
    publish_snapshot(&bus, &monitor);

    info!(
        goal_topic = %topics.goal,
        feedback_topic = %topics.feedback,
        result_topic = %topics.result,
        "monitor task running"
    );

    loop {
        let Some(event) = rx.recv().await else {
            break;
        };
        match event.payload {
            BusPayload::Goal(goal) if event.source == topics.goal => {
                monitor.handle_goal(&goal);
            }
            BusPayload::Feedback(feedback) if event.source == topics.feedback => {
                monitor.handle_feedback(&feedback);
            }
            BusPayload::Result(result) if event.source == topics.result => {
                monitor.handle_result(&result);
            }
            BusPayload::Nav(command) => {
                monitor.handle_nav(&command);
            }
            _ => continue,
        }
        publish_snapshot(&bus, &monitor);
    }

    info!("monitor task stopped");
}

fn publish_snapshot(bus: &EventBus, monitor: &ExecutionMonitor) {
    let event = Event::new(
        "gaitlink-monitor::service",
        BusPayload::MonitorSnapshot(monitor.snapshot()),
    );
    // Nobody listening is fine; the model state is not lost.
    let _ = bus.publish(event);
}
