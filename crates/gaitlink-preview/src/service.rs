//! The preview task: one loop owning the panel, fed by the bus and a tick.

use std::sync::Arc;
use std::time::Duration;

use gaitlink_bridge::bus::{BusPayload, Event, EventBus};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::info;

use crate::panel::PreviewPanel;

/// How often playback advances, independent of the sampling rate.
const TICK_HZ: f64 = 25.0;

/// Run the preview panel against the bus until the bus closes.
///
/// The panel reacts to goals and robot state on its configured topics and to
/// playback controls from anywhere; a snapshot goes out after every change.
pub async fn run_preview(bus: Arc<EventBus>, mut panel: PreviewPanel) {
    // Subscribe before announcing the panel so nothing published after the
    // first snapshot can be missed.
    let mut rx = bus.subscribe();
    panel.enable();
    publish_snapshot(&bus, &panel);

    let mut ticker = tokio::time::interval(Duration::from_secs_f64(1.0 / TICK_HZ));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_tick = Instant::now();

    info!(
        goal_topic = %panel.goal_topic(),
        robot_state_topic = %panel.robot_state_topic(),
        "preview task running"
    );

    loop {
        tokio::select! {
            maybe_event = rx.recv() => {
                let Some(event) = maybe_event else {
                    break;
                };
                match event.payload {
                    BusPayload::Goal(goal) if event.source == panel.goal_topic() => {
                        panel.handle_goal(&goal);
                    }
                    BusPayload::RobotState(state)
                        if event.source == panel.robot_state_topic() =>
                    {
                        panel.handle_robot_state(&state);
                        continue;
                    }
                    BusPayload::Playback(command) => {
                        panel.handle_command(command);
                    }
                    _ => continue,
                }
                publish_snapshot(&bus, &panel);
            }
            tick = ticker.tick() => {
                let dt = tick.duration_since(last_tick).as_secs_f64();
                last_tick = tick;
                if panel.tick(dt) {
                    publish_snapshot(&bus, &panel);
                }
            }
        }
    }

    info!("preview task stopped");
}

fn publish_snapshot(bus: &EventBus, panel: &PreviewPanel) {
    let event = Event::new(
        "gaitlink-preview::service",
        BusPayload::PreviewSnapshot(panel.snapshot()),
    );
    // Nobody listening is fine; the panel state is not lost.
    let _ = bus.publish(event);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::PlaybackEngine;
    use crate::sampler::KnotSampler;
    use gaitlink_bridge::route::SubscriptionTable;
    use gaitlink_core::PlaybackCommand;
    use gaitlink_msgs::{ExecuteStepsGoal, Step as StepMessage, SwingData};

    fn make_panel() -> PreviewPanel {
        let table = SubscriptionTable::new();
        let engine = PlaybackEngine::new(Box::new(KnotSampler::new(100.0)));
        PreviewPanel::new(engine, table, "/free_gait/goal", "/robot_state", true)
    }

    fn profile_goal() -> ExecuteStepsGoal {
        let mut swing = SwingData {
            name: "LF_LEG".to_string(),
            ..Default::default()
        };
        swing.profile.duration = 0.2;
        ExecuteStepsGoal {
            steps: vec![StepMessage {
                step_number: 1,
                swing_data: vec![swing],
            }],
        }
    }

    #[tokio::test]
    async fn goal_events_produce_snapshots() {
        let bus = Arc::new(EventBus::default());
        let panel = make_panel();
        let mut rx = bus.subscribe();
        tokio::spawn(run_preview(Arc::clone(&bus), panel));

        // Wait for the startup snapshot so the goal is not racing enable().
        loop {
            let event = rx.recv().await.unwrap();
            if matches!(event.payload, BusPayload::PreviewSnapshot(_)) {
                break;
            }
        }

        bus.publish(Event::new(
            "/free_gait/goal",
            BusPayload::Goal(profile_goal()),
        ))
        .unwrap();

        loop {
            let event = rx.recv().await.unwrap();
            if let BusPayload::PreviewSnapshot(snapshot) = event.payload {
                if snapshot.goal_loaded {
                    assert!(snapshot.playing, "auto-play should have started");
                    break;
                }
            }
        }
    }

    #[tokio::test]
    async fn goals_on_other_topics_are_ignored() {
        let bus = Arc::new(EventBus::default());
        let panel = make_panel();
        let mut rx = bus.subscribe();
        tokio::spawn(run_preview(Arc::clone(&bus), panel));

        loop {
            let event = rx.recv().await.unwrap();
            if matches!(event.payload, BusPayload::PreviewSnapshot(_)) {
                break;
            }
        }

        bus.publish(Event::new("/other", BusPayload::Goal(profile_goal())))
            .unwrap();
        bus.publish(Event::new(
            "gaitlink-cockpit::client",
            BusPayload::Playback(PlaybackCommand::Pause),
        ))
        .unwrap();

        // The pause command produces the next snapshot; the misdirected goal
        // must not have loaded.
        loop {
            let event = rx.recv().await.unwrap();
            if let BusPayload::PreviewSnapshot(snapshot) = event.payload {
                assert!(!snapshot.goal_loaded);
                break;
            }
        }
    }
}
