//! The preview panel: everything a front end needs to render and control a
//! motion preview.
//!
//! The panel owns the playback engine and mirrors its cursor through the
//! engine's observer channel, so slider updates caused by playback are
//! passive – they never loop back into a seek. All mutation happens on the
//! owning service task; the panel itself is plain state.

use std::sync::Arc;

use gaitlink_bridge::convert::steps_from_goal;
use gaitlink_bridge::route::{Lane, SubscriptionTable};
use gaitlink_core::snapshot::{PreviewSnapshot, TopicStatus};
use gaitlink_core::state::Stance;
use gaitlink_core::swing::Vec3;
use gaitlink_core::{Limb, PlaybackCommand};
use gaitlink_msgs::{ExecuteStepsGoal, RobotState};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::playback::{PlaybackEngine, PlaybackEvent};

/// Frame used for the nominal stance before any robot state arrives.
const DEFAULT_FRAME: &str = "odom";

/// Preview panel state, fed by the bus and read as [`PreviewSnapshot`]s.
pub struct PreviewPanel {
    engine: PlaybackEngine,
    events: mpsc::UnboundedReceiver<PlaybackEvent>,
    table: Arc<SubscriptionTable>,
    goal_topic: String,
    robot_state_topic: String,
    goal_topic_status: TopicStatus,
    robot_state_topic_status: TopicStatus,
    auto_play: bool,
    goal_loaded: bool,
    latest_stance: Option<Stance>,
    time_min: f64,
    time_max: f64,
    time: f64,
}

impl PreviewPanel {
    pub fn new(
        mut engine: PlaybackEngine,
        table: Arc<SubscriptionTable>,
        goal_topic: impl Into<String>,
        robot_state_topic: impl Into<String>,
        auto_play: bool,
    ) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        engine.add_observer(move |event| {
            let _ = tx.send(event);
        });
        PreviewPanel {
            engine,
            events,
            table,
            goal_topic: goal_topic.into(),
            robot_state_topic: robot_state_topic.into(),
            goal_topic_status: TopicStatus::Ok,
            robot_state_topic_status: TopicStatus::Ok,
            auto_play,
            goal_loaded: false,
            latest_stance: None,
            time_min: 0.0,
            time_max: 0.0,
            time: 0.0,
        }
    }

    /// Subscribe both topics. Validation failures land in the per-topic
    /// status instead of propagating; one bad topic does not block the other.
    pub fn enable(&mut self) {
        self.goal_topic_status = self.wire_topic(&self.goal_topic, Lane::Goal);
        self.robot_state_topic_status = self.wire_topic(&self.robot_state_topic, Lane::RobotState);
    }

    /// Drop both subscriptions. Messages already on the bus still arrive;
    /// the panel keeps its loaded preview.
    pub fn disable(&mut self) {
        self.table.unsubscribe(&self.goal_topic);
        self.table.unsubscribe(&self.robot_state_topic);
    }

    /// Point the panel at a different goal topic.
    pub fn set_goal_topic(&mut self, topic: impl Into<String>) {
        self.table.unsubscribe(&self.goal_topic);
        self.goal_topic = topic.into();
        self.goal_topic_status = self.wire_topic(&self.goal_topic, Lane::Goal);
    }

    /// Point the panel at a different robot-state topic.
    pub fn set_robot_state_topic(&mut self, topic: impl Into<String>) {
        self.table.unsubscribe(&self.robot_state_topic);
        self.robot_state_topic = topic.into();
        self.robot_state_topic_status = self.wire_topic(&self.robot_state_topic, Lane::RobotState);
    }

    fn wire_topic(&self, topic: &str, lane: Lane) -> TopicStatus {
        match validate_topic(topic) {
            Ok(()) => {
                self.table.subscribe(topic, lane);
                TopicStatus::Ok
            }
            Err(reason) => {
                warn!(topic = %topic, reason = %reason, "not subscribing");
                TopicStatus::Error(reason)
            }
        }
    }

    /// The topic this panel expects goals on.
    pub fn goal_topic(&self) -> &str {
        &self.goal_topic
    }

    /// The topic this panel expects robot state on.
    pub fn robot_state_topic(&self) -> &str {
        &self.robot_state_topic
    }

    /// Handle a goal message: convert, synthesize, derive slider bounds,
    /// and start playing when auto-play is on.
    pub fn handle_goal(&mut self, goal: &ExecuteStepsGoal) {
        let steps = match steps_from_goal(goal) {
            Ok(steps) => steps,
            Err(e) => {
                warn!(error = %e, "discarding goal");
                return;
            }
        };
        info!(steps = steps.len(), "goal received");

        let stance = self
            .latest_stance
            .clone()
            .unwrap_or_else(|| Stance::nominal(DEFAULT_FRAME));
        self.engine.process(&steps, &stance);
        self.goal_loaded = true;
        if self.auto_play {
            self.engine.run();
        }
        self.pump();
    }

    /// Retain the latest robot state as the seed stance for the next goal.
    pub fn handle_robot_state(&mut self, state: &RobotState) {
        let mut stance = Stance {
            frame_id: state.header.frame_id.clone(),
            ..Default::default()
        };
        for foot in &state.feet {
            // Unknown branch names are not an error; other robots have
            // other limbs.
            if let Some(limb) = Limb::from_branch_id(&foot.name) {
                stance
                    .feet
                    .insert(limb, Vec3::new(foot.position.x, foot.position.y, foot.position.z));
            }
        }
        self.latest_stance = Some(stance);
    }

    /// Apply a user playback control. Play, pause and seek are ignored until
    /// a goal is loaded, mirroring the disabled widgets; speed and auto-play
    /// apply any time.
    pub fn handle_command(&mut self, command: PlaybackCommand) {
        match command {
            PlaybackCommand::SetAutoPlay(enabled) => self.auto_play = enabled,
            PlaybackCommand::SetSpeed(factor) => self.engine.set_speed_factor(factor),
            _ if !self.goal_loaded => {
                debug!(?command, "ignoring playback control before a goal");
            }
            PlaybackCommand::Play => self.engine.run(),
            PlaybackCommand::Pause => self.engine.stop(),
            PlaybackCommand::Seek(time) => self.engine.go_to_time(time),
        }
        self.pump();
    }

    /// Advance playback by `dt` seconds of wall time.
    ///
    /// Returns whether the panel state changed.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.engine.update(dt);
        self.pump()
    }

    /// Apply pending engine events to the panel's passive mirror state.
    fn pump(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.events.try_recv() {
            changed = true;
            match event {
                PlaybackEvent::NewGoal {
                    start_time,
                    end_time,
                } => {
                    self.time_min = start_time;
                    self.time_max = end_time;
                    self.time = start_time;
                }
                PlaybackEvent::TimeChanged(time) => self.time = time,
                PlaybackEvent::ReachedEnd => {
                    info!("preview reached the end of the batch");
                }
            }
        }
        changed
    }

    /// Direct engine access, for rendering the state under the cursor.
    pub fn engine(&self) -> &PlaybackEngine {
        &self.engine
    }

    pub fn snapshot(&self) -> PreviewSnapshot {
        PreviewSnapshot {
            goal_loaded: self.goal_loaded,
            playing: self.engine.is_playing(),
            auto_play: self.auto_play,
            speed_factor: self.engine.speed_factor(),
            time_min: self.time_min,
            time_max: self.time_max,
            time: self.time,
            goal_topic: self.goal_topic_status.clone(),
            robot_state_topic: self.robot_state_topic_status.clone(),
        }
    }
}

/// A usable topic name: non-empty, no whitespace.
fn validate_topic(topic: &str) -> Result<(), String> {
    if topic.is_empty() {
        return Err("topic name is empty".to_string());
    }
    if topic.chars().any(char::is_whitespace) {
        return Err("topic name contains whitespace".to_string());
    }
    Ok(())
}
