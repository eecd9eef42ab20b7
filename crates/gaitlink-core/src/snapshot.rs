//! UI-facing projections.
//!
//! The monitor and preview tasks publish these after every mutation; any
//! number of dashboards can render them without touching the owning state.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::limb::Limb;

/// A progress bar: integer range, value and a display format string.
///
/// Values are pre-scaled integers (the original widget kind only takes
/// integers, hence the scale factor applied by the monitor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BarState {
    pub min: u32,
    pub max: u32,
    pub value: u32,
    /// Human-readable overlay, e.g. `"2/5 steps"`. Empty hides the overlay.
    pub format: String,
    pub enabled: bool,
}

impl BarState {
    /// The neutral, filled, disabled look shown outside an active goal.
    pub fn idle() -> Self {
        BarState {
            min: 0,
            max: 1,
            value: 1,
            format: String::new(),
            enabled: false,
        }
    }
}

impl Default for BarState {
    fn default() -> Self {
        BarState::idle()
    }
}

/// Execution status rendered as an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StatusIcon {
    /// The goal finished and the result reported success.
    Done,
    /// Steps are executing.
    Play,
    /// Execution is paused.
    Pause,
    /// The producer reported an unknown status.
    Unknown,
    /// A status code outside the known set.
    Warning,
    /// The goal finished and the result reported failure.
    Failed,
}

/// Per-limb coloring on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LimbIndicator {
    /// The limb appears in the feedback's active set.
    Active,
    #[default]
    Neutral,
}

/// Which history-navigation controls are currently usable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NavState {
    pub top_enabled: bool,
    pub up_enabled: bool,
    pub down_enabled: bool,
    pub bottom_enabled: bool,
}

/// Everything the execution dashboard shows, in one value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MonitorSnapshot {
    /// Whether a goal is currently being executed.
    pub running: bool,
    pub overall: BarState,
    pub step: BarState,
    pub status: Option<StatusIcon>,
    pub limbs: BTreeMap<Limb, LimbIndicator>,
    /// History entry under the browsing cursor, empty before any feedback.
    pub description: String,
    pub history_index: usize,
    pub history_len: usize,
    pub nav: NavState,
}

/// Health of one topic subscription, surfaced on the owning panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "state", content = "detail", rename_all = "snake_case")]
pub enum TopicStatus {
    #[default]
    Ok,
    Error(String),
}

impl TopicStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, TopicStatus::Ok)
    }
}

/// Everything the preview panel shows, in one value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PreviewSnapshot {
    /// False until the first goal converts successfully; the slider and the
    /// play control stay disabled while false.
    pub goal_loaded: bool,
    pub playing: bool,
    pub auto_play: bool,
    pub speed_factor: f64,
    /// Slider bounds, seconds. Equal bounds mean "no batch".
    pub time_min: f64,
    pub time_max: f64,
    /// Passive slider position, seconds.
    pub time: f64,
    pub goal_topic: TopicStatus,
    pub robot_state_topic: TopicStatus,
}

impl Default for PreviewSnapshot {
    fn default() -> Self {
        PreviewSnapshot {
            goal_loaded: false,
            playing: false,
            auto_play: false,
            speed_factor: 1.0,
            time_min: 0.0,
            time_max: 0.0,
            time: 0.0,
            goal_topic: TopicStatus::Ok,
            robot_state_topic: TopicStatus::Ok,
        }
    }
}
