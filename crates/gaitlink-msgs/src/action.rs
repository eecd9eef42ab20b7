//! The step-execution action triple: goal, feedback and result.
//!
//! The monitor derives the three topic names from a configured action
//! namespace (`{ns}/goal`, `{ns}/feedback`, `{ns}/result`); the preview
//! subscribes to the goal topic alone.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::swing::SwingData;

/// One step of a planned motion: the set of limb swings executed together.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Step {
    /// Position of this step within the goal's sequence.
    pub step_number: u32,
    pub swing_data: Vec<SwingData>,
}

/// Goal message: the ordered step sequence to execute.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExecuteStepsGoal {
    pub steps: Vec<Step>,
}

/// Feedback status: execution is paused.
pub const PROGRESS_PAUSED: u8 = 0;
/// Feedback status: a step is currently executing.
pub const PROGRESS_EXECUTING: u8 = 1;
/// Feedback status: the executor cannot tell what it is doing.
pub const PROGRESS_UNKNOWN: u8 = 2;

/// Feedback message: a progress snapshot emitted while steps execute.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExecuteStepsFeedback {
    /// Number of steps still queued, including the one executing.
    pub queue_size: u32,
    /// Fractional progress through the current step, in `[0, 1]`.
    pub phase: f64,
    /// Nominal duration of the current step.
    pub duration: crate::builtin::Duration,
    /// Identifiers of the limbs currently in swing (e.g. `"LF_LEG"`).
    pub active_branches: Vec<String>,
    /// One of the `PROGRESS_*` constants.
    pub status: u8,
    /// Human-readable description of the current step.
    pub description: String,
}

/// Result status: all steps were executed and the final stance was reached.
pub const RESULT_REACHED: u8 = 0;
/// Result status: execution aborted before the final stance.
pub const RESULT_FAILED: u8 = 1;
/// Result status: the executor cannot tell how execution ended.
pub const RESULT_UNKNOWN: u8 = 2;

/// Result message: terminal status of a step-execution goal.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExecuteStepsResult {
    /// One of the `RESULT_*` constants.
    pub status: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn goal_deserializes_with_nested_steps() {
        let json = r#"{
            "steps": [
                {"step_number": 1, "swing_data": [{"name": "LF_LEG"}]},
                {"step_number": 2, "swing_data": []}
            ]
        }"#;
        let goal: ExecuteStepsGoal = serde_json::from_str(json).unwrap();
        assert_eq!(goal.steps.len(), 2);
        assert_eq!(goal.steps[0].swing_data[0].name, "LF_LEG");
    }

    #[test]
    fn feedback_deserializes_from_wire_json() {
        let json = r#"{
            "queue_size": 3,
            "phase": 0.5,
            "duration": {"sec": 2, "nsec": 0},
            "active_branches": ["LF_LEG", "RH_LEG"],
            "status": 1,
            "description": "Swinging LF_LEG to (0.3, 0.2)."
        }"#;
        let feedback: ExecuteStepsFeedback = serde_json::from_str(json).unwrap();
        assert_eq!(feedback.queue_size, 3);
        assert_eq!(feedback.status, PROGRESS_EXECUTING);
        assert_eq!(feedback.active_branches.len(), 2);
        assert!((feedback.duration.to_secs_f64() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn status_constants_are_distinct() {
        assert_ne!(PROGRESS_PAUSED, PROGRESS_EXECUTING);
        assert_ne!(PROGRESS_EXECUTING, PROGRESS_UNKNOWN);
        assert_ne!(RESULT_REACHED, RESULT_FAILED);
        assert_ne!(RESULT_FAILED, RESULT_UNKNOWN);
    }

    #[test]
    fn default_result_reports_reached() {
        // Wire default (0) coincides with RESULT_REACHED, matching the
        // executor's encoding.
        assert_eq!(ExecuteStepsResult::default().status, RESULT_REACHED);
    }
}
