//! Dashboard state driven by the goal/feedback/result action triple.
//!
//! The monitor owns two progress bars, a per-limb indicator set, a status
//! icon and the step-description history. Rules it enforces:
//!
//! - a goal arms the dashboard and resets everything, history included
//! - feedback is ignored unless a goal armed the monitor first
//! - a result disarms the dashboard but keeps the history for review

use std::collections::BTreeMap;

use gaitlink_core::limb::Limb;
use gaitlink_core::snapshot::{BarState, LimbIndicator, MonitorSnapshot, StatusIcon};
use gaitlink_core::NavCommand;
use gaitlink_msgs::action::{
    ExecuteStepsFeedback, ExecuteStepsGoal, ExecuteStepsResult, PROGRESS_EXECUTING,
    PROGRESS_PAUSED, PROGRESS_UNKNOWN, RESULT_FAILED, RESULT_REACHED, RESULT_UNKNOWN,
};

use crate::history::DescriptionHistory;

/// Bars take integer values, so fractional progress is scaled up before the
/// truncating cast.
pub const PROGRESS_SCALE: f64 = 1000.0;

/// State behind the execution dashboard.
#[derive(Debug, Default)]
pub struct ExecutionMonitor {
    total_steps: u32,
    running: bool,
    overall: BarState,
    step: BarState,
    status: Option<StatusIcon>,
    limbs: BTreeMap<Limb, LimbIndicator>,
    history: DescriptionHistory,
}

impl ExecutionMonitor {
    pub fn new() -> Self {
        ExecutionMonitor {
            limbs: neutral_limbs(),
            ..ExecutionMonitor::default()
        }
    }

    /// Arm the dashboard for a new goal: empty bars sized to the step count,
    /// neutral limbs, a cleared history.
    pub fn handle_goal(&mut self, goal: &ExecuteStepsGoal) {
        self.total_steps = goal.steps.len() as u32;
        self.overall = BarState {
            min: 0,
            max: (f64::from(self.total_steps) * PROGRESS_SCALE) as u32,
            value: 0,
            format: format!("0/{} steps", self.total_steps),
            enabled: true,
        };
        self.step = BarState {
            min: 0,
            max: 1,
            value: 0,
            format: String::new(),
            enabled: true,
        };
        self.status = Some(StatusIcon::Play);
        self.limbs = neutral_limbs();
        self.history.clear();
        self.running = true;
    }

    /// Fold one progress report into the bars, limbs, icon and history.
    /// Dropped silently when no goal is running.
    pub fn handle_feedback(&mut self, feedback: &ExecuteStepsFeedback) {
        if !self.running {
            return;
        }

        let done = self.total_steps.saturating_sub(feedback.queue_size);
        self.overall.value =
            ((f64::from(done) + feedback.phase) * PROGRESS_SCALE) as u32;
        self.overall.format = format!("{done}/{} steps", self.total_steps);

        let duration = feedback.duration.to_secs_f64();
        let elapsed = feedback.phase * duration;
        self.step.max = (duration * PROGRESS_SCALE) as u32;
        self.step.value = (elapsed * PROGRESS_SCALE) as u32;
        self.step.format = format!("{elapsed:.2}/{duration:.2} s");

        for (limb, indicator) in &mut self.limbs {
            *indicator = if feedback
                .active_branches
                .iter()
                .any(|branch| branch == limb.branch_id())
            {
                LimbIndicator::Active
            } else {
                LimbIndicator::Neutral
            };
        }

        self.status = Some(match feedback.status {
            PROGRESS_PAUSED => StatusIcon::Pause,
            PROGRESS_EXECUTING => StatusIcon::Play,
            PROGRESS_UNKNOWN => StatusIcon::Unknown,
            _ => StatusIcon::Warning,
        });

        self.history.append(&feedback.description);
    }

    /// Disarm the dashboard. Bars and limbs return to their idle look; the
    /// history stays browsable until the next goal.
    pub fn handle_result(&mut self, result: &ExecuteStepsResult) {
        self.overall = BarState::idle();
        self.step = BarState::idle();
        self.limbs = neutral_limbs();
        self.status = Some(match result.status {
            RESULT_REACHED => StatusIcon::Done,
            RESULT_FAILED => StatusIcon::Failed,
            RESULT_UNKNOWN => StatusIcon::Unknown,
            _ => StatusIcon::Warning,
        });
        self.running = false;
    }

    /// Move the history cursor.
    pub fn handle_nav(&mut self, command: &NavCommand) {
        match command {
            NavCommand::Top => self.history.go_top(),
            NavCommand::Up => self.history.go_up(),
            NavCommand::Down => self.history.go_down(),
            NavCommand::Bottom => self.history.go_bottom(),
            NavCommand::Scroll { delta } => self.history.scroll(*delta),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn history(&self) -> &DescriptionHistory {
        &self.history
    }

    /// Project the current state for rendering.
    pub fn snapshot(&self) -> MonitorSnapshot {
        MonitorSnapshot {
            running: self.running,
            overall: self.overall.clone(),
            step: self.step.clone(),
            status: self.status,
            limbs: self.limbs.clone(),
            description: self.history.current().to_string(),
            history_index: self.history.cursor(),
            history_len: self.history.len(),
            nav: self.history.nav_state(),
        }
    }
}

fn neutral_limbs() -> BTreeMap<Limb, LimbIndicator> {
    Limb::ALL
        .iter()
        .map(|limb| (*limb, LimbIndicator::Neutral))
        .collect()
}
