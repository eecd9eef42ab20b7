//! The step-description log and its browsing cursor.
//!
//! Every feedback message appends one entry. The cursor follows the latest
//! entry until the user navigates away from it; any navigation back to the
//! bottom resumes following. Out-of-range moves clamp, they never fail.

use gaitlink_core::snapshot::NavState;

/// Wheel units per scroll step: deltas arrive in eighths of a degree and a
/// standard notch is 15 degrees.
const WHEEL_DELTA_PER_STEP: i32 = 8 * 15;

/// Append-only description history with a clamped browsing cursor.
#[derive(Debug, Default)]
pub struct DescriptionHistory {
    entries: Vec<String>,
    cursor: usize,
    away_from_latest: bool,
}

impl DescriptionHistory {
    pub fn new() -> Self {
        DescriptionHistory::default()
    }

    /// Append an entry. While the user has not navigated away, the cursor
    /// stays pinned to the latest entry.
    pub fn append(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
        if !self.away_from_latest {
            self.cursor = self.entries.len() - 1;
        }
    }

    /// Drop all entries and resume following the latest.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
        self.away_from_latest = false;
    }

    /// Jump to the oldest entry.
    pub fn go_top(&mut self) {
        self.move_to(0);
    }

    /// Move one entry older.
    pub fn go_up(&mut self) {
        self.move_to(self.cursor.saturating_sub(1));
    }

    /// Move one entry newer.
    pub fn go_down(&mut self) {
        self.move_to(self.cursor.saturating_add(1));
    }

    /// Jump to the latest entry.
    pub fn go_bottom(&mut self) {
        self.move_to(self.entries.len().saturating_sub(1));
    }

    /// Apply a raw wheel delta: positive deltas scroll toward older entries.
    pub fn scroll(&mut self, delta: i32) {
        let steps = delta / WHEEL_DELTA_PER_STEP;
        let target = self.cursor as i64 - steps as i64;
        self.move_to(target.max(0) as usize);
    }

    fn move_to(&mut self, target: usize) {
        if self.entries.is_empty() {
            return;
        }
        self.cursor = target.min(self.entries.len() - 1);
        self.away_from_latest = self.cursor != self.entries.len() - 1;
    }

    /// The entry under the cursor, empty before any feedback.
    pub fn current(&self) -> &str {
        self.entries
            .get(self.cursor)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Which navigation controls would do anything right now.
    pub fn nav_state(&self) -> NavState {
        if self.entries.is_empty() {
            return NavState::default();
        }
        let at_top = self.cursor == 0;
        let at_bottom = self.cursor == self.entries.len() - 1;
        NavState {
            top_enabled: !at_top,
            up_enabled: !at_top,
            down_enabled: !at_bottom,
            bottom_enabled: !at_bottom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(n: usize) -> DescriptionHistory {
        let mut history = DescriptionHistory::new();
        for i in 0..n {
            history.append(format!("step {i}"));
        }
        history
    }

    #[test]
    fn cursor_follows_latest_until_user_navigates_away() {
        let mut history = filled(3);
        assert_eq!(history.cursor(), 2);

        history.append("step 3");
        assert_eq!(history.cursor(), 3, "following the latest entry");

        history.go_up();
        history.append("step 4");
        assert_eq!(history.cursor(), 2, "navigated away, no force-scroll");

        history.go_bottom();
        history.append("step 5");
        assert_eq!(history.cursor(), history.len() - 1, "following again");
    }

    #[test]
    fn up_from_the_first_entry_stays_at_zero() {
        let mut history = filled(2);
        history.go_top();
        assert_eq!(history.cursor(), 0);
        history.go_up();
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn down_past_the_last_entry_clamps() {
        let mut history = filled(2);
        history.go_down();
        assert_eq!(history.cursor(), 1);
        // Ending at the bottom resumes following.
        history.append("more");
        assert_eq!(history.cursor(), 2);
    }

    #[test]
    fn navigation_on_empty_history_is_a_no_op() {
        let mut history = DescriptionHistory::new();
        history.go_top();
        history.go_up();
        history.go_down();
        history.go_bottom();
        history.scroll(-360);
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.current(), "");
        assert_eq!(history.nav_state(), NavState::default());
    }

    #[test]
    fn wheel_deltas_convert_to_whole_steps() {
        let mut history = filled(10);
        assert_eq!(history.cursor(), 9);

        // One notch up (away from the user) moves one entry older.
        history.scroll(120);
        assert_eq!(history.cursor(), 8);

        // Three notches down move three entries newer, clamped.
        history.scroll(-360);
        assert_eq!(history.cursor(), 9);

        // Less than a notch does nothing.
        history.scroll(60);
        assert_eq!(history.cursor(), 9);

        // A huge scroll up clamps at the top.
        history.scroll(120 * 30);
        assert_eq!(history.cursor(), 0);
    }

    #[test]
    fn nav_state_disables_controls_at_the_boundaries() {
        let mut history = filled(3);
        let nav = history.nav_state();
        assert!(nav.top_enabled && nav.up_enabled);
        assert!(!nav.down_enabled && !nav.bottom_enabled);

        history.go_top();
        let nav = history.nav_state();
        assert!(!nav.top_enabled && !nav.up_enabled);
        assert!(nav.down_enabled && nav.bottom_enabled);

        let mut single = filled(1);
        single.go_bottom();
        assert_eq!(single.nav_state(), NavState::default());
    }

    #[test]
    fn clear_resumes_following() {
        let mut history = filled(5);
        history.go_top();
        history.clear();
        assert!(history.is_empty());
        history.append("fresh");
        assert_eq!(history.cursor(), 0);
        assert_eq!(history.current(), "fresh");
    }
}
