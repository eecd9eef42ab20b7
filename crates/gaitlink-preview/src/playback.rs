//! The playback engine: a time cursor over a precomputed state batch.
//!
//! The engine never runs on its own clock. A host calls [`PlaybackEngine::update`]
//! periodically with the elapsed wall time, and the cursor advances by
//! `dt × speed` while playing. Everything the engine does is reported to
//! registered observers, so the owning panel can mirror cursor movement
//! without polling and without re-triggering a seek.

use gaitlink_core::state::{PreviewState, Stance, StateBatch};
use gaitlink_core::Step;
use tracing::debug;

use crate::sampler::MotionSynthesizer;

/// Upper bound on the speed factor, matching the panel's speed control.
pub const MAX_SPEED_FACTOR: f64 = 10.0;

/// What the engine tells its observers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackEvent {
    /// A new batch was synthesized; slider bounds come from these times.
    NewGoal { start_time: f64, end_time: f64 },
    /// The cursor moved, by ticking or by an explicit seek.
    TimeChanged(f64),
    /// The cursor hit the end of the batch; playback has stopped.
    ReachedEnd,
}

/// Scrubs a time cursor across the synthesized batch.
pub struct PlaybackEngine {
    synthesizer: Box<dyn MotionSynthesizer>,
    batch: StateBatch,
    time: f64,
    speed_factor: f64,
    playing: bool,
    observers: Vec<Box<dyn FnMut(PlaybackEvent) + Send>>,
}

impl PlaybackEngine {
    pub fn new(synthesizer: Box<dyn MotionSynthesizer>) -> Self {
        PlaybackEngine {
            synthesizer,
            batch: StateBatch::default(),
            time: 0.0,
            speed_factor: 1.0,
            playing: false,
            observers: Vec::new(),
        }
    }

    /// Register an observer for every subsequent [`PlaybackEvent`].
    pub fn add_observer(&mut self, observer: impl FnMut(PlaybackEvent) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Synthesize a new batch from `steps` and rewind to its start.
    ///
    /// Playback stops; whether it restarts is the caller's auto-play policy.
    pub fn process(&mut self, steps: &[Step], initial_stance: &Stance) {
        self.batch = self.synthesizer.synthesize(steps, initial_stance);
        self.time = self.batch.start_time();
        self.playing = false;
        debug!(
            states = self.batch.states.len(),
            end_time = self.batch.end_time(),
            "batch synthesized"
        );
        self.emit(PlaybackEvent::NewGoal {
            start_time: self.batch.start_time(),
            end_time: self.batch.end_time(),
        });
        self.emit(PlaybackEvent::TimeChanged(self.time));
    }

    /// Start advancing the cursor on subsequent [`update`](Self::update) calls.
    /// A no-op without a batch.
    pub fn run(&mut self) {
        if !self.batch.is_empty() {
            self.playing = true;
        }
    }

    /// Stop advancing the cursor. The cursor keeps its position.
    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Move the cursor to `time`, clamped to the batch bounds.
    pub fn go_to_time(&mut self, time: f64) {
        let clamped = if time.is_finite() {
            time.clamp(self.batch.start_time(), self.batch.end_time())
        } else {
            self.batch.start_time()
        };
        self.time = clamped;
        self.emit(PlaybackEvent::TimeChanged(clamped));
    }

    /// Set the speed factor, clamped to `[0, MAX_SPEED_FACTOR]`.
    /// Values that are not finite are ignored.
    pub fn set_speed_factor(&mut self, factor: f64) {
        if factor.is_finite() {
            self.speed_factor = factor.clamp(0.0, MAX_SPEED_FACTOR);
        }
    }

    /// Advance the cursor by `dt × speed` while playing.
    ///
    /// On reaching the batch end the engine stops, reports the final cursor
    /// position and then [`PlaybackEvent::ReachedEnd`] exactly once.
    pub fn update(&mut self, dt: f64) {
        if !self.playing || !(dt > 0.0) {
            return;
        }
        let end = self.batch.end_time();
        let next = self.time + dt * self.speed_factor;
        if next >= end {
            self.time = end;
            self.playing = false;
            self.emit(PlaybackEvent::TimeChanged(end));
            self.emit(PlaybackEvent::ReachedEnd);
        } else {
            self.time = next;
            self.emit(PlaybackEvent::TimeChanged(next));
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn speed_factor(&self) -> f64 {
        self.speed_factor
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn batch(&self) -> &StateBatch {
        &self.batch
    }

    /// The state under the cursor, `None` before any goal.
    pub fn current_state(&self) -> Option<&PreviewState> {
        self.batch.state_at(self.time)
    }

    fn emit(&mut self, event: PlaybackEvent) {
        for observer in &mut self.observers {
            observer(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::KnotSampler;
    use gaitlink_core::swing::{SwingDescription, SwingProfile, SwingTrajectory, Vec3};
    use std::sync::mpsc;

    fn one_second_step() -> Vec<Step> {
        vec![Step::new(
            1,
            vec![SwingDescription {
                name: "LF_LEG".to_string(),
                surface_normal_frame: String::new(),
                surface_normal: Vec3::ZERO,
                no_touchdown: false,
                trajectory: SwingTrajectory::Profile(SwingProfile {
                    target_frame: "odom".to_string(),
                    target: Vec3::new(0.4, 0.2, 0.0),
                    height: 0.05,
                    duration: 1.0,
                    kind: "default".to_string(),
                }),
            }],
        )]
    }

    fn make_engine() -> (PlaybackEngine, mpsc::Receiver<PlaybackEvent>) {
        let (tx, rx) = mpsc::channel();
        let mut engine = PlaybackEngine::new(Box::new(KnotSampler::new(100.0)));
        engine.add_observer(move |event| {
            let _ = tx.send(event);
        });
        (engine, rx)
    }

    fn drain(rx: &mpsc::Receiver<PlaybackEvent>) -> Vec<PlaybackEvent> {
        rx.try_iter().collect()
    }

    #[test]
    fn process_reports_new_goal_with_batch_bounds() {
        let (mut engine, rx) = make_engine();
        engine.process(&one_second_step(), &Stance::nominal("odom"));

        let events = drain(&rx);
        assert!(matches!(
            events[0],
            PlaybackEvent::NewGoal { start_time, end_time }
                if start_time == 0.0 && (end_time - 1.0).abs() < 1e-9
        ));
        assert!(matches!(events[1], PlaybackEvent::TimeChanged(t) if t == 0.0));
        assert!(!engine.is_playing());
    }

    #[test]
    fn update_advances_by_dt_times_speed() {
        let (mut engine, rx) = make_engine();
        engine.process(&one_second_step(), &Stance::nominal("odom"));
        engine.set_speed_factor(2.0);
        engine.run();
        drain(&rx);

        engine.update(0.1);
        assert!((engine.time() - 0.2).abs() < 1e-9);
        let events = drain(&rx);
        assert!(matches!(events.as_slice(), [PlaybackEvent::TimeChanged(t)] if (t - 0.2).abs() < 1e-9));
    }

    #[test]
    fn reaching_the_end_stops_and_fires_reached_end_once() {
        let (mut engine, rx) = make_engine();
        engine.process(&one_second_step(), &Stance::nominal("odom"));
        engine.run();
        drain(&rx);

        engine.update(5.0);
        let events = drain(&rx);
        assert_eq!(
            events,
            vec![
                PlaybackEvent::TimeChanged(1.0),
                PlaybackEvent::ReachedEnd
            ]
        );
        assert!(!engine.is_playing());
        assert_eq!(engine.time(), 1.0);

        // Stopped engines do not tick further.
        engine.update(5.0);
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn go_to_time_clamps_to_batch_bounds() {
        let (mut engine, rx) = make_engine();
        engine.process(&one_second_step(), &Stance::nominal("odom"));
        drain(&rx);

        engine.go_to_time(7.5);
        assert_eq!(engine.time(), 1.0);
        engine.go_to_time(-3.0);
        assert_eq!(engine.time(), 0.0);
        engine.go_to_time(f64::NAN);
        assert_eq!(engine.time(), 0.0);
    }

    #[test]
    fn run_without_a_batch_stays_stopped() {
        let (mut engine, _rx) = make_engine();
        engine.run();
        assert!(!engine.is_playing());
        engine.update(1.0);
        assert_eq!(engine.time(), 0.0);
    }

    #[test]
    fn speed_factor_is_clamped() {
        let (mut engine, _rx) = make_engine();
        engine.set_speed_factor(50.0);
        assert_eq!(engine.speed_factor(), MAX_SPEED_FACTOR);
        engine.set_speed_factor(-1.0);
        assert_eq!(engine.speed_factor(), 0.0);
        engine.set_speed_factor(f64::INFINITY);
        assert_eq!(engine.speed_factor(), 0.0);
    }

    #[test]
    fn zero_speed_holds_the_cursor_while_playing() {
        let (mut engine, rx) = make_engine();
        engine.process(&one_second_step(), &Stance::nominal("odom"));
        engine.set_speed_factor(0.0);
        engine.run();
        drain(&rx);

        engine.update(0.5);
        assert_eq!(engine.time(), 0.0);
        assert!(engine.is_playing());
    }
}
