//! Turning step sequences into previewable state batches.
//!
//! The real gait core computes dynamics-aware trajectories; the preview only
//! needs something scrubbable. [`MotionSynthesizer`] is the seam between the
//! two, and [`KnotSampler`] is the shipped implementation: it samples the
//! trajectories a goal already declares, without inventing any motion of its
//! own.

use std::collections::BTreeMap;

use gaitlink_core::state::{PreviewState, Stance, StateBatch};
use gaitlink_core::swing::{SwingDescription, SwingProfile, SwingTrajectory, Vec3};
use gaitlink_core::{Limb, Step};

/// Sampling rate used when none is configured, in Hz.
pub const DEFAULT_PREVIEW_RATE: f64 = 1000.0;

/// Produces the state batch the playback engine scrubs through.
pub trait MotionSynthesizer: Send {
    /// Sample `steps` into a time-ordered batch, starting from
    /// `initial_stance`. Limbs the stance does not cover start from a
    /// nominal square stance.
    fn synthesize(&self, steps: &[Step], initial_stance: &Stance) -> StateBatch;
}

/// Default synthesizer: linear interpolation between declared knots.
///
/// - Foot-space swings interpolate between their trajectory knots.
/// - Profile swings interpolate lift-off → apex → target, with the apex
///   centered in time and raised `height` above the higher endpoint.
/// - Joint-space swings hold the lift-off position (no kinematics here).
/// - Limbs without a swing hold their stance.
pub struct KnotSampler {
    rate: f64,
}

impl KnotSampler {
    /// A sampler producing `rate` states per second. Rates that are not
    /// finite and positive fall back to [`DEFAULT_PREVIEW_RATE`].
    pub fn new(rate: f64) -> Self {
        let rate = if rate.is_finite() && rate > 0.0 {
            rate
        } else {
            DEFAULT_PREVIEW_RATE
        };
        KnotSampler { rate }
    }

    fn sample_swing(swing: &SwingDescription, time: f64, start: Vec3) -> Vec3 {
        match &swing.trajectory {
            SwingTrajectory::FootTrajectory(trajectory) => {
                sample_knots(&trajectory.knots, time, start)
            }
            SwingTrajectory::JointTrajectory(_) => start,
            SwingTrajectory::Profile(profile) => sample_profile(profile, time, start),
        }
    }
}

impl Default for KnotSampler {
    fn default() -> Self {
        KnotSampler::new(DEFAULT_PREVIEW_RATE)
    }
}

impl MotionSynthesizer for KnotSampler {
    fn synthesize(&self, steps: &[Step], initial_stance: &Stance) -> StateBatch {
        // Start from a full stance so every state carries all four feet.
        let mut stance = Stance::nominal(initial_stance.frame_id.clone()).feet;
        for (limb, position) in &initial_stance.feet {
            stance.insert(*limb, *position);
        }

        let mut states: Vec<PreviewState> = Vec::new();
        let mut offset = 0.0;

        for step in steps {
            let duration = step.duration();
            let samples = (duration * self.rate).ceil() as usize;
            // The step's first sample equals the previous step's last state;
            // skip it unless this is the very first state of the batch.
            let first = if states.is_empty() { 0 } else { 1 };

            for index in first..=samples {
                let time = (index as f64 / self.rate).min(duration);
                let mut feet = BTreeMap::new();
                for limb in Limb::ALL {
                    let start = stance.get(&limb).copied().unwrap_or(Vec3::ZERO);
                    let position = match step.swing_for(limb.branch_id()) {
                        Some(swing) => Self::sample_swing(swing, time, start),
                        None => start,
                    };
                    feet.insert(limb, position);
                }
                states.push(PreviewState {
                    time: offset + time,
                    feet,
                });
            }

            // Advance the stance to where the step leaves the feet.
            for limb in Limb::ALL {
                if let Some(swing) = step.swing_for(limb.branch_id()) {
                    let start = stance.get(&limb).copied().unwrap_or(Vec3::ZERO);
                    stance.insert(limb, Self::sample_swing(swing, duration, start));
                }
            }
            offset += duration;
        }

        StateBatch {
            frame_id: initial_stance.frame_id.clone(),
            states,
        }
    }
}

/// Piecewise-linear interpolation over timed knots, clamped at the end.
/// Before the first knot the foot ramps from `start` toward it.
fn sample_knots(knots: &[gaitlink_core::swing::FootKnot], time: f64, start: Vec3) -> Vec3 {
    let Some(first) = knots.first() else {
        return start;
    };
    if time < first.time {
        return start.lerp(first.position, safe_alpha(time, first.time));
    }
    for window in knots.windows(2) {
        let (a, b) = (&window[0], &window[1]);
        if time <= b.time {
            return a
                .position
                .lerp(b.position, safe_alpha(time - a.time, b.time - a.time));
        }
    }
    knots
        .last()
        .map(|knot| knot.position)
        .unwrap_or(start)
}

/// Lift-off → apex → target. The apex sits over the segment midpoint,
/// `height` above the higher endpoint.
fn sample_profile(profile: &SwingProfile, time: f64, start: Vec3) -> Vec3 {
    if profile.duration <= 0.0 {
        return profile.target;
    }
    let apex = Vec3::new(
        (start.x + profile.target.x) / 2.0,
        (start.y + profile.target.y) / 2.0,
        start.z.max(profile.target.z) + profile.height,
    );
    let half = profile.duration / 2.0;
    if time <= half {
        start.lerp(apex, safe_alpha(time, half))
    } else {
        apex.lerp(profile.target, safe_alpha(time - half, half))
    }
}

/// `numerator / denominator` clamped to `[0, 1]`, `1.0` for a zero-length
/// span.
fn safe_alpha(numerator: f64, denominator: f64) -> f64 {
    if denominator <= 0.0 {
        return 1.0;
    }
    (numerator / denominator).clamp(0.0, 1.0)
}
