//! End-effector polylines: the rendered trace of each foot through a batch.

use std::collections::BTreeMap;

use gaitlink_core::state::StateBatch;
use gaitlink_core::swing::Vec3;
use gaitlink_core::Limb;

/// Extract one polyline per limb from a state batch.
///
/// Consecutive duplicate points collapse, so a standing foot contributes a
/// single point instead of one per sample.
pub fn limb_polylines(batch: &StateBatch) -> BTreeMap<Limb, Vec<Vec3>> {
    let mut polylines: BTreeMap<Limb, Vec<Vec3>> = BTreeMap::new();
    for state in &batch.states {
        for (limb, position) in &state.feet {
            let line = polylines.entry(*limb).or_default();
            if line.last() != Some(position) {
                line.push(*position);
            }
        }
    }
    polylines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::{KnotSampler, MotionSynthesizer};
    use gaitlink_core::state::Stance;
    use gaitlink_core::swing::{SwingDescription, SwingProfile, SwingTrajectory};
    use gaitlink_core::Step;

    #[test]
    fn standing_feet_collapse_to_one_point() {
        let sampler = KnotSampler::new(100.0);
        let steps = vec![Step::new(
            1,
            vec![SwingDescription {
                name: "LF_LEG".to_string(),
                surface_normal_frame: String::new(),
                surface_normal: Vec3::ZERO,
                no_touchdown: false,
                trajectory: SwingTrajectory::Profile(SwingProfile {
                    target_frame: "odom".to_string(),
                    target: Vec3::new(0.5, 0.2, 0.0),
                    height: 0.06,
                    duration: 1.0,
                    kind: "default".to_string(),
                }),
            }],
        )];
        let batch = sampler.synthesize(&steps, &Stance::nominal("odom"));

        let polylines = limb_polylines(&batch);
        // The swinging leg traces a path; the others never move.
        assert!(polylines[&Limb::LeftFore].len() > 2);
        assert_eq!(polylines[&Limb::RightFore].len(), 1);
        assert_eq!(polylines[&Limb::LeftHind].len(), 1);
        assert_eq!(polylines[&Limb::RightHind].len(), 1);
    }

    #[test]
    fn empty_batch_yields_no_polylines() {
        assert!(limb_polylines(&StateBatch::default()).is_empty());
    }
}
