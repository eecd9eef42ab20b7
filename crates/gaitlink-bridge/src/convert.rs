//! Wire-message to domain-model conversion.
//!
//! The entry point is [`swing_from_message`]: it resolves which of the three
//! trajectory variants a `SwingData` message carries (declared `type` field
//! first, otherwise inferred from which sub-message has joint names) and
//! dispatches to the matching sub-converter. Each sub-converter validates
//! its sub-message independently.
//!
//! Conversion builds the description and returns it whole; an `Err` never
//! leaves a half-written object behind.

use gaitlink_core::error::ConvertError;
use gaitlink_core::swing::{
    DEFAULT_PROFILE_KIND, FootKnot, FootTrajectory, JointKnot, JointTrajectory, SwingDescription,
    SwingProfile, SwingTrajectory, Vec3,
};
use gaitlink_core::Step;
use gaitlink_msgs::swing::{
    SWING_TYPE_FOOT_TRAJECTORY, SWING_TYPE_JOINT_TRAJECTORY, SWING_TYPE_PROFILE,
};
use gaitlink_msgs::{geometry_msgs, trajectory_msgs, ExecuteStepsGoal, SwingData};

/// Resolve the trajectory type of a swing message.
///
/// An explicit non-empty `type` field wins. Otherwise the type is inferred:
/// foot-trajectory joint names present → `"foot_trajectory"`; else
/// joint-trajectory joint names present → `"joint_trajectory"`; else
/// `"profile"`.
pub fn resolve_swing_type(message: &SwingData) -> &str {
    if !message.swing_type.is_empty() {
        return &message.swing_type;
    }
    if !message.foot_trajectory.joint_names.is_empty() {
        return SWING_TYPE_FOOT_TRAJECTORY;
    }
    if !message.joint_trajectory.joint_names.is_empty() {
        return SWING_TYPE_JOINT_TRAJECTORY;
    }
    SWING_TYPE_PROFILE
}

/// Convert one `SwingData` message into a [`SwingDescription`].
pub fn swing_from_message(message: &SwingData) -> Result<SwingDescription, ConvertError> {
    let trajectory = match resolve_swing_type(message) {
        SWING_TYPE_FOOT_TRAJECTORY => SwingTrajectory::FootTrajectory(foot_trajectory_from_message(
            &message.foot_trajectory,
            &message.name,
        )?),
        SWING_TYPE_JOINT_TRAJECTORY => SwingTrajectory::JointTrajectory(
            joint_trajectory_from_message(&message.joint_trajectory, &message.name)?,
        ),
        SWING_TYPE_PROFILE => {
            SwingTrajectory::Profile(profile_from_message(&message.profile, &message.name)?)
        }
        other => return Err(ConvertError::UnknownSwingType(other.to_string())),
    };

    Ok(SwingDescription {
        name: message.name.clone(),
        surface_normal_frame: message.surface_normal.header.frame_id.clone(),
        surface_normal: vec3_from_message(message.surface_normal.vector),
        no_touchdown: message.no_touchdown,
        trajectory,
    })
}

/// Convert a goal message into the domain step sequence.
///
/// The first failing swing aborts the whole goal.
pub fn steps_from_goal(goal: &ExecuteStepsGoal) -> Result<Vec<Step>, ConvertError> {
    goal.steps
        .iter()
        .map(|step| {
            let swings = step
                .swing_data
                .iter()
                .map(swing_from_message)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Step::new(step.step_number, swings))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Sub-converters, one per trajectory variant
// ---------------------------------------------------------------------------

fn foot_trajectory_from_message(
    message: &trajectory_msgs::MultiDofJointTrajectory,
    name: &str,
) -> Result<FootTrajectory, ConvertError> {
    let fail = |details: String| ConvertError::FootTrajectory {
        name: name.to_string(),
        details,
    };

    let column = message
        .joint_names
        .iter()
        .position(|joint| joint == name)
        .ok_or_else(|| fail("joint names do not include this leg".to_string()))?;
    if message.points.is_empty() {
        return Err(fail("no trajectory points".to_string()));
    }

    let mut knots = Vec::with_capacity(message.points.len());
    for (index, point) in message.points.iter().enumerate() {
        let transform = point
            .transforms
            .get(column)
            .ok_or_else(|| fail(format!("point {index} has no transform for column {column}")))?;
        knots.push(FootKnot {
            time: point.time_from_start.to_secs_f64(),
            position: vec3_from_message(transform.translation),
        });
    }

    Ok(FootTrajectory {
        frame_id: message.header.frame_id.clone(),
        knots,
    })
}

fn joint_trajectory_from_message(
    message: &trajectory_msgs::JointTrajectory,
    name: &str,
) -> Result<JointTrajectory, ConvertError> {
    let fail = |details: String| ConvertError::JointTrajectory {
        name: name.to_string(),
        details,
    };

    if message.joint_names.is_empty() {
        return Err(fail("joint name list is empty".to_string()));
    }
    if message.points.is_empty() {
        return Err(fail("no trajectory points".to_string()));
    }

    let mut knots = Vec::with_capacity(message.points.len());
    for (index, point) in message.points.iter().enumerate() {
        if point.positions.len() != message.joint_names.len() {
            return Err(fail(format!(
                "point {index} has {} positions for {} joints",
                point.positions.len(),
                message.joint_names.len()
            )));
        }
        knots.push(JointKnot {
            time: point.time_from_start.to_secs_f64(),
            positions: point.positions.clone(),
        });
    }

    Ok(JointTrajectory {
        joint_names: message.joint_names.clone(),
        knots,
    })
}

fn profile_from_message(
    message: &gaitlink_msgs::SwingProfile,
    name: &str,
) -> Result<SwingProfile, ConvertError> {
    let fail = |details: String| ConvertError::Profile {
        name: name.to_string(),
        details,
    };

    if !message.duration.is_finite() || message.duration < 0.0 {
        return Err(fail(format!("duration {} is not usable", message.duration)));
    }
    if !message.height.is_finite() || message.height < 0.0 {
        return Err(fail(format!("height {} is not usable", message.height)));
    }

    let kind = if message.profile_type.is_empty() {
        DEFAULT_PROFILE_KIND.to_string()
    } else {
        message.profile_type.clone()
    };

    Ok(SwingProfile {
        target_frame: message.target.header.frame_id.clone(),
        target: Vec3::new(
            message.target.point.x,
            message.target.point.y,
            message.target.point.z,
        ),
        height: message.height,
        duration: message.duration,
        kind,
    })
}

fn vec3_from_message(vector: geometry_msgs::Vector3) -> Vec3 {
    Vec3::new(vector.x, vector.y, vector.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaitlink_msgs::builtin::Duration;
    use gaitlink_msgs::geometry_msgs::{Transform, Vector3};
    use gaitlink_msgs::trajectory_msgs::{
        JointTrajectoryPoint, MultiDofJointTrajectoryPoint,
    };

    fn foot_trajectory_message(joint_names: &[&str], times: &[f64]) -> trajectory_msgs::MultiDofJointTrajectory {
        trajectory_msgs::MultiDofJointTrajectory {
            joint_names: joint_names.iter().map(|n| n.to_string()).collect(),
            points: times
                .iter()
                .map(|&t| MultiDofJointTrajectoryPoint {
                    transforms: vec![Transform::default(); joint_names.len()],
                    time_from_start: Duration::from_secs_f64(t),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn joint_trajectory_message(joint_names: &[&str], times: &[f64]) -> trajectory_msgs::JointTrajectory {
        trajectory_msgs::JointTrajectory {
            joint_names: joint_names.iter().map(|n| n.to_string()).collect(),
            points: times
                .iter()
                .map(|&t| JointTrajectoryPoint {
                    positions: vec![0.0; joint_names.len()],
                    time_from_start: Duration::from_secs_f64(t),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn explicit_type_wins_over_message_content() {
        let message = SwingData {
            name: "LF_LEG".to_string(),
            swing_type: SWING_TYPE_PROFILE.to_string(),
            foot_trajectory: foot_trajectory_message(&["LF_LEG"], &[0.0, 1.0]),
            ..Default::default()
        };
        assert_eq!(resolve_swing_type(&message), SWING_TYPE_PROFILE);
    }

    #[test]
    fn empty_type_infers_foot_trajectory_regardless_of_joint_content() {
        let message = SwingData {
            name: "LF_LEG".to_string(),
            foot_trajectory: foot_trajectory_message(&["LF_LEG"], &[0.0, 1.0]),
            joint_trajectory: joint_trajectory_message(&["LF_HAA", "LF_HFE"], &[0.0, 1.0]),
            ..Default::default()
        };
        assert_eq!(resolve_swing_type(&message), SWING_TYPE_FOOT_TRAJECTORY);

        let swing = swing_from_message(&message).unwrap();
        assert!(matches!(
            swing.trajectory,
            SwingTrajectory::FootTrajectory(_)
        ));
    }

    #[test]
    fn empty_type_and_foot_names_infers_joint_trajectory() {
        let message = SwingData {
            name: "RF_LEG".to_string(),
            joint_trajectory: joint_trajectory_message(&["RF_HAA", "RF_HFE"], &[0.0, 0.5]),
            ..Default::default()
        };
        assert_eq!(resolve_swing_type(&message), SWING_TYPE_JOINT_TRAJECTORY);

        let swing = swing_from_message(&message).unwrap();
        assert!(matches!(
            swing.trajectory,
            SwingTrajectory::JointTrajectory(_)
        ));
    }

    #[test]
    fn empty_type_and_no_joint_names_defaults_to_profile() {
        let message = SwingData {
            name: "LH_LEG".to_string(),
            ..Default::default()
        };
        assert_eq!(resolve_swing_type(&message), SWING_TYPE_PROFILE);

        let swing = swing_from_message(&message).unwrap();
        match swing.trajectory {
            SwingTrajectory::Profile(profile) => {
                assert_eq!(profile.kind, DEFAULT_PROFILE_KIND);
            }
            other => panic!("expected profile, got {other:?}"),
        }
    }

    #[test]
    fn unknown_explicit_type_fails_conversion() {
        let message = SwingData {
            name: "LF_LEG".to_string(),
            swing_type: "wiggle".to_string(),
            ..Default::default()
        };
        assert_eq!(
            swing_from_message(&message),
            Err(ConvertError::UnknownSwingType("wiggle".to_string()))
        );
    }

    #[test]
    fn metadata_fields_copy_verbatim() {
        let mut message = SwingData {
            name: "RH_LEG".to_string(),
            no_touchdown: true,
            ..Default::default()
        };
        message.surface_normal.header.frame_id = "map".to_string();
        message.surface_normal.vector = Vector3 {
            x: 0.0,
            y: 0.1,
            z: 0.9,
        };

        let swing = swing_from_message(&message).unwrap();
        assert_eq!(swing.name, "RH_LEG");
        assert_eq!(swing.surface_normal_frame, "map");
        assert_eq!(swing.surface_normal, Vec3::new(0.0, 0.1, 0.9));
        assert!(swing.no_touchdown);
    }

    #[test]
    fn foot_trajectory_requires_a_column_for_the_leg() {
        let message = SwingData {
            name: "LF_LEG".to_string(),
            foot_trajectory: foot_trajectory_message(&["RF_LEG"], &[0.0, 1.0]),
            ..Default::default()
        };
        assert!(matches!(
            swing_from_message(&message),
            Err(ConvertError::FootTrajectory { .. })
        ));
    }

    #[test]
    fn foot_trajectory_requires_points() {
        let message = SwingData {
            name: "LF_LEG".to_string(),
            foot_trajectory: foot_trajectory_message(&["LF_LEG"], &[]),
            ..Default::default()
        };
        assert!(matches!(
            swing_from_message(&message),
            Err(ConvertError::FootTrajectory { .. })
        ));
    }

    #[test]
    fn foot_trajectory_extracts_the_matching_column() {
        let mut trajectory = foot_trajectory_message(&["RF_LEG", "LF_LEG"], &[0.0, 0.8]);
        trajectory.points[1].transforms[1].translation = Vector3 {
            x: 0.25,
            y: 0.15,
            z: 0.0,
        };
        trajectory.header.frame_id = "odom".to_string();
        let message = SwingData {
            name: "LF_LEG".to_string(),
            foot_trajectory: trajectory,
            ..Default::default()
        };

        let swing = swing_from_message(&message).unwrap();
        match swing.trajectory {
            SwingTrajectory::FootTrajectory(foot) => {
                assert_eq!(foot.frame_id, "odom");
                assert_eq!(foot.knots.len(), 2);
                assert_eq!(foot.knots[1].position, Vec3::new(0.25, 0.15, 0.0));
                assert!((foot.knots[1].time - 0.8).abs() < 1e-9);
            }
            other => panic!("expected foot trajectory, got {other:?}"),
        }
    }

    #[test]
    fn joint_trajectory_rejects_position_row_length_mismatch() {
        let mut trajectory = joint_trajectory_message(&["LF_HAA", "LF_HFE"], &[0.0, 1.0]);
        trajectory.points[1].positions.pop();
        let message = SwingData {
            name: "LF_LEG".to_string(),
            swing_type: SWING_TYPE_JOINT_TRAJECTORY.to_string(),
            joint_trajectory: trajectory,
            ..Default::default()
        };
        assert!(matches!(
            swing_from_message(&message),
            Err(ConvertError::JointTrajectory { .. })
        ));
    }

    #[test]
    fn explicit_joint_type_with_empty_names_fails() {
        let message = SwingData {
            name: "LF_LEG".to_string(),
            swing_type: SWING_TYPE_JOINT_TRAJECTORY.to_string(),
            ..Default::default()
        };
        assert!(matches!(
            swing_from_message(&message),
            Err(ConvertError::JointTrajectory { .. })
        ));
    }

    #[test]
    fn profile_rejects_negative_duration() {
        let mut message = SwingData {
            name: "LF_LEG".to_string(),
            ..Default::default()
        };
        message.profile.duration = -1.0;
        assert!(matches!(
            swing_from_message(&message),
            Err(ConvertError::Profile { .. })
        ));
    }

    #[test]
    fn profile_copies_target_and_defaults_kind() {
        let mut message = SwingData {
            name: "LF_LEG".to_string(),
            ..Default::default()
        };
        message.profile.target.header.frame_id = "odom".to_string();
        message.profile.target.point.x = 0.4;
        message.profile.height = 0.07;
        message.profile.duration = 1.2;

        let swing = swing_from_message(&message).unwrap();
        match swing.trajectory {
            SwingTrajectory::Profile(profile) => {
                assert_eq!(profile.target_frame, "odom");
                assert_eq!(profile.target.x, 0.4);
                assert_eq!(profile.height, 0.07);
                assert_eq!(profile.duration, 1.2);
                assert_eq!(profile.kind, DEFAULT_PROFILE_KIND);
            }
            other => panic!("expected profile, got {other:?}"),
        }
    }

    #[test]
    fn goal_conversion_preserves_step_order_and_numbers() {
        let goal = ExecuteStepsGoal {
            steps: vec![
                gaitlink_msgs::Step {
                    step_number: 1,
                    swing_data: vec![SwingData {
                        name: "LF_LEG".to_string(),
                        ..Default::default()
                    }],
                },
                gaitlink_msgs::Step {
                    step_number: 2,
                    swing_data: vec![],
                },
            ],
        };

        let steps = steps_from_goal(&goal).unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].number, 1);
        assert_eq!(steps[0].swings.len(), 1);
        assert_eq!(steps[1].number, 2);
    }

    #[test]
    fn goal_conversion_fails_on_first_bad_swing() {
        let goal = ExecuteStepsGoal {
            steps: vec![gaitlink_msgs::Step {
                step_number: 1,
                swing_data: vec![SwingData {
                    name: "LF_LEG".to_string(),
                    swing_type: "wiggle".to_string(),
                    ..Default::default()
                }],
            }],
        };
        assert!(steps_from_goal(&goal).is_err());
    }
}
