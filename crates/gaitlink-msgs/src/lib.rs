//! `gaitlink-msgs` – Wire Message Schema
//!
//! Rust definitions of every ROS-style message the gaitlink adapters consume,
//! as plain `serde` structs so they can be decoded straight out of
//! rosbridge-compatible JSON frames.
//!
//! # Modules
//!
//! - [`builtin`] – `Time` and `Duration` primitives shared by all stamped
//!   messages.
//! - [`std_msgs`] – the `Header` carried by stamped messages.
//! - [`geometry_msgs`] – vectors, points, transforms and twists.
//! - [`trajectory_msgs`] – joint-space and multi-DOF trajectory messages.
//! - [`swing`] – the swing-description message and its profile sub-message.
//! - [`action`] – the step-execution action triple (goal / feedback / result)
//!   and its status constants.
//! - [`robot_state`] – the robot stance snapshot the preview seeds itself
//!   with.
//!
//! Every type derives `Serialize`/`Deserialize` with `#[serde(default)]` so
//! that partially populated frames (the normal case on the wire, where
//! unused trajectory sub-messages arrive empty) decode without errors.

pub mod action;
pub mod builtin;
pub mod geometry_msgs;
pub mod robot_state;
pub mod std_msgs;
pub mod swing;
pub mod trajectory_msgs;

pub use action::{ExecuteStepsFeedback, ExecuteStepsGoal, ExecuteStepsResult, Step};
pub use robot_state::RobotState;
pub use swing::{SwingData, SwingProfile};
