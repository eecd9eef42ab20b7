//! `gaitlink-core` – Domain Model
//!
//! The wire-free data model shared by every gaitlink front end. Nothing in
//! this crate knows about topics, frames-on-the-wire, or transports; it is
//! the vocabulary the adapters translate into and out of.
//!
//! # Modules
//!
//! - [`limb`] – the fixed quadruped limb set and its wire identifiers.
//! - [`swing`] – swing descriptions with their one-of trajectory variant.
//! - [`step`] – ordered step sequences built from swings.
//! - [`state`] – stances, sampled preview states and state batches.
//! - [`snapshot`] – UI-facing projections (progress bars, status icons,
//!   limb indicators, panel snapshots).
//! - [`control`] – user control commands for playback and history browsing.
//! - [`error`] – shared error enums.

pub mod control;
pub mod error;
pub mod limb;
pub mod snapshot;
pub mod state;
pub mod step;
pub mod swing;

pub use control::{NavCommand, PlaybackCommand};
pub use error::{ConvertError, GaitError};
pub use limb::Limb;
pub use snapshot::{BarState, LimbIndicator, MonitorSnapshot, PreviewSnapshot, StatusIcon, TopicStatus};
pub use state::{PreviewState, Stance, StateBatch};
pub use step::Step;
pub use swing::{FootTrajectory, JointTrajectory, SwingDescription, SwingProfile, SwingTrajectory, Vec3};
