//! `gaitlink-preview` – Motion Preview
//!
//! Scrub through a planned motion before the robot moves:
//!
//! - [`sampler`] – the [`MotionSynthesizer`] seam standing in for the gait
//!   core, plus the shipped knot-interpolating default.
//! - [`playback`] – the playback engine: a time cursor over a precomputed
//!   state batch, with run/stop/seek/speed and observer callbacks.
//! - [`panel`] – the preview panel: topic wiring, goal handling, slider and
//!   control state.
//! - [`visual`] – per-limb end-effector polylines for rendering.
//! - [`service`] – the bus-driven task tying the pieces together.

pub mod panel;
pub mod playback;
pub mod sampler;
pub mod service;
pub mod visual;

pub use panel::PreviewPanel;
pub use playback::{PlaybackEngine, PlaybackEvent};
pub use sampler::{KnotSampler, MotionSynthesizer};
pub use service::run_preview;
pub use visual::limb_polylines;
