//! `gaitlink-monitor` – Execution Dashboard
//!
//! A reactive projection of a running step-execution action onto widget
//! state: progress bars, per-limb activity coloring, a status icon and a
//! browsable history of step descriptions.
//!
//! - [`history`] – the append-only description log with its browsing cursor.
//! - [`model`] – the monitor itself, folding goal/feedback/result messages
//!   into a [`gaitlink_core::MonitorSnapshot`].
//! - [`service`] – the bus-driven task around the model.

pub mod history;
pub mod model;
pub mod service;

pub use history::DescriptionHistory;
pub use model::{ExecutionMonitor, PROGRESS_SCALE};
pub use service::{action_topics, run_monitor, ActionTopics};
