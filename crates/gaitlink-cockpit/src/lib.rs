//! `gaitlink-cockpit` – The Dashboard Web UI Server
//!
//! Boots a lightweight HTTP + WebSocket server (default port `8080`) that:
//!
//! 1. **Serves** the static dashboard single-page application (HTML/CSS/JS)
//!    at every non-WebSocket HTTP path.
//!
//! 2. **Bridges** the internal [`EventBus`] to every connected browser tab
//!    over a persistent WebSocket connection so that
//!    [`MonitorSnapshot`] and [`PreviewSnapshot`] events stream to the UI in
//!    real-time.
//!
//! 3. **Accepts** upstream control frames from the browser:
//!    - `"/preview/control"` → publishes a typed
//!      [`PlaybackCommand`][gaitlink_core::PlaybackCommand] for the preview
//!      panel (play, pause, seek, speed, auto-play).
//!    - `"/monitor/nav"` → publishes a typed
//!      [`NavCommand`][gaitlink_core::NavCommand] for the monitor's history
//!      cursor (top, up, down, bottom, wheel scroll).
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use gaitlink_bridge::EventBus;
//! use gaitlink_cockpit::CockpitServer;
//!
//! #[tokio::main]
//! async fn main() {
//!     let bus = Arc::new(EventBus::default());
//!     CockpitServer::new(Arc::clone(&bus))
//!         .run()
//!         .await
//!         .expect("cockpit server failed");
//! }
//! ```
//!
//! [`EventBus`]: gaitlink_bridge::EventBus
//! [`MonitorSnapshot`]: gaitlink_core::MonitorSnapshot
//! [`PreviewSnapshot`]: gaitlink_core::PreviewSnapshot

pub mod server;

pub use server::{CockpitServer, DEFAULT_PORT};
