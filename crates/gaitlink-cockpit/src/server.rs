//! [`CockpitServer`] – HTTP + WebSocket server for the dashboard UI.
//!
//! Listens on `0.0.0.0:8080` (configurable via [`CockpitServer::with_port`]).
//!
//! * Regular HTTP requests → 200 OK with the embedded dashboard HTML.
//! * WebSocket upgrades → bidirectional bridge to the [`EventBus`].

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use gaitlink_bridge::bus::{BusPayload, Event, EventBus};
use gaitlink_core::{GaitError, NavCommand, PlaybackCommand};
use serde_json::Value;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{error, info, warn};

/// Default TCP port for the cockpit HTTP/WebSocket server.
pub const DEFAULT_PORT: u16 = 8080;

/// The compiled-in dashboard single-page application (HTML + CSS + JS).
const COCKPIT_HTML: &str = include_str!("cockpit.html");

// ---------------------------------------------------------------------------
// CockpitServer
// ---------------------------------------------------------------------------

/// Lightweight HTTP + WebSocket server that serves the dashboard UI and
/// bridges the internal [`EventBus`] to every connected browser.
///
/// # Example
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use gaitlink_bridge::EventBus;
/// use gaitlink_cockpit::CockpitServer;
///
/// #[tokio::main]
/// async fn main() {
///     let bus = Arc::new(EventBus::default());
///     CockpitServer::new(Arc::clone(&bus))
///         .run()
///         .await
///         .expect("cockpit server failed");
/// }
/// ```
pub struct CockpitServer {
    bus: Arc<EventBus>,
    port: u16,
}

impl CockpitServer {
    /// Create a server backed by `bus` on the [`DEFAULT_PORT`].
    pub fn new(bus: Arc<EventBus>) -> Self {
        Self {
            bus,
            port: DEFAULT_PORT,
        }
    }

    /// Override the listening port (builder-style).
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Return the configured port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Start the server.
    ///
    /// Listens for TCP connections and dispatches each one as either a
    /// WebSocket bridge (when the HTTP request contains `Upgrade: websocket`)
    /// or a plain HTTP response serving the dashboard HTML.
    ///
    /// # Errors
    ///
    /// Returns [`GaitError::Transport`] if the TCP listener cannot bind.
    pub async fn run(self) -> Result<(), GaitError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| GaitError::Transport {
            endpoint: addr.to_string(),
            details: e.to_string(),
        })?;

        info!(port = self.port, "cockpit UI listening");

        loop {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    let bus = Arc::clone(&self.bus);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, peer, bus).await {
                            error!(peer = %peer, error = %e, "cockpit client error");
                        }
                    });
                }
                Err(e) => {
                    error!(error = %e, "cockpit accept error");
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Per-connection handler
// ---------------------------------------------------------------------------

async fn handle_connection(
    stream: TcpStream,
    peer: SocketAddr,
    bus: Arc<EventBus>,
) -> Result<(), GaitError> {
    // Peek at the first bytes of the request to decide whether to upgrade
    // to WebSocket or serve the static HTML.  `peek` does not consume the
    // data, so tungstenite's handshaker sees the full HTTP request.
    let mut buf = [0u8; 1024];
    let n = stream.peek(&mut buf).await.map_err(|e| GaitError::Transport {
        endpoint: peer.to_string(),
        details: format!("peek: {e}"),
    })?;

    let header_preview = String::from_utf8_lossy(&buf[..n]);
    let is_ws_upgrade = header_preview.lines().any(|line| {
        line.to_lowercase().starts_with("upgrade:") && line.to_lowercase().contains("websocket")
    });

    if is_ws_upgrade {
        handle_ws(stream, peer, bus).await
    } else {
        serve_html(stream, peer).await
    }
}

// ---------------------------------------------------------------------------
// Plain HTTP: serve the embedded dashboard HTML
// ---------------------------------------------------------------------------

async fn serve_html(mut stream: TcpStream, peer: SocketAddr) -> Result<(), GaitError> {
    let body = COCKPIT_HTML;
    let response = format!(
        "HTTP/1.1 200 OK\r\n\
         Content-Type: text/html; charset=utf-8\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\
         \r\n\
         {}",
        body.len(),
        body
    );
    stream
        .write_all(response.as_bytes())
        .await
        .map_err(|e| GaitError::Transport {
            endpoint: peer.to_string(),
            details: format!("HTTP write: {e}"),
        })?;
    Ok(())
}

// ---------------------------------------------------------------------------
// WebSocket: bidirectional EventBus bridge
// ---------------------------------------------------------------------------

async fn handle_ws(
    stream: TcpStream,
    peer: SocketAddr,
    bus: Arc<EventBus>,
) -> Result<(), GaitError> {
    let ws_stream = accept_async(stream).await.map_err(|e| GaitError::Transport {
        endpoint: peer.to_string(),
        details: format!("ws handshake: {e}"),
    })?;
    info!(peer = %peer, "dashboard connected");

    let (mut ws_tx, mut ws_rx) = ws_stream.split();
    let mut bus_rx = bus.subscribe();

    loop {
        tokio::select! {
            // Downstream: EventBus → browser.
            maybe_event = bus_rx.recv() => {
                let Some(event) = maybe_event else {
                    break;
                };
                match serde_json::to_string(&event) {
                    Ok(json) => {
                        if ws_tx.send(Message::Text(json.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "event serialization error");
                    }
                }
            }
            // Upstream: browser → EventBus.
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        handle_upstream_frame(text.as_str(), &bus);
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(_)) => break,
                    _ => {}
                }
            }
        }
    }

    info!(peer = %peer, "dashboard disconnected");
    Ok(())
}

// ---------------------------------------------------------------------------
// Upstream frame parser
// ---------------------------------------------------------------------------

/// Parse an incoming WebSocket text frame from the dashboard browser and
/// inject the appropriate control event onto the [`EventBus`].
///
/// Recognised topics:
///
/// | Topic | Effect |
/// |---|---|
/// | `/preview/control` | Publishes a typed [`PlaybackCommand`] |
/// | `/monitor/nav` | Publishes a typed [`NavCommand`] |
///
/// Unknown or malformed frames are silently ignored.
pub(crate) fn handle_upstream_frame(text: &str, bus: &Arc<EventBus>) {
    let Ok(json) = serde_json::from_str::<Value>(text) else {
        return;
    };

    let topic = json.get("topic").and_then(|t| t.as_str()).unwrap_or("");
    let msg = json.get("msg").cloned().unwrap_or(Value::Null);

    if topic == "/preview/control" {
        if let Ok(command) = serde_json::from_value::<PlaybackCommand>(msg) {
            let event = Event::new("gaitlink-cockpit::client", BusPayload::Playback(command));
            let _ = bus.publish(event);
        }
        return;
    }

    if topic == "/monitor/nav" {
        if let Ok(command) = serde_json::from_value::<NavCommand>(msg) {
            let event = Event::new("gaitlink-cockpit::client", BusPayload::Nav(command));
            let _ = bus.publish(event);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
