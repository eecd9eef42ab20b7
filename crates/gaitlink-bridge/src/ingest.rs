//! WebSocket ingest endpoint.
//!
//! Relays (a rosbridge forwarder, a bag replayer, a simulator) connect here
//! and push `{"op":"publish",...}` text frames. Every frame goes through the
//! [`FrameRouter`]; the relay gets no replies besides protocol-level pongs.

use std::net::SocketAddr;

use futures_util::StreamExt;
use gaitlink_core::GaitError;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{error, info};

use crate::route::FrameRouter;

/// Accepts relay connections and feeds their frames to the router.
#[derive(Clone)]
pub struct IngestServer {
    router: FrameRouter,
}

impl IngestServer {
    pub fn new(router: FrameRouter) -> Self {
        Self { router }
    }

    /// Start the ingest server on `addr`. Runs until the listener fails.
    ///
    /// # Errors
    ///
    /// Returns [`GaitError::Transport`] if the TCP listener cannot be bound.
    pub async fn run(self, addr: SocketAddr) -> Result<(), GaitError> {
        let listener = TcpListener::bind(addr).await.map_err(|e| GaitError::Transport {
            endpoint: addr.to_string(),
            details: e.to_string(),
        })?;
        info!(addr = %addr, "ingest endpoint listening");

        loop {
            match listener.accept().await {
                Ok((stream, peer)) => {
                    let server = self.clone();
                    tokio::spawn(async move {
                        if let Err(e) = server.handle_relay(stream, peer).await {
                            error!(peer = %peer, error = %e, "relay connection error");
                        }
                    });
                }
                Err(e) => {
                    error!(error = %e, "ingest accept error");
                }
            }
        }
    }

    async fn handle_relay(&self, stream: TcpStream, peer: SocketAddr) -> Result<(), GaitError> {
        let ws_stream = accept_async(stream).await.map_err(|e| GaitError::Transport {
            endpoint: peer.to_string(),
            details: format!("ws handshake: {e}"),
        })?;
        info!(peer = %peer, "relay connected");

        let (_, mut ws_rx) = ws_stream.split();
        while let Some(message) = ws_rx.next().await {
            match message {
                Ok(Message::Text(text)) => self.router.route_text(text.as_str()),
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(_) => break,
            }
        }

        info!(peer = %peer, "relay disconnected");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{BusPayload, EventBus};
    use crate::route::{Lane, SubscriptionTable};
    use futures_util::SinkExt;
    use std::sync::Arc;

    async fn start_server() -> (Arc<EventBus>, Arc<SubscriptionTable>, SocketAddr) {
        let bus = Arc::new(EventBus::default());
        let table = SubscriptionTable::new();
        let router = FrameRouter::new(Arc::clone(&bus), Arc::clone(&table));

        // Bind on an ephemeral port, then run the accept loop by hand so the
        // test knows the address.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = IngestServer::new(router);
        tokio::spawn(async move {
            loop {
                let Ok((stream, peer)) = listener.accept().await else {
                    break;
                };
                let server = server.clone();
                tokio::spawn(async move {
                    let _ = server.handle_relay(stream, peer).await;
                });
            }
        });

        (bus, table, addr)
    }

    #[tokio::test]
    async fn relay_frames_reach_the_bus() {
        let (bus, table, addr) = start_server().await;
        table.subscribe("/free_gait/execute_steps/result", Lane::Result);
        let mut rx = bus.subscribe();

        let (mut ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
            .await
            .unwrap();
        ws.send(Message::Text(
            r#"{"op":"publish","topic":"/free_gait/execute_steps/result","msg":{"status":0}}"#
                .into(),
        ))
        .await
        .unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.source, "/free_gait/execute_steps/result");
        assert!(matches!(event.payload, BusPayload::Result(_)));
    }

    #[tokio::test]
    async fn binary_frames_are_ignored() {
        let (bus, table, addr) = start_server().await;
        table.subscribe("/free_gait/goal", Lane::Goal);
        let mut rx = bus.subscribe();

        let (mut ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
            .await
            .unwrap();
        ws.send(Message::Binary(vec![1, 2, 3].into())).await.unwrap();
        ws.send(Message::Text(
            r#"{"op":"publish","topic":"/free_gait/goal","msg":{"steps":[]}}"#.into(),
        ))
        .await
        .unwrap();

        // Only the text frame produced an event.
        let event = rx.recv().await.unwrap();
        assert!(matches!(event.payload, BusPayload::Goal(_)));
        assert!(rx.try_recv().is_err());
    }
}
