//! `gaitlink-bridge` – Wire Plumbing
//!
//! Everything that moves messages between the outside world and the gaitlink
//! front ends:
//!
//! 1. **Bus** – the internal event queue. A single broadcast channel so that
//!    every subscriber sees every event in arrival order.
//! 2. **Convert** – wire `SwingData`/goal messages into the wire-free domain
//!    model, dispatching on the declared or inferred trajectory type.
//! 3. **Route** – a mutable subscription table mapping topic names to message
//!    lanes, plus the rosbridge-style frame router feeding the bus.
//! 4. **Ingest** – the WebSocket endpoint relays push topic frames into.
//!
//! The bridge is deliberately agnostic about what the data *means*; it only
//! handles serialisation, routing and transport.

pub mod bus;
pub mod convert;
pub mod ingest;
pub mod route;

pub use bus::{BusPayload, BusReceiver, Event, EventBus};
pub use convert::{resolve_swing_type, steps_from_goal, swing_from_message};
pub use ingest::IngestServer;
pub use route::{FrameRouter, Lane, SubscriptionTable};
