// src/channel/mod.rs — Realtime channel abstraction

pub mod events;
pub mod local;

use tokio::sync::mpsc;

use crate::infra::errors::Result;

pub use events::{
    InboundEvent, JoinRequest, NewFile, NewMessage, OutboundEvent, SendFile, SendMessage,
};
pub use local::{LexiconScorer, LocalChannel, LocalHub, SentimentScorer};

/// Queue of inbound events for one session, consumed in arrival order.
pub type InboundQueue = mpsc::UnboundedReceiver<InboundEvent>;

/// Connection to the realtime chat server.
///
/// Emits are fire-and-forget: delivery failures are the transport's
/// concern and are never reported back to the session.
pub trait RealtimeChannel: Send + Sync {
    /// Join a room and subscribe to `newMessage` / `newFile` for it.
    fn join(&self, request: JoinRequest) -> Result<InboundQueue>;

    fn emit(&self, event: OutboundEvent);

    /// Drop all subscriptions and release the connection.
    fn disconnect(&self);
}
