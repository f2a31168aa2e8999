// src/session/handle.rs — Read-only view of an active membership

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use uuid::Uuid;

use super::types::Message;

/// The message log at one point in time. Messages are shared with the
/// live log, not copied.
pub type Snapshot = Arc<Vec<Arc<Message>>>;

/// Returned by `ChatSession::activate`. Renderers hold this instead of
/// the session: it can read the log but never mutate it.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: Uuid,
    room: String,
    language: String,
    identity: String,
    joined_at: DateTime<Utc>,
    snapshots: watch::Receiver<Snapshot>,
}

impl SessionHandle {
    pub(crate) fn new(
        room: String,
        language: String,
        identity: String,
        snapshots: watch::Receiver<Snapshot>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            room,
            language,
            identity,
            joined_at: Utc::now(),
            snapshots,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Display identity the session joined with.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }

    /// Latest published log.
    pub fn messages(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    /// Wait until the log changes. Returns `false` once the session
    /// has been deactivated or dropped.
    pub async fn changed(&mut self) -> bool {
        self.snapshots.changed().await.is_ok()
    }
}
