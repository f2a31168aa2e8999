// src/channel/local.rs — In-process room hub
//
// Behaves like the chat server's room fan-out: a `sendMessage` from any
// member is re-broadcast as `newMessage` to every member of the room,
// the sender included. Used by tests and by the CLI's offline mode.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::mpsc;

use super::events::{InboundEvent, JoinRequest, NewFile, NewMessage, OutboundEvent, JOIN_ROOM};
use super::{InboundQueue, RealtimeChannel};
use crate::infra::errors::{ChatError, Result};

/// Server-side sentiment scoring hook.
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> Option<f64>;
}

/// Word-list scorer: sums per-word weights, `None` when no word is known.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    weights: HashMap<String, i32>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        let words: [(&str, i32); 16] = [
            ("love", 3),
            ("great", 3),
            ("awesome", 4),
            ("good", 3),
            ("nice", 3),
            ("thanks", 2),
            ("happy", 3),
            ("like", 2),
            ("hate", -3),
            ("bad", -3),
            ("awful", -3),
            ("terrible", -3),
            ("sad", -2),
            ("angry", -3),
            ("broken", -1),
            ("no", -1),
        ];
        Self {
            weights: words.iter().map(|(w, s)| (w.to_string(), *s)).collect(),
        }
    }
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> Option<f64> {
        let mut hits = 0;
        let mut total = 0;
        for word in text.split(|c: char| !c.is_alphanumeric()) {
            if let Some(w) = self.weights.get(&word.to_lowercase()) {
                hits += 1;
                total += w;
            }
        }
        (hits > 0).then_some(f64::from(total))
    }
}

struct Member {
    conn: u64,
    room: String,
    tx: mpsc::UnboundedSender<InboundEvent>,
}

#[derive(Default)]
struct HubState {
    next_conn: u64,
    members: Vec<Member>,
}

/// Shared room registry. Cheap to clone.
#[derive(Clone, Default)]
pub struct LocalHub {
    state: Arc<Mutex<HubState>>,
    scorer: Option<Arc<dyn SentimentScorer>>,
}

impl LocalHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a scorer to every broadcast `newMessage`.
    pub fn with_scorer(mut self, scorer: impl SentimentScorer + 'static) -> Self {
        self.scorer = Some(Arc::new(scorer));
        self
    }

    fn lock(&self) -> MutexGuard<'_, HubState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Open a new connection to the hub.
    pub fn connect(&self) -> LocalChannel {
        let mut state = self.lock();
        state.next_conn += 1;
        LocalChannel {
            hub: self.clone(),
            conn: state.next_conn,
        }
    }

    pub fn member_count(&self, room: &str) -> usize {
        self.lock().members.iter().filter(|m| m.room == room).count()
    }

    /// Deliver an event to every member of `room`, as if another
    /// participant had sent it. Returns how many members received it.
    pub fn inject(&self, room: &str, event: InboundEvent) -> usize {
        let mut state = self.lock();
        let mut delivered = 0;
        state.members.retain(|m| {
            if m.room != room {
                return true;
            }
            let alive = m.tx.send(event.clone()).is_ok();
            if alive {
                delivered += 1;
            }
            alive
        });
        delivered
    }

    fn broadcast(&self, event: OutboundEvent) {
        let (room, inbound) = match event {
            OutboundEvent::SendMessage(m) => {
                let sentiment_score = self.scorer.as_ref().and_then(|s| s.score(&m.message));
                (
                    m.room,
                    InboundEvent::NewMessage(NewMessage {
                        message: m.message,
                        first_name: m.first_name,
                        last_name: m.last_name,
                        sentiment_score,
                    }),
                )
            }
            OutboundEvent::SendFile(f) => (
                f.room,
                InboundEvent::NewFile(NewFile {
                    file_name: f.file_name,
                    file_type: f.file_type,
                    file_data: f.file_data,
                    first_name: f.first_name,
                    last_name: f.last_name,
                }),
            ),
        };
        let delivered = self.inject(&room, inbound);
        tracing::debug!(room = %room, delivered, "hub broadcast");
    }
}

/// One client connection to a [`LocalHub`].
pub struct LocalChannel {
    hub: LocalHub,
    conn: u64,
}

impl RealtimeChannel for LocalChannel {
    fn join(&self, request: JoinRequest) -> Result<InboundQueue> {
        if request.room.is_empty() {
            return Err(ChatError::Channel("cannot join an unnamed room".into()));
        }
        let (tx, rx) = mpsc::unbounded_channel();
        self.hub.lock().members.push(Member {
            conn: self.conn,
            room: request.room.clone(),
            tx,
        });
        tracing::debug!(
            event = JOIN_ROOM,
            conn = self.conn,
            room = %request.room,
            language = %request.language,
            "joined"
        );
        Ok(rx)
    }

    fn emit(&self, event: OutboundEvent) {
        tracing::debug!(event = event.name(), conn = self.conn, "emit");
        self.hub.broadcast(event);
    }

    fn disconnect(&self) {
        let conn = self.conn;
        self.hub.lock().members.retain(|m| m.conn != conn);
        tracing::debug!(conn, "disconnected");
    }
}
