// src/session/mod.rs — Chat session: room membership, optimistic sends, echo reconciliation
//
// A session is created after setup, activated when the dashboard opens and
// deactivated on logout. Deactivation is terminal for the instance; a new
// room or language needs a new session.

pub mod handle;
pub mod log;
pub mod types;

use std::sync::Arc;

use tokio::sync::watch;

use crate::channel::{
    InboundEvent, InboundQueue, JoinRequest, NewFile, NewMessage, OutboundEvent,
    RealtimeChannel, SendFile, SendMessage,
};
use crate::infra::errors::{ChatError, Result};
use crate::upload::{encode_inline, FileRef, Uploader};

pub use handle::{SessionHandle, Snapshot};
pub use log::MessageLog;
pub use types::{
    sender_identity, Author, FileAttachment, Message, MessageBody, MessageKind, SessionConfig,
    UserIdentity, WELCOME_TEXT,
};

/// What an inbound event did to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteOutcome {
    /// A new message from another participant.
    Appended(u64),
    /// Our own echo matched a pending message.
    Reconciled(u64),
    /// Unmatched echo, file echo, or empty text.
    Dropped,
}

struct Membership {
    config: SessionConfig,
    identity: String,
    inbound: InboundQueue,
    snapshots: watch::Sender<Snapshot>,
}

impl Membership {
    fn send_message(&self, text: &str) -> SendMessage {
        let user = self.config.user();
        SendMessage {
            room: self.config.room().to_string(),
            message: text.to_string(),
            language: self.config.language().to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }

    fn send_file(&self, file: &FileAttachment) -> SendFile {
        let user = self.config.user();
        SendFile {
            room: self.config.room().to_string(),
            language: self.config.language().to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            file_name: file.file_name.clone(),
            file_type: file.file_type.clone(),
            file_data: file.file_data.clone(),
        }
    }
}

// `Idle` and `Left` are both inactive; only `Idle` may be activated.
enum Phase {
    Idle,
    Active(Box<Membership>),
    Left,
}

/// Owns the message log and the join/leave lifecycle for one room.
///
/// All methods take `&mut self`: a session is driven from a single
/// event-processing context and never shared.
pub struct ChatSession {
    channel: Arc<dyn RealtimeChannel>,
    uploader: Arc<dyn Uploader>,
    log: MessageLog,
    phase: Phase,
}

impl ChatSession {
    pub fn new(channel: Arc<dyn RealtimeChannel>, uploader: Arc<dyn Uploader>) -> Self {
        Self {
            channel,
            uploader,
            log: MessageLog::new(),
            phase: Phase::Idle,
        }
    }

    /// Join the configured room and start a fresh log with the welcome message.
    pub fn activate(&mut self, config: SessionConfig) -> Result<SessionHandle> {
        match self.phase {
            Phase::Idle => {}
            Phase::Active(_) => {
                return Err(ChatError::Lifecycle("session is already active".into()));
            }
            Phase::Left => {
                return Err(ChatError::Lifecycle(
                    "a deactivated session cannot be re-activated".into(),
                ));
            }
        }
        config.validate()?;

        let user = config.user();
        let identity = user.display_name();
        let inbound = self.channel.join(JoinRequest {
            room: config.room().to_string(),
            language: config.language().to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        })?;

        self.log = MessageLog::with_welcome();
        let (snapshots, rx) = watch::channel(Arc::new(self.log.entries().to_vec()));
        let handle = SessionHandle::new(
            config.room().to_string(),
            config.language().to_string(),
            identity.clone(),
            rx,
        );

        tracing::info!(
            room = %config.room(),
            language = %config.language(),
            user = %identity,
            "joined room"
        );
        self.phase = Phase::Active(Box::new(Membership {
            config,
            identity,
            inbound,
            snapshots,
        }));
        Ok(handle)
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, Phase::Active(_))
    }

    pub fn config(&self) -> Option<&SessionConfig> {
        match &self.phase {
            Phase::Active(m) => Some(&m.config),
            _ => None,
        }
    }

    pub fn messages(&self) -> &[Arc<Message>] {
        self.log.entries()
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    fn membership(&self, operation: &str) -> Result<&Membership> {
        match &self.phase {
            Phase::Active(m) => Ok(m),
            _ => Err(ChatError::inactive(operation)),
        }
    }

    fn publish(&self) {
        if let Phase::Active(m) = &self.phase {
            m.snapshots.send_replace(Arc::new(self.log.entries().to_vec()));
        }
    }

    /// Append our message immediately, then hand it to the channel.
    ///
    /// Whitespace-only input is ignored and returns `Ok(None)`.
    pub fn send_text(&mut self, text: &str) -> Result<Option<Message>> {
        let membership = self.membership("send_text")?;
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let event = membership.send_message(text);

        let message = self
            .log
            .append(
                MessageBody::Text {
                    text: text.to_string(),
                },
                Author::Me,
                true,
                None,
            )
            .clone();
        self.publish();

        self.channel.emit(OutboundEvent::SendMessage(event));
        Ok(Some(message))
    }

    /// Send an attachment. Images are uploaded first and nothing is
    /// appended if that fails; other types are sent inline.
    pub async fn send_file(&mut self, file: FileRef) -> Result<Message> {
        self.membership("send_file")?;

        let file_data = if file.is_image() {
            match self.uploader.upload(&file).await {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!(file = %file.name, error = %e, "upload failed");
                    return Err(match e {
                        ChatError::Upload(_) => e,
                        other => ChatError::Upload(other.to_string()),
                    });
                }
            }
        } else {
            encode_inline(&file.mime_type, &file.bytes)
        };

        let attachment = FileAttachment {
            file_name: file.name,
            file_type: file.mime_type,
            file_data,
        };
        let event = self.membership("send_file")?.send_file(&attachment);

        let message = self
            .log
            .append(MessageBody::File(attachment), Author::Me, true, None)
            .clone();
        self.publish();

        self.channel.emit(OutboundEvent::SendFile(event));
        Ok(message)
    }

    /// Handle a `newMessage` event: reconcile our own echo or append.
    pub fn on_remote_text(&mut self, event: NewMessage) -> Result<RemoteOutcome> {
        let is_echo = self.membership("on_remote_text")?.identity == event.sender();

        let outcome = if event.message.trim().is_empty() {
            RemoteOutcome::Dropped
        } else if is_echo {
            match self.log.reconcile_score(&event.message, event.sentiment_score) {
                Some(id) => {
                    tracing::debug!(id, score = ?event.sentiment_score, "reconciled self echo");
                    RemoteOutcome::Reconciled(id)
                }
                None => {
                    tracing::debug!("dropped self echo with no pending match");
                    RemoteOutcome::Dropped
                }
            }
        } else {
            let id = self
                .log
                .append(
                    MessageBody::Text {
                        text: event.message,
                    },
                    Author::participant(event.first_name, event.last_name),
                    false,
                    event.sentiment_score,
                )
                .id;
            RemoteOutcome::Appended(id)
        };

        if outcome != RemoteOutcome::Dropped {
            self.publish();
        }
        Ok(outcome)
    }

    /// Handle a `newFile` event. Our own file echoes are dropped.
    pub fn on_remote_file(&mut self, event: NewFile) -> Result<RemoteOutcome> {
        let sender = event.sender();
        if self.membership("on_remote_file")?.identity == sender {
            tracing::debug!(file = %event.file_name, "dropped self file echo");
            return Ok(RemoteOutcome::Dropped);
        }

        let id = self
            .log
            .append(
                MessageBody::File(FileAttachment {
                    file_name: event.file_name,
                    file_type: event.file_type,
                    file_data: event.file_data,
                }),
                Author::participant(event.first_name, event.last_name),
                false,
                None,
            )
            .id;
        self.publish();
        Ok(RemoteOutcome::Appended(id))
    }

    pub fn apply(&mut self, event: InboundEvent) -> Result<RemoteOutcome> {
        match event {
            InboundEvent::NewMessage(m) => self.on_remote_text(m),
            InboundEvent::NewFile(f) => self.on_remote_file(f),
        }
    }

    /// Apply every event already queued, in arrival order.
    pub fn process_pending(&mut self) -> Vec<RemoteOutcome> {
        let mut outcomes = Vec::new();
        loop {
            let event = match &mut self.phase {
                Phase::Active(m) => match m.inbound.try_recv() {
                    Ok(event) => event,
                    Err(_) => break,
                },
                _ => break,
            };
            if let Ok(outcome) = self.apply(event) {
                outcomes.push(outcome);
            }
        }
        outcomes
    }

    /// Wait for the next inbound event and apply it.
    ///
    /// Returns `None` when the session is inactive or the channel closed
    /// the queue. Cancel-safe, so it can sit in a `select!`.
    pub async fn next_event(&mut self) -> Option<RemoteOutcome> {
        let event = match &mut self.phase {
            Phase::Active(m) => m.inbound.recv().await?,
            _ => return None,
        };
        self.apply(event).ok()
    }

    /// Leave the room. Safe to call repeatedly.
    pub fn deactivate(&mut self) {
        if !self.is_active() {
            return;
        }
        if let Phase::Active(membership) = std::mem::replace(&mut self.phase, Phase::Left) {
            let room = membership.config.room().to_string();
            // Closes the inbound queue and the snapshot stream.
            drop(membership);
            self.channel.disconnect();
            tracing::info!(room = %room, messages = self.log.len(), "left room");
        }
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.deactivate();
    }
}
