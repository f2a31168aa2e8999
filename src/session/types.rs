// src/session/types.rs — Identities, session configuration and messages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::infra::errors::{ChatError, Result};

/// Text of the synthetic message every session log starts with.
pub const WELCOME_TEXT: &str = "Welcome to the group chat!";

/// Identity string used on the wire: `trim(first + " " + last)`.
pub fn sender_identity(first_name: &str, last_name: &str) -> String {
    format!("{first_name} {last_name}").trim().to_string()
}

/// The local participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl UserIdentity {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    /// Identity string compared against remote senders.
    pub fn display_name(&self) -> String {
        sender_identity(&self.first_name, &self.last_name)
    }
}

/// Immutable settings for one room membership.
///
/// Changing room or language means tearing the session down and
/// activating a new one with a fresh config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    room: String,
    language: String,
    user: UserIdentity,
}

impl SessionConfig {
    pub fn new(room: impl Into<String>, language: impl Into<String>, user: UserIdentity) -> Self {
        Self {
            room: room.into(),
            language: language.into(),
            user,
        }
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn user(&self) -> &UserIdentity {
        &self.user
    }

    /// Room and language must be present; the user is opaque here.
    pub fn validate(&self) -> Result<()> {
        if self.room.trim().is_empty() {
            return Err(ChatError::Config("room is required".into()));
        }
        if self.language.trim().is_empty() {
            return Err(ChatError::Config("language is required".into()));
        }
        Ok(())
    }
}

/// Who wrote a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Author {
    System,
    /// The local participant in this session instance.
    Me,
    Participant {
        first_name: String,
        last_name: String,
    },
}

impl Author {
    pub fn participant(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Author::Participant {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttachment {
    pub file_name: String,
    pub file_type: String,
    /// Remote URL for uploaded images, inline data URL otherwise.
    pub file_data: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Text,
    File,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageBody {
    Text { text: String },
    File(FileAttachment),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: u64,
    pub body: MessageBody,
    pub author: Author,
    pub is_self: bool,
    /// Local append time, not the server's receipt time.
    pub timestamp: DateTime<Utc>,
    pub sentiment_score: Option<f64>,
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self.body {
            MessageBody::Text { .. } => MessageKind::Text,
            MessageBody::File(_) => MessageKind::File,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.body {
            MessageBody::Text { text } => Some(text),
            MessageBody::File(_) => None,
        }
    }

    pub fn file(&self) -> Option<&FileAttachment> {
        match &self.body {
            MessageBody::File(file) => Some(file),
            MessageBody::Text { .. } => None,
        }
    }

    /// A self-authored text still waiting for its server score.
    pub fn is_pending_score(&self) -> bool {
        self.is_self && self.kind() == MessageKind::Text && self.sentiment_score.is_none()
    }
}
