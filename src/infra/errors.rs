// src/infra/errors.rs — Error types for roomchat

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    // Caller errors (fatal to the attempted operation)
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session lifecycle error: {0}")]
    Lifecycle(String),

    // Transport errors (recoverable, surfaced for user notification)
    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Realtime channel error: {0}")]
    Channel(String),

    #[error("Invalid inline payload: {0}")]
    InvalidPayload(String),

    // Infra
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl ChatError {
    /// Errors the user can retry after being notified.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ChatError::Upload(_) | ChatError::Channel(_))
    }

    pub(crate) fn inactive(operation: &str) -> Self {
        ChatError::Lifecycle(format!("{operation} called on an inactive session"))
    }
}

pub type Result<T> = std::result::Result<T, ChatError>;
