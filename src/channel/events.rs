// src/channel/events.rs — Realtime event payloads
//
// Field names follow the wire: snake_case for identities and text,
// camelCase for file fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::infra::errors::{ChatError, Result};
use crate::session::types::sender_identity;

pub const JOIN_ROOM: &str = "joinRoom";
pub const SEND_MESSAGE: &str = "sendMessage";
pub const SEND_FILE: &str = "sendFile";
pub const NEW_MESSAGE: &str = "newMessage";
pub const NEW_FILE: &str = "newFile";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinRequest {
    pub room: String,
    pub language: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMessage {
    pub room: String,
    pub message: String,
    pub language: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendFile {
    pub room: String,
    pub language: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "fileType")]
    pub file_type: String,
    #[serde(rename = "fileData")]
    pub file_data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMessage {
    pub message: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub sentiment_score: Option<f64>,
}

impl NewMessage {
    pub fn sender(&self) -> String {
        sender_identity(&self.first_name, &self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFile {
    #[serde(rename = "fileName")]
    pub file_name: String,
    #[serde(rename = "fileType")]
    pub file_type: String,
    #[serde(rename = "fileData")]
    pub file_data: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl NewFile {
    pub fn sender(&self) -> String {
        sender_identity(&self.first_name, &self.last_name)
    }
}

/// Client → server.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundEvent {
    SendMessage(SendMessage),
    SendFile(SendFile),
}

impl OutboundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            OutboundEvent::SendMessage(_) => SEND_MESSAGE,
            OutboundEvent::SendFile(_) => SEND_FILE,
        }
    }

    /// Event name and JSON payload, for transports that frame named events.
    pub fn to_wire(&self) -> Result<(&'static str, Value)> {
        let payload = match self {
            OutboundEvent::SendMessage(m) => serde_json::to_value(m),
            OutboundEvent::SendFile(f) => serde_json::to_value(f),
        }
        .map_err(|e| ChatError::Channel(format!("encode {}: {e}", self.name())))?;
        Ok((self.name(), payload))
    }
}

/// Server → client.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    NewMessage(NewMessage),
    NewFile(NewFile),
}

impl InboundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            InboundEvent::NewMessage(_) => NEW_MESSAGE,
            InboundEvent::NewFile(_) => NEW_FILE,
        }
    }

    /// Decode a named event. Events this client does not subscribe to
    /// yield `Ok(None)`.
    pub fn from_wire(name: &str, payload: Value) -> Result<Option<Self>> {
        let event = match name {
            NEW_MESSAGE => InboundEvent::NewMessage(
                serde_json::from_value(payload)
                    .map_err(|e| ChatError::Channel(format!("decode {NEW_MESSAGE}: {e}")))?,
            ),
            NEW_FILE => InboundEvent::NewFile(
                serde_json::from_value(payload)
                    .map_err(|e| ChatError::Channel(format!("decode {NEW_FILE}: {e}")))?,
            ),
            _ => return Ok(None),
        };
        Ok(Some(event))
    }
}
