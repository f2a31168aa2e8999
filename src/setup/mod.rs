// src/setup/mod.rs — One-time room/language choice and its persistence

pub mod catalog;
pub mod store;

use serde::{Deserialize, Serialize};

use crate::infra::errors::{ChatError, Result};
use crate::session::{SessionConfig, UserIdentity};

pub use catalog::{find_language, find_room, Language, LANGUAGES, ROOMS};
pub use store::SettingsStore;

/// The user's setup choice, persisted between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSettings {
    pub room: String,
    pub language: String,
    pub language_name: String,
}

impl ChatSettings {
    /// Validate both choices against the catalog.
    pub fn new(room: &str, language: &str) -> Result<Self> {
        let room = find_room(room)
            .ok_or_else(|| ChatError::Config(format!("unknown room '{room}'")))?;
        let lang = find_language(language)
            .ok_or_else(|| ChatError::Config(format!("unsupported language '{language}'")))?;
        Ok(Self {
            room: room.to_string(),
            language: lang.code.to_string(),
            language_name: lang.name.to_string(),
        })
    }

    pub fn session_config(&self, user: UserIdentity) -> SessionConfig {
        SessionConfig::new(self.room.clone(), self.language.clone(), user)
    }
}

impl Default for ChatSettings {
    fn default() -> Self {
        let lang = catalog::default_language();
        Self {
            room: catalog::default_room().to_string(),
            language: lang.code.to_string(),
            language_name: lang.name.to_string(),
        }
    }
}
