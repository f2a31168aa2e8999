// src/setup/store.rs — File-backed settings store (TOML)

use std::path::{Path, PathBuf};

use super::ChatSettings;
use crate::infra::errors::Result;
use crate::infra::paths;

pub struct SettingsStore {
    path: PathBuf,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(paths::settings_file_path())
    }
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `None` until setup has been completed once.
    pub fn load(&self) -> Result<Option<ChatSettings>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(Some(toml::from_str(&content)?))
    }

    pub fn save(&self, settings: &ChatSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        // Write-then-rename: readers never see a partial file.
        let tmp = self.path.with_extension("toml.tmp");
        std::fs::write(&tmp, toml::to_string(settings)?)?;
        std::fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), room = %settings.room, "settings saved");
        Ok(())
    }

    /// Forget the choice (logout).
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
