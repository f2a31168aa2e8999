// src/infra/paths.rs — Config and state locations
//
// All paths respect the ROOMCHAT_HOME environment variable for isolation.
// When unset, config lives in ~/.roomchat/ and state in XDG_DATA_HOME/roomchat.

use directories::{BaseDirs, ProjectDirs};
use std::path::PathBuf;

fn roomchat_home() -> Option<PathBuf> {
    std::env::var_os("ROOMCHAT_HOME").map(PathBuf::from)
}

/// Home directory, or the current directory when none can be determined.
fn dirs_home() -> PathBuf {
    BaseDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Configuration directory: $ROOMCHAT_HOME/ or ~/.roomchat/
pub fn config_dir() -> PathBuf {
    if let Some(home) = roomchat_home() {
        return home;
    }
    dirs_home().join(".roomchat")
}

/// State directory: $ROOMCHAT_HOME/state/ or ~/.local/share/roomchat/
pub fn state_dir() -> PathBuf {
    if let Some(home) = roomchat_home() {
        return home.join("state");
    }
    ProjectDirs::from("", "", "roomchat")
        .map(|d| d.data_local_dir().to_path_buf())
        .unwrap_or_else(|| config_dir().join("state"))
}

/// Config file path
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Persisted room/language choice
pub fn settings_file_path() -> PathBuf {
    state_dir().join("settings.toml")
}
