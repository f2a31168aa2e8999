// src/cli/mod.rs — CLI definition (clap derive)

pub mod chat;
pub mod setup;

use clap::{Parser, Subcommand};

use crate::infra::config::UserConfig;
use crate::session::UserIdentity;

#[derive(Parser)]
#[command(name = "roomchat", about = "Group chat client", version)]
pub struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a chat room and preferred language
    Setup {
        /// Room name (interactive picker if omitted)
        #[arg(long)]
        room: Option<String>,
        /// Language code, e.g. en, fr, ja (interactive picker if omitted)
        #[arg(short, long)]
        language: Option<String>,
    },
    /// Join the configured room (default command)
    Chat {
        #[command(flatten)]
        user: UserArgs,
    },
    /// List rooms and supported languages
    Languages,
}

/// Overrides for the `[user]` config section.
#[derive(clap::Args, Clone, Default)]
pub struct UserArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
}

impl UserArgs {
    /// Merge flags over the `[user]` config section. A first name is
    /// required from one of the two.
    pub fn resolve(self, config: Option<UserConfig>) -> Option<UserIdentity> {
        let config = config.unwrap_or_default();
        let first_name = self
            .first_name
            .or(Some(config.first_name))
            .filter(|n| !n.trim().is_empty())?;
        Some(UserIdentity::new(
            first_name,
            self.last_name.unwrap_or(config.last_name),
            self.email.unwrap_or(config.email),
        ))
    }
}
