// src/main.rs — roomchat entry point

use clap::Parser;

use roomchat::cli::{Cli, Commands, UserArgs};
use roomchat::infra::config::Config;
use roomchat::infra::logger;
use roomchat::setup::SettingsStore;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    // RUST_LOG takes precedence over --log-level
    logger::init_logging(&cli.log_level);

    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = if let Some(ref path) = cli.config {
        Config::load_from(std::path::Path::new(path))?
    } else {
        Config::load()?
    };
    let store = SettingsStore::default();

    match cli.command {
        Some(Commands::Setup { room, language }) => {
            roomchat::cli::setup::run_setup(room.as_deref(), language.as_deref(), &store)?;
            Ok(())
        }
        Some(Commands::Languages) => {
            roomchat::cli::setup::run_languages();
            Ok(())
        }
        Some(Commands::Chat { user }) => chat(&config, user, &store).await,
        None => chat(&config, UserArgs::default(), &store).await,
    }
}

async fn chat(config: &Config, args: UserArgs, store: &SettingsStore) -> anyhow::Result<()> {
    let user = args.resolve(config.user.clone()).ok_or_else(|| {
        anyhow::anyhow!("No user name. Pass --first-name or add a [user] section to config.toml.")
    })?;
    roomchat::cli::chat::run_chat(config, user, store).await
}
