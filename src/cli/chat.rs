// src/cli/chat.rs — Interactive chat dashboard (REPL)

use std::path::Path;
use std::sync::Arc;

use crossterm::style::Stylize;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::channel::{LexiconScorer, LocalHub};
use crate::infra::config::Config;
use crate::render::{self, Theme};
use crate::session::{ChatSession, RemoteOutcome, UserIdentity};
use crate::setup::SettingsStore;
use crate::upload::{FileRef, HttpUploader};

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Text(&'a str),
    File(&'a str),
    Theme,
    Logout,
    Quit,
    Help,
    Unknown(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    if !trimmed.starts_with('/') {
        return Input::Text(line);
    }
    let (command, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((c, a)) => (c, a.trim()),
        None => (trimmed, ""),
    };
    match command {
        "/quit" | "/exit" => Input::Quit,
        "/logout" => Input::Logout,
        "/theme" => Input::Theme,
        "/help" => Input::Help,
        "/file" if !arg.is_empty() => Input::File(arg),
        other => Input::Unknown(other),
    }
}

const HELP: &str = "/file <path>  send an attachment\n\
                    /theme        toggle light/dark\n\
                    /logout       forget room/language and leave\n\
                    /quit         leave the room";

/// Join the saved room on the offline hub and run the REPL until the
/// user quits or stdin closes.
pub async fn run_chat(
    config: &Config,
    user: UserIdentity,
    store: &SettingsStore,
) -> anyhow::Result<()> {
    let settings = store
        .load()?
        .ok_or_else(|| anyhow::anyhow!("No room selected. Run `roomchat setup` first."))?;

    let hub = LocalHub::new().with_scorer(LexiconScorer::default());
    let uploader = HttpUploader::from_config(&config.server)?;
    let mut session = ChatSession::new(Arc::new(hub.connect()), Arc::new(uploader));
    let handle = session.activate(settings.session_config(user.clone()))?;

    let me = user.first_name.as_str();
    let mut theme: Theme = config.ui.theme;

    println!("{}", render::render_header(handle.room(), &settings.language_name, theme));
    for message in handle.messages().iter() {
        println!("{}", render::render_line(message, me, theme));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_input(&line) {
                    Input::Quit => break,
                    Input::Logout => {
                        store.clear()?;
                        break;
                    }
                    Input::Theme => {
                        theme = theme.toggle();
                        eprintln!("theme: {}", theme.name());
                    }
                    Input::Help => eprintln!("{HELP}"),
                    Input::Unknown(cmd) => eprintln!("unknown command {cmd}, try /help"),
                    Input::File(path) => {
                        let sent = match FileRef::from_path(Path::new(path)) {
                            Ok(file) => session.send_file(file).await,
                            Err(e) => Err(e),
                        };
                        match sent {
                            Ok(message) => println!("{}", render::render_line(&message, me, theme)),
                            Err(e) => eprintln!("{}", e.to_string().with(theme.palette().error)),
                        }
                    }
                    Input::Text(text) => {
                        if let Some(message) = session.send_text(text)? {
                            println!("{}", render::render_line(&message, me, theme));
                        }
                    }
                }
            }
            outcome = session.next_event() => {
                let (id, prefix) = match outcome {
                    Some(RemoteOutcome::Appended(id)) => (id, ""),
                    Some(RemoteOutcome::Reconciled(id)) => (id, "  ↳ "),
                    Some(RemoteOutcome::Dropped) => continue,
                    None => break,
                };
                if let Some(message) = session.log().get(id) {
                    println!("{prefix}{}", render::render_line(message, me, theme));
                }
            }
        }
    }

    session.deactivate();
    Ok(())
}
