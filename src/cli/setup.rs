// src/cli/setup.rs — `roomchat setup` and `roomchat languages`

use inquire::Select;

use crate::setup::catalog::{LANGUAGES, ROOMS};
use crate::setup::{ChatSettings, SettingsStore};

/// Pick room and language (flags or prompts) and persist the choice.
pub fn run_setup(
    room: Option<&str>,
    language: Option<&str>,
    store: &SettingsStore,
) -> anyhow::Result<ChatSettings> {
    let room = match room {
        Some(r) => r.to_string(),
        None => Select::new("Chat room", ROOMS.to_vec()).prompt()?.to_string(),
    };
    let language = match language {
        Some(l) => l.to_string(),
        None => Select::new("Preferred language", LANGUAGES.to_vec())
            .prompt()?
            .code
            .to_string(),
    };

    let settings = ChatSettings::new(&room, &language)?;
    store.save(&settings)?;
    eprintln!(
        "Saved: room {} · language {} ({})",
        settings.room, settings.language_name, settings.language
    );
    Ok(settings)
}

pub fn run_languages() {
    println!("Rooms:");
    for room in ROOMS {
        println!("  {room}");
    }
    println!("\nLanguages:");
    for lang in LANGUAGES {
        println!("  {:<4}{}", lang.code, lang.name);
    }
}
