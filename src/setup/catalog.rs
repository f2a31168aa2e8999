// src/setup/catalog.rs — Rooms and languages offered at setup

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

const fn lang(code: &'static str, name: &'static str) -> Language {
    Language { code, name }
}

pub const LANGUAGES: &[Language] = &[
    lang("en", "English"),
    lang("ar", "Arabic"),
    lang("hi", "Hindi"),
    lang("fr", "French"),
    lang("zh", "Chinese"),
    lang("de", "German"),
    lang("es", "Spanish"),
    lang("ja", "Japanese"),
    lang("ko", "Korean"),
    lang("ru", "Russian"),
    lang("th", "Thai"),
    lang("tr", "Turkish"),
];

pub const ROOMS: &[&str] = &["Tech"];

pub fn default_language() -> &'static Language {
    &LANGUAGES[0]
}

pub fn default_room() -> &'static str {
    ROOMS[0]
}

/// Look up a language by code (case-insensitive).
pub fn find_language(code: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|l| l.code.eq_ignore_ascii_case(code))
}

pub fn find_room(name: &str) -> Option<&'static str> {
    ROOMS.iter().copied().find(|r| r.eq_ignore_ascii_case(name))
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}
