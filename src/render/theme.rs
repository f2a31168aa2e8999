// src/render/theme.rs — Light and dark terminal palettes

use crossterm::style::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// Colors used when printing the chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Header bar, room/language line.
    pub accent: Color,
    /// Other participants' text.
    pub text: Color,
    /// Timestamps, sender labels.
    pub dim: Color,
    /// Our own messages.
    pub own: Color,
    pub system: Color,
    pub mention: Color,
    /// Mentions of the local user.
    pub mention_me: Color,
    pub error: Color,
}

impl Theme {
    // ── Brand colors ─────────────────────────────────────────────
    pub const BLUE: Color = Color::Rgb { r: 59, g: 130, b: 246 };
    pub const SKY: Color = Color::Rgb { r: 147, g: 197, b: 253 };
    pub const NAVY: Color = Color::Rgb { r: 30, g: 64, b: 175 };
    pub const SNOW: Color = Color::Rgb { r: 240, g: 240, b: 240 };
    pub const INK: Color = Color::Rgb { r: 24, g: 30, b: 41 };
    pub const SLATE: Color = Color::Rgb { r: 120, g: 120, b: 140 };
    pub const AMBER: Color = Color::Rgb { r: 230, g: 200, b: 60 };
    pub const ORANGE: Color = Color::Rgb { r: 255, g: 140, b: 50 };
    pub const RED: Color = Color::Rgb { r: 230, g: 80, b: 80 };

    pub fn toggle(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                accent: Theme::SKY,
                text: Theme::SNOW,
                dim: Theme::SLATE,
                own: Theme::BLUE,
                system: Theme::AMBER,
                mention: Theme::SKY,
                mention_me: Theme::ORANGE,
                error: Theme::RED,
            },
            Theme::Light => Palette {
                accent: Theme::NAVY,
                text: Theme::INK,
                dim: Theme::SLATE,
                own: Theme::BLUE,
                system: Theme::NAVY,
                mention: Theme::NAVY,
                mention_me: Theme::ORANGE,
                error: Theme::RED,
            },
        }
    }
}
