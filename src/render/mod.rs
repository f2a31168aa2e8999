// src/render/mod.rs — Terminal presentation of chat messages

pub mod mentions;
pub mod sentiment;
pub mod theme;

use chrono::{DateTime, Local, TimeZone, Utc};
use crossterm::style::{Attribute, Stylize};

use crate::session::{sender_identity, Author, Message, MessageBody};
use crate::upload::is_inline;

pub use mentions::{highlight_mentions, Segment};
pub use sentiment::sentiment_emoji;
pub use theme::{Palette, Theme};

/// `HH:MM` in the local timezone.
pub fn format_time(timestamp: &DateTime<Utc>) -> String {
    format_time_in(timestamp, &Local)
}

pub fn format_time_in<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.with_timezone(tz).format("%H:%M").to_string()
}

pub fn sender_label(message: &Message) -> String {
    match &message.author {
        Author::System => "System".into(),
        Author::Me => "You".into(),
        Author::Participant {
            first_name,
            last_name,
        } => {
            let name = sender_identity(first_name, last_name);
            if name.is_empty() {
                "Anonymous".into()
            } else {
                name
            }
        }
    }
}

fn file_summary(file_name: &str, file_type: &str, file_data: &str) -> String {
    if is_inline(file_data) {
        format!("📎 {file_name} ({file_type}, inline)")
    } else {
        format!("📎 {file_name} ({file_type}) {file_data}")
    }
}

/// One message as a styled terminal line (without trailing newline).
pub fn render_line(message: &Message, me: &str, theme: Theme) -> String {
    let palette = theme.palette();
    let body_color = match message.author {
        Author::System => palette.system,
        Author::Me => palette.own,
        Author::Participant { .. } => palette.text,
    };

    let mut line = format!(
        "{} {} ",
        format!("[{}]", format_time(&message.timestamp)).with(palette.dim),
        format!("{}:", sender_label(message))
            .with(palette.dim)
            .attribute(Attribute::Bold),
    );

    match &message.body {
        MessageBody::Text { text } => {
            for segment in highlight_mentions(text, me) {
                let styled = match segment {
                    Segment::Plain(s) => s.with(body_color).to_string(),
                    Segment::Mention { name, is_me: true } => format!("@{name}")
                        .with(palette.mention_me)
                        .attribute(Attribute::Bold)
                        .to_string(),
                    Segment::Mention { name, is_me: false } => {
                        format!("@{name}").with(palette.mention).to_string()
                    }
                };
                line.push_str(&styled);
            }
        }
        MessageBody::File(file) => {
            let summary = file_summary(&file.file_name, &file.file_type, &file.file_data);
            line.push_str(&summary.with(body_color).to_string());
        }
    }

    if let Some(emoji) = sentiment_emoji(message.sentiment_score) {
        line.push(' ');
        line.push_str(emoji);
    }
    line
}

/// Room/language banner shown above the log.
pub fn render_header(room: &str, language_name: &str, theme: Theme) -> String {
    let palette = theme.palette();
    format!(
        "{}  Room: {}  Language: {}",
        "Group Chat".with(palette.accent).attribute(Attribute::Bold),
        room.with(palette.accent),
        language_name.with(palette.accent),
    )
}
