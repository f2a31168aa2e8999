// src/render/mentions.rs — @mention highlighting

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    /// `@name`; `name` excludes the `@`.
    Mention { name: &'a str, is_me: bool },
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split `text` into plain runs and mentions. A mention is `@` at the
/// start of a word followed by at least one name character. `me` is
/// compared case-insensitively.
pub fn highlight_mentions<'a>(text: &'a str, me: &str) -> Vec<Segment<'a>> {
    let me = me.to_lowercase();
    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut prev: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let at_word_start = match prev {
            None => true,
            Some(p) => p.is_whitespace(),
        };
        prev = Some(c);
        if c != '@' || !at_word_start {
            continue;
        }

        let name_start = i + c.len_utf8();
        let mut end = name_start;
        while let Some(&(j, n)) = chars.peek() {
            if !is_name_char(n) {
                break;
            }
            end = j + n.len_utf8();
            prev = Some(n);
            chars.next();
        }
        if end == name_start {
            continue;
        }

        if plain_start < i {
            segments.push(Segment::Plain(&text[plain_start..i]));
        }
        let name = &text[name_start..end];
        segments.push(Segment::Mention {
            name,
            is_me: !me.is_empty() && name.to_lowercase() == me,
        });
        plain_start = end;
    }

    if plain_start < text.len() {
        segments.push(Segment::Plain(&text[plain_start..]));
    }
    segments
}
