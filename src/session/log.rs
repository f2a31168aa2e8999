// src/session/log.rs — Append-only message log

use std::sync::Arc;

use chrono::Utc;

use super::types::{Author, Message, MessageBody, WELCOME_TEXT};

/// Ordered message history for one session.
///
/// Ids are assigned at append time, start at 1 and never repeat. Entries
/// are never removed or reordered; the only in-place change is filling in
/// a pending sentiment score. Entries are shared with published snapshots,
/// so a snapshot costs one pointer per message.
#[derive(Debug, Clone)]
pub struct MessageLog {
    entries: Vec<Arc<Message>>,
    next_id: u64,
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageLog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// A log holding only the system welcome message.
    pub fn with_welcome() -> Self {
        let mut log = Self::new();
        log.append(
            MessageBody::Text {
                text: WELCOME_TEXT.into(),
            },
            Author::System,
            false,
            None,
        );
        log
    }

    pub fn append(
        &mut self,
        body: MessageBody,
        author: Author,
        is_self: bool,
        sentiment_score: Option<f64>,
    ) -> &Message {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Arc::new(Message {
            id,
            body,
            author,
            is_self,
            timestamp: Utc::now(),
            sentiment_score,
        }));
        &self.entries[self.entries.len() - 1]
    }

    /// Fill in the score of the most recent pending self text equal to `text`.
    ///
    /// Returns the id of the matched entry, or `None` when nothing is
    /// waiting (late or duplicate echo). A `None` score leaves the match
    /// pending.
    pub fn reconcile_score(&mut self, text: &str, score: Option<f64>) -> Option<u64> {
        let index = self
            .entries
            .iter()
            .rposition(|m| m.is_pending_score() && m.text() == Some(text))?;

        let entry = &mut self.entries[index];
        if score.is_some() {
            // Copies only this entry if a snapshot still holds it.
            Arc::make_mut(entry).sentiment_score = score;
        }
        Some(entry.id)
    }

    pub fn entries(&self) -> &[Arc<Message>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.entries.last().map(Arc::as_ref)
    }

    pub fn get(&self, id: u64) -> Option<&Message> {
        self.entries.iter().find(|m| m.id == id).map(Arc::as_ref)
    }

    /// Number of self-authored texts still waiting for a score.
    pub fn pending_count(&self) -> usize {
        self.entries.iter().filter(|m| m.is_pending_score()).count()
    }
}
