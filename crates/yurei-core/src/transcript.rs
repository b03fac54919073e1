//! The ordered list of turns the completion API sees.

use crate::message::{MessageEntry, Role};
use serde::{Deserialize, Serialize};

/// Role-tagged conversation turns in arrival order.
///
/// Growth is unbounded; every entry is sent with each completion request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    entries: Vec<MessageEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Add one entry at the end.
    pub fn append(&mut self, entry: MessageEntry) {
        self.entries.push(entry);
    }

    /// Copy of the full ordered sequence.
    pub fn snapshot(&self) -> Vec<MessageEntry> {
        self.entries.clone()
    }

    pub fn entries(&self) -> &[MessageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the transcript opens with a system prelude.
    pub fn starts_with_system(&self) -> bool {
        self.entries
            .first()
            .is_some_and(|e| e.role == Role::System)
    }
}

impl From<Vec<MessageEntry>> for Transcript {
    fn from(entries: Vec<MessageEntry>) -> Self {
        Self { entries }
    }
}
