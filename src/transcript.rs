//! Session Store: the in-memory ordered log of chat turns
//!
//! One `Transcript` per interactive session. Turns are immutable once
//! appended; insertion order is chronological order is display order.

use serde::{Deserialize, Serialize};

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One exchange unit in the transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered log of chat turns for one session
#[derive(Debug, Default)]
pub struct Transcript {
    turns: Vec<ChatTurn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the end. Never reorders, never deduplicates.
    pub fn append(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    /// All turns in insertion order.
    pub fn all(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Reset to empty. Idempotent.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
