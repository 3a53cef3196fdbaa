//! Interaction state types

use serde::{Deserialize, Serialize};

/// State of one session's current interaction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnState {
    /// Ready for user input, no pending operations
    #[default]
    Idle,

    /// User turn appended, completion request about to be dispatched.
    /// Intermediate state; the processor advances it immediately.
    UserTurnRecorded,

    /// Completion request in flight
    AwaitingCompletion,

    /// Full response received, word-by-word reveal in progress
    Revealing { full_text: String },

    /// User requested cancellation; the in-flight response will be
    /// discarded when it resolves
    Cancelling,

    /// Interaction ended without a reply. Idle-equivalent: the next
    /// accepted input starts a fresh interaction.
    Failed { message: String },
}

impl TurnState {
    /// Whether the session can accept a new user message.
    pub fn accepts_input(&self) -> bool {
        matches!(self, TurnState::Idle | TurnState::Failed { .. })
    }

    /// Whether an interaction is currently occupying the session.
    pub fn is_busy(&self) -> bool {
        !self.accepts_input()
    }
}
