//! Events that can occur during an interaction

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum TurnEvent {
    // User events
    UserMessage { text: String },
    UserCancel,

    // Completion events
    CompletionDispatched,
    CompletionSucceeded { text: String },
    CompletionFailed { message: String },

    // Reveal events
    RevealFinished,
}
