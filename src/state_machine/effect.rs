//! Effects produced by state transitions

/// Effects to be executed by the processor after a transition.
///
/// The transition function itself performs no I/O; appends, network calls,
/// and client notifications all happen here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append the user's turn to the Session Store. Ordered before
    /// `RequestCompletion` so the question is never lost on failure.
    AppendUserTurn { text: String },

    /// Append the assistant's committed full text to the Session Store
    AppendAssistantTurn { text: String },

    /// Dispatch the completion request for one user message
    RequestCompletion { user_text: String },

    /// Drive the word-by-word reveal of the full response text
    BeginReveal { full_text: String },

    /// Surface a transient error notice to the client (never stored)
    NotifyError { message: String },

    /// Tell the client the in-flight interaction was cancelled
    NotifyCancelled,

    /// Tell the client the interaction completed and was recorded
    NotifyDone,
}
