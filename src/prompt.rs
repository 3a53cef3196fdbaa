//! Tutor prompt framing
//!
//! Each completion request is built from the current user message alone:
//! prior transcript turns are never included, so the model cannot see
//! earlier turns. Requests are stateless across the conversation.

/// Fixed framing identifying the assistant's role.
const TUTOR_FRAMING: &str = "System: You are a helpful, expert tutor. User says: ";

/// Build the request text for one user message.
pub fn build_request_text(user_text: &str) -> String {
    format!("{TUTOR_FRAMING}{user_text}")
}
