//! API request and response types

use crate::transcript::ChatTurn;
use serde::{Deserialize, Serialize};

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// Session identification
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub id: String,
}

/// Response for session creation
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session: SessionInfo,
}

/// Transcript snapshot for one session
#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub turns: Vec<ChatTurn>,
    pub busy: bool,
}

/// Response for chat action
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub accepted: bool,
}

/// Response for cancel action
#[derive(Debug, Serialize)]
pub struct CancelResponse {
    pub ok: bool,
}

/// Response for the clear command
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
