//! Mock implementations for testing
//!
//! These mocks enable lifecycle testing without real network I/O.

use crate::llm::{CompletionClient, CompletionError, CompletionRequest, CompletionResponse};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Mock completion client that returns queued responses
pub struct MockCompletionClient {
    responses: Mutex<VecDeque<Result<CompletionResponse, CompletionError>>>,
    model_id: String,
    /// Record of all requests made
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl MockCompletionClient {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            model_id: model_id.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response
    pub fn queue_response(&self, text: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(CompletionResponse { text: text.into() }));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: CompletionError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CompletionError::network("no mock response queued")))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Mock completion client that never resolves until cancelled
/// (for cancellation testing)
pub struct HangingCompletionClient {
    model_id: String,
}

impl HangingCompletionClient {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
        }
    }
}

#[async_trait]
impl CompletionClient for HangingCompletionClient {
    async fn complete(
        &self,
        _request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        std::future::pending().await
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
