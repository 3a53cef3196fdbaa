//! Completion-service abstraction
//!
//! Provides a common interface for the hosted completion collaborator,
//! consumed only through the `CompletionClient` trait.

mod error;
mod gemini;
mod types;

pub use error::{CompletionError, CompletionErrorKind};
pub use gemini::GeminiClient;
pub use types::{CompletionRequest, CompletionResponse};

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for completion providers
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Make a completion request
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError>;

    /// Get the model identifier
    fn model_id(&self) -> &str;
}

#[async_trait]
impl<T: CompletionClient + ?Sized> CompletionClient for Arc<T> {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        (**self).complete(request).await
    }

    fn model_id(&self) -> &str {
        (**self).model_id()
    }
}

/// Logging wrapper for completion clients
pub struct LoggingClient {
    inner: Arc<dyn CompletionClient>,
    model_id: String,
}

impl LoggingClient {
    pub fn new(inner: Arc<dyn CompletionClient>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl CompletionClient for LoggingClient {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    chars = response.text.len(),
                    "completion request succeeded"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    retryable = e.kind.is_retryable(),
                    "completion request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
