//! Google Gemini provider implementation

use super::types::{CompletionRequest, CompletionResponse};
use super::{CompletionClient, CompletionError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini `generateContent` client
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model_id: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: impl Into<String>) -> Result<Self, CompletionError> {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL)
    }

    /// Point at an alternate endpoint (used by tests).
    pub fn with_base_url(
        api_key: String,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| CompletionError::unknown(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.into(),
            model_id: model.into(),
        })
    }

    fn translate_request(&self, request: &CompletionRequest) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![GeminiPart {
                    text: request.text.clone(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: request.temperature,
                top_p: request.top_p,
                max_output_tokens: request.max_output_tokens,
            },
        }
    }

    fn normalize_response(resp: GeminiResponse) -> Result<CompletionResponse, CompletionError> {
        let candidate = resp
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| CompletionError::unknown("no candidates in response"))?;

        let text: String = candidate
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect();

        if text.is_empty() {
            return Err(CompletionError::unknown("empty completion text"));
        }

        Ok(CompletionResponse { text })
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        let gemini_request = self.translate_request(request);
        let url = format!(
            "{}/{}:generateContent?key={}",
            self.base_url, request.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&gemini_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::network(format!("request timeout: {e}"))
                } else if e.is_connect() {
                    CompletionError::network(format!("connection failed: {e}"))
                } else {
                    CompletionError::unknown(format!("request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CompletionError::network(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            if let Ok(error_resp) = serde_json::from_str::<GeminiErrorResponse>(&body) {
                let message = error_resp.error.message;
                return Err(match status.as_u16() {
                    400 => CompletionError::invalid_request(format!("invalid request: {message}")),
                    401 | 403 => CompletionError::auth(format!("authentication failed: {message}")),
                    429 => CompletionError::rate_limit(format!("rate limit exceeded: {message}")),
                    500..=599 => CompletionError::server_error(format!("server error: {message}")),
                    _ => CompletionError::unknown(format!("HTTP {status}: {message}")),
                });
            }
            return Err(CompletionError::unknown(format!(
                "HTTP {status} error: {body}"
            )));
        }

        let gemini_response: GeminiResponse = serde_json::from_str(&body).map_err(|e| {
            CompletionError::unknown(format!("failed to parse response: {e} - body: {body}"))
        })?;

        Self::normalize_response(gemini_response)
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

// Gemini API wire types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiError,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}
