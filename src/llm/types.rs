//! Common types for completion interactions

/// One completion request, derived from exactly one user message.
///
/// Deliberately carries no conversation history; see the `prompt` module.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub text: String,
    pub temperature: f32,
    pub top_p: f32,
    pub max_output_tokens: u32,
    pub model: String,
}

impl CompletionRequest {
    /// Build a request with the fixed generation parameters.
    pub fn new(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            temperature: crate::config::TEMPERATURE,
            top_p: crate::config::TOP_P,
            max_output_tokens: crate::config::MAX_OUTPUT_TOKENS,
            model: model.into(),
        }
    }
}

/// The full response text, delivered as one atomic string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_request_uses_fixed_generation_parameters() {
        let req = CompletionRequest::new("hello", "gemini-2.0-flash");
        assert!((req.temperature - 0.7).abs() < f32::EPSILON);
        assert!((req.top_p - 0.95).abs() < f32::EPSILON);
        assert_eq!(req.max_output_tokens, 2048);
    }
}
