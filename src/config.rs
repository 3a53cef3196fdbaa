//! Environment configuration
//!
//! The API key is the one required credential; its absence is fatal at
//! startup, before any UI is served.

use std::time::Duration;
use thiserror::Error;

/// Fixed model variant used for all completions.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Fixed generation parameters, passed on every request.
pub const TEMPERATURE: f32 = 0.7;
pub const TOP_P: f32 = 0.95;
pub const MAX_OUTPUT_TOKENS: u32 = 2048;

/// Delay between word reveals in the cosmetic streaming effect.
pub const REVEAL_DELAY: Duration = Duration::from_millis(40);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required credential: set the {0} environment variable")]
    MissingCredential(&'static str),
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Runtime configuration, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingCredential("GEMINI_API_KEY"))?;

        let model =
            std::env::var("TUTORDESK_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let port = match std::env::var("TUTORDESK_PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                name: "TUTORDESK_PORT",
                value: raw,
            })?,
            Err(_) => 8000,
        };

        Ok(Self {
            api_key,
            model,
            port,
        })
    }
}
