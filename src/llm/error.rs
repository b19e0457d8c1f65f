//! LLM error types

use std::time::Duration;

use thiserror::Error;

use crate::session::UNKNOWN_ERROR;

/// Errors that can occur during a completion call
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("rate limited (retry after {retry_after:?}): {message}")]
    RateLimited {
        retry_after: Duration,
        /// Raw response body; providers usually wrap the real message in it
        message: String,
    },

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LlmError {
    /// Check if this is a rate limit error
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, LlmError::RateLimited { .. })
    }

    /// Human-readable text for the error region of the UI
    ///
    /// Uses the provider's structured message when one exists, falling back
    /// to a generic string for failures with nothing usable in them.
    pub fn user_message(&self) -> String {
        match self {
            LlmError::RateLimited { message, .. } => {
                let trimmed = extract_api_message(message).unwrap_or_else(|| message.trim().to_string());
                if trimmed.is_empty() {
                    "rate limit exceeded".to_string()
                } else {
                    trimmed
                }
            }
            LlmError::ApiError { status, message } => {
                let trimmed = extract_api_message(message).unwrap_or_else(|| message.trim().to_string());
                if trimmed.is_empty() {
                    format!("API error {}: {}", status, UNKNOWN_ERROR)
                } else {
                    trimmed
                }
            }
            other => {
                let text = other.to_string();
                if text.trim().is_empty() {
                    UNKNOWN_ERROR.to_string()
                } else {
                    text
                }
            }
        }
    }
}

/// Pull the message field out of a structured provider error body
///
/// Both Gemini and OpenAI wrap failures as `{"error": {"message": ...}}`.
fn extract_api_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value["error"]["message"]
        .as_str()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
