//! LLM request/response types
//!
//! Provider-agnostic shapes for the single engineer exchange. Each request
//! is independent - no conversation state is kept between calls.

use serde::{Deserialize, Serialize};

/// Everything needed for one completion call
#[derive(Debug, Clone)]
pub struct EngineerRequest {
    /// The fixed prompt-engineering instruction, already templated
    pub system_instruction: String,
    /// The user's raw request, passed through verbatim
    pub content: String,
    /// Max tokens for the response (from config)
    pub max_tokens: u32,
}

/// A completed engineer exchange
#[derive(Debug, Clone)]
pub struct EngineerResponse {
    /// The engineered prompt text returned by the model
    pub text: String,
    pub usage: TokenUsage,
}

/// Token usage reported by the provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}
