//! LlmClient trait definition

use async_trait::async_trait;

use super::{EngineerRequest, EngineerResponse, LlmError};

/// Stateless completion client - each call is independent
///
/// The core abstraction for the engineer exchange. Implementations make
/// exactly one outbound HTTP call per `complete` invocation; there are no
/// retries and no timeout beyond the configured HTTP client timeout.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single completion request and wait for the full response
    async fn complete(&self, request: EngineerRequest) -> Result<EngineerResponse, LlmError>;
}
