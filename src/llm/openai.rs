//! OpenAI API client implementation
//!
//! Implements the LlmClient trait for the Chat Completions API. Same
//! single-call contract as the Gemini client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{EngineerRequest, EngineerResponse, LlmClient, LlmError, TokenUsage};
use crate::config::LlmConfig;

/// OpenAI API client
pub struct OpenAiClient {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
    max_tokens: u32,
}

impl OpenAiClient {
    /// Create a new client from configuration
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        debug!(model = %config.model, "OpenAiClient::from_config: called");
        let api_key = config
            .get_api_key()
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(LlmError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            base_url: config.base_url.clone(),
            http,
            max_tokens: config.max_tokens,
        })
    }

    /// Build the request body for the Chat Completions API
    fn build_request_body(&self, request: &EngineerRequest) -> serde_json::Value {
        debug!(%self.model, %request.max_tokens, "build_request_body: called");
        let max_tokens = request.max_tokens.min(self.max_tokens);

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system_instruction },
                { "role": "user", "content": request.content },
            ],
        });

        // GPT-5.x and o1/o3 models use max_completion_tokens instead of max_tokens
        let uses_completion_tokens =
            self.model.starts_with("gpt-5") || self.model.starts_with("o1") || self.model.starts_with("o3");

        if uses_completion_tokens {
            body["max_completion_tokens"] = serde_json::json!(max_tokens);
        } else {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        body
    }

    /// Parse the Chat Completions response into an EngineerResponse
    fn parse_response(&self, api_response: OpenAiResponse) -> Result<EngineerResponse, LlmError> {
        debug!(choice_count = api_response.choices.len(), "parse_response: called");
        let text = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if text.is_empty() {
            debug!("parse_response: no text in response");
            return Err(LlmError::InvalidResponse("response contained no text".to_string()));
        }

        let usage = api_response
            .usage
            .map(|u| TokenUsage {
                input_tokens: u.prompt_tokens.unwrap_or(0),
                output_tokens: u.completion_tokens.unwrap_or(0),
            })
            .unwrap_or_default();

        Ok(EngineerResponse { text, usage })
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, request: EngineerRequest) -> Result<EngineerResponse, LlmError> {
        debug!(%self.model, "complete: called");
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = self.build_request_body(&request);

        let response = self
            .http
            .post(url)
            .header("authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(LlmError::Network)?;

        let status = response.status().as_u16();

        if status == 429 {
            debug!("complete: rate limited (429)");
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            let message = response.text().await.unwrap_or_default();

            return Err(LlmError::RateLimited {
                retry_after: Duration::from_secs(retry_after),
                message,
            });
        }

        if !response.status().is_success() {
            debug!(%status, "complete: API error");
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError { status, message: text });
        }

        debug!("complete: success");
        let api_response: OpenAiResponse = response.json().await?;
        self.parse_response(api_response)
    }
}

// OpenAI API response types

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: Option<u64>,
    completion_tokens: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(model: &str) -> OpenAiClient {
        OpenAiClient {
            model: model.to_string(),
            api_key: "test-key".to_string(),
            base_url: "https://api.openai.com".to_string(),
            http: Client::new(),
            max_tokens: 8192,
        }
    }

    #[test]
    fn test_build_request_body_uses_max_tokens() {
        let client = test_client("gpt-4o-mini");
        let request = EngineerRequest {
            system_instruction: "instruction".to_string(),
            content: "hello".to_string(),
            max_tokens: 1000,
        };

        let body = client.build_request_body(&request);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "hello");
        assert_eq!(body["max_tokens"], 1000);
        assert!(body.get("max_completion_tokens").is_none());
    }

    #[test]
    fn test_build_request_body_newer_models_use_completion_tokens() {
        let client = test_client("gpt-5-mini");
        let request = EngineerRequest {
            system_instruction: "instruction".to_string(),
            content: "hello".to_string(),
            max_tokens: 1000,
        };

        let body = client.build_request_body(&request);
        assert_eq!(body["max_completion_tokens"], 1000);
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn test_parse_response() {
        let client = test_client("gpt-4o-mini");
        let api_response: OpenAiResponse = serde_json::from_value(serde_json::json!({
            "choices": [{ "message": { "content": "engineered prompt" } }],
            "usage": { "prompt_tokens": 10, "completion_tokens": 20 }
        }))
        .unwrap();

        let response = client.parse_response(api_response).unwrap();
        assert_eq!(response.text, "engineered prompt");
        assert_eq!(response.usage.output_tokens, 20);
    }

    #[test]
    fn test_parse_response_without_choices_is_error() {
        let client = test_client("gpt-4o-mini");
        let api_response: OpenAiResponse = serde_json::from_value(serde_json::json!({ "choices": [] })).unwrap();
        assert!(client.parse_response(api_response).is_err());
    }
}
