//! Google Gemini API client implementation
//!
//! Implements the LlmClient trait for the generateContent endpoint.
//! One outbound call per request - failures surface immediately, the user
//! re-triggers manually if they want another attempt.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{EngineerRequest, EngineerResponse, LlmClient, LlmError, TokenUsage};
use crate::config::LlmConfig;

/// Google Gemini API client
pub struct GeminiClient {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
    max_tokens: u32,
}

impl GeminiClient {
    /// Create a new client from configuration
    ///
    /// Reads the API key from the environment variable named in config.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        debug!(model = %config.model, "GeminiClient::from_config: called");
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

    /// Build the request body for the generateContent API
    fn build_request_body(&self, request: &EngineerRequest) -> serde_json::Value {
        debug!(%self.model, %request.max_tokens, "build_request_body: called");
        serde_json::json!({
            "system_instruction": {
                "parts": [{ "text": request.system_instruction }]
            },
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.content }]
            }],
            "generationConfig": {
                "maxOutputTokens": request.max_tokens.min(self.max_tokens),
            }
        })
    }

    /// Parse the generateContent response into an EngineerResponse
    fn parse_response(&self, api_response: GeminiResponse) -> Result<EngineerResponse, LlmError> {
        debug!(
            candidate_count = api_response.candidates.len(),
            "parse_response: called"
        );
        let text: String = api_response
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            debug!("parse_response: no text in response");
            return Err(LlmError::InvalidResponse("response contained no text".to_string()));
        }

        let usage = api_response
            .usage_metadata
            .map(|u| TokenUsage {
                input_tokens: u.prompt_token_count.unwrap_or(0),
                output_tokens: u.candidates_token_count.unwrap_or(0),
            })
            .unwrap_or_default();

        Ok(EngineerResponse { text, usage })
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn complete(&self, request: EngineerRequest) -> Result<EngineerResponse, LlmError> {
        debug!(%self.model, "complete: called");
        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model);
        let body = self.build_request_body(&request);

        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", self.api_key.clone())
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
        let api_response: GeminiResponse = response.json().await?;
        self.parse_response(api_response)
    }
}

// Gemini API response types

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<GeminiUsage>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiUsage {
    #[serde(rename = "promptTokenCount")]
    prompt_token_count: Option<u64>,
    #[serde(rename = "candidatesTokenCount")]
    candidates_token_count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> GeminiClient {
        GeminiClient {
            model: "gemini-2.5-flash".to_string(),
            api_key: "test-key".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            http: Client::new(),
            max_tokens: 8192,
        }
    }

    #[test]
    fn test_build_request_body() {
        let client = test_client();
        let request = EngineerRequest {
            system_instruction: "You are an expert prompt engineer".to_string(),
            content: "a story about a robot who discovers music".to_string(),
            max_tokens: 1000,
        };

        let body = client.build_request_body(&request);

        assert_eq!(
            body["system_instruction"]["parts"][0]["text"],
            "You are an expert prompt engineer"
        );
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            "a story about a robot who discovers music"
        );
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 1000);
    }

    #[test]
    fn test_max_tokens_capped_to_client_limit() {
        let client = GeminiClient {
            max_tokens: 1000,
            ..test_client()
        };
        let request = EngineerRequest {
            system_instruction: "test".to_string(),
            content: "hello".to_string(),
            max_tokens: 5000,
        };

        let body = client.build_request_body(&request);
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 1000);
    }

    #[test]
    fn test_parse_response_joins_parts() {
        let client = test_client();
        let api_response: GeminiResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "You are a master " },
                        { "text": "storyteller..." }
                    ]
                }
            }],
            "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 34 }
        }))
        .unwrap();

        let response = client.parse_response(api_response).unwrap();
        assert_eq!(response.text, "You are a master storyteller...");
        assert_eq!(response.usage.input_tokens, 12);
        assert_eq!(response.usage.output_tokens, 34);
    }

    #[test]
    fn test_parse_response_without_text_is_error() {
        let client = test_client();
        let api_response: GeminiResponse = serde_json::from_value(serde_json::json!({
            "candidates": []
        }))
        .unwrap();

        assert!(client.parse_response(api_response).is_err());
    }
}
