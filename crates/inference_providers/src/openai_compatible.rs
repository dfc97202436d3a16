//! OpenAI-compatible provider implementation
//!
//! Talks to any endpoint that implements OpenAI's `/chat/completions` format
//! (Groq, OpenAI, Together, Fireworks, ...). The model is fixed per provider
//! instance and every request carries a bearer token.

use crate::{
    sse_parser::new_sse_parser, ChatCompletionParams, ChatCompletionResponse, ChatMessage,
    CompletionError, InferenceProvider, StreamingResult,
};
use async_trait::async_trait;
use reqwest::{header::HeaderValue, Client};
use std::time::Duration;

/// Configuration for an OpenAI-compatible endpoint
#[derive(Clone)]
pub struct OpenAiCompatibleConfig {
    /// Base URL, without the `/chat/completions` suffix
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
}

impl std::fmt::Debug for OpenAiCompatibleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatibleConfig")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("connect_timeout_seconds", &self.connect_timeout_seconds)
            .finish_non_exhaustive()
    }
}

pub struct OpenAiCompatibleProvider {
    config: OpenAiCompatibleConfig,
    client: Client,
}

impl OpenAiCompatibleProvider {
    /// Create a new provider with the given configuration
    pub fn new(config: OpenAiCompatibleConfig) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .timeout(Duration::from_secs(config.timeout_seconds))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| {
                CompletionError::RequestFailed(format!("Failed to create HTTP client: {e}"))
            })?;

        tracing::info!(
            base_url = %config.base_url,
            model = %config.model,
            timeout_seconds = config.timeout_seconds,
            "Completion provider initialized"
        );

        Ok(Self { config, client })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn chat_completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn build_headers(&self) -> Result<reqwest::header::HeaderMap, String> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        let auth_value = format!("Bearer {}", self.config.api_key);
        let header_value = HeaderValue::from_str(&auth_value)
            .map_err(|e| format!("Invalid API key format: {e}"))?;
        headers.insert("Authorization", header_value);

        Ok(headers)
    }

    /// Send the request and turn any non-success status into `HttpError`
    async fn send(&self, params: &ChatCompletionParams) -> Result<reqwest::Response, CompletionError> {
        let headers = self
            .build_headers()
            .map_err(CompletionError::RequestFailed)?;

        tracing::debug!(
            model = %params.model,
            messages = params.messages.len(),
            stream = params.stream.unwrap_or(false),
            "Sending chat completion request"
        );

        let response = self
            .client
            .post(self.chat_completions_url())
            .headers(headers)
            .json(params)
            .send()
            .await
            .map_err(|e| CompletionError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status_code = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("Failed to read error response body: {e}"));
            return Err(CompletionError::HttpError { status_code, body });
        }

        Ok(response)
    }

    fn params(&self, messages: Vec<ChatMessage>, temperature: f32, stream: bool) -> ChatCompletionParams {
        ChatCompletionParams {
            model: self.config.model.clone(),
            messages,
            temperature,
            stream: stream.then_some(true),
        }
    }
}

/// Decode a non-streaming body and pull out `choices[0].message.content`
pub fn extract_completion_text(raw_bytes: &[u8]) -> Result<String, CompletionError> {
    let body = String::from_utf8(raw_bytes.to_vec()).map_err(|e| {
        CompletionError::InvalidResponse {
            reason: format!("response body is not valid UTF-8: {e}"),
            body: String::from_utf8_lossy(raw_bytes).into_owned(),
        }
    })?;

    let response: ChatCompletionResponse = match serde_json::from_str(&body) {
        Ok(response) => response,
        Err(e) => {
            return Err(CompletionError::InvalidResponse {
                reason: format!("response body is not valid JSON: {e}"),
                body,
            })
        }
    };

    match response.first_content() {
        Some(content) => Ok(content.trim().to_string()),
        None => Err(CompletionError::InvalidResponse {
            reason: "missing choices[0].message.content".to_string(),
            body,
        }),
    }
}

#[async_trait]
impl InferenceProvider for OpenAiCompatibleProvider {
    async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        temperature: f32,
    ) -> Result<String, CompletionError> {
        let params = self.params(messages, temperature, false);
        let response = self.send(&params).await?;

        let raw_bytes = response
            .bytes()
            .await
            .map_err(|e| CompletionError::RequestFailed(e.to_string()))?;

        extract_completion_text(&raw_bytes)
    }

    async fn chat_completion_stream(
        &self,
        messages: Vec<ChatMessage>,
        temperature: f32,
    ) -> Result<StreamingResult, CompletionError> {
        let params = self.params(messages, temperature, true);
        let response = self.send(&params).await?;

        let sse_stream = new_sse_parser(response.bytes_stream());
        Ok(Box::pin(sse_stream))
    }
}
