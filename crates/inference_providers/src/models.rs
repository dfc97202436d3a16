use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// Request body for the chat completions endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionParams {
    /// Model ID to use for the completion
    pub model: String,

    /// List of messages comprising the conversation so far
    pub messages: Vec<ChatMessage>,

    /// Sampling temperature between 0 and 2
    pub temperature: f32,

    /// Whether to stream back partial progress
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
}

/// Non-streaming response body.
///
/// Every level is optional: the caller decides what a missing path means.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatCompletionResponseChoice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletionResponseChoice {
    #[serde(default)]
    pub message: Option<ChatResponseMessage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// `choices[0].message.content`, if present
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.as_ref())
            .and_then(|message| message.content.as_deref())
    }
}

/// One streamed event payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletionChunk {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub delta: Option<ChatDelta>,
}

/// Delta message in streaming chat completions
/// All fields are optional as they may not be present in every chunk
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatDelta {
    #[serde(default)]
    pub role: Option<MessageRole>,
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionChunk {
    /// `choices[0].delta.content`, if present and non-empty
    pub fn delta_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.delta.as_ref())
            .and_then(|delta| delta.content.as_deref())
            .filter(|content| !content.is_empty())
    }
}

#[derive(Debug, Error)]
pub enum CompletionError {
    /// The endpoint answered with a non-success status
    #[error("Completion endpoint returned HTTP {status_code}: {body}")]
    HttpError { status_code: u16, body: String },

    /// The endpoint answered, but not with the expected shape
    #[error("Invalid response from completion endpoint: {reason}")]
    InvalidResponse { reason: String, body: String },

    /// The request never completed (connect, timeout, broken body)
    #[error("Failed to perform completion: {0}")]
    RequestFailed(String),
}

impl CompletionError {
    /// Retained response body, when the endpoint produced one
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::HttpError { body, .. } | Self::InvalidResponse { body, .. } => Some(body),
            Self::RequestFailed(_) => None,
        }
    }
}
