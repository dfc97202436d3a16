//! Inference providers crate for talking to a hosted chat-completion endpoint
//!
//! This crate exposes the `InferenceProvider` trait with a synchronous and a
//! streaming completion call, an OpenAI-compatible HTTP implementation, and
//! an in-memory `MockProvider` for tests.
//!
//! # Streaming
//!
//! `chat_completion_stream` resolves once the endpoint has accepted the
//! request, then yields text deltas as they arrive. The stream is finite and
//! single pass. Dropping it stops reading the body; nothing is sent back to
//! the endpoint.
//!
//! # Usage
//!
//! ```rust,ignore
//! use inference_providers::{ChatMessage, InferenceProvider};
//! use futures_util::StreamExt;
//!
//! async fn example<P: InferenceProvider>(provider: P) -> Result<(), CompletionError> {
//!     let messages = vec![ChatMessage::user("Two day trip ideas near Lisbon?")];
//!
//!     let mut stream = provider.chat_completion_stream(messages, 0.5).await?;
//!     while let Some(delta) = stream.next().await {
//!         print!("{}", delta?);
//!     }
//!     Ok(())
//! }
//! ```

pub mod mock;
pub mod models;
pub mod openai_compatible;
pub mod sse_parser;

use std::pin::Pin;

use async_trait::async_trait;
use futures_core::Stream;

// Re-export commonly used types for convenience
pub use mock::MockProvider;
pub use models::{
    ChatChoice, ChatCompletionChunk, ChatCompletionParams, ChatCompletionResponse,
    ChatCompletionResponseChoice, ChatDelta, ChatMessage, ChatResponseMessage, CompletionError,
    MessageRole,
};
pub use openai_compatible::{OpenAiCompatibleConfig, OpenAiCompatibleProvider};
pub use sse_parser::SSEParser;

/// Type alias for streaming completion results: one item per text delta
pub type StreamingResult = Pin<Box<dyn Stream<Item = Result<String, CompletionError>> + Send>>;

#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Performs a non-streaming chat completion request
    ///
    /// Returns `choices[0].message.content` with surrounding whitespace trimmed.
    async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        temperature: f32,
    ) -> Result<String, CompletionError>;

    /// Performs a streaming chat completion request
    ///
    /// Fails before yielding anything if the endpoint rejects the request.
    /// Individual malformed events are skipped rather than ending the stream.
    async fn chat_completion_stream(
        &self,
        messages: Vec<ChatMessage>,
        temperature: f32,
    ) -> Result<StreamingResult, CompletionError>;
}
