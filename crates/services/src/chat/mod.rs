pub mod session;

pub use session::ChatSession;

use crate::profile::JourneySuggestion;
use futures_util::Stream;
use inference_providers::{ChatMessage, CompletionError, InferenceProvider, StreamingResult};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

pub const CHAT_SYSTEM_PROMPT: &str =
    "You are a concise, reliable travel assistant. Prefer ranges and practical steps.";
pub const CHAT_TEMPERATURE: f32 = 0.5;

/// Runs assistant turns against a caller-owned `ChatSession`
pub struct ChatService {
    provider: Arc<dyn InferenceProvider>,
}

impl ChatService {
    pub fn new(provider: Arc<dyn InferenceProvider>) -> Self {
        Self { provider }
    }

    /// Persona first, then the session history in order
    fn request_messages(session: &ChatSession) -> Vec<ChatMessage> {
        std::iter::once(ChatMessage::system(CHAT_SYSTEM_PROMPT))
            .chain(session.history().iter().cloned())
            .collect()
    }

    /// Stream the assistant's answer to the current history.
    ///
    /// The returned stream borrows the session mutably for the whole turn.
    /// Once it is exhausted the full reply is appended as an assistant
    /// message. If the caller stops early, or the stream fails, the history
    /// is left as it was.
    pub async fn stream_assistant_reply<'a>(
        &self,
        session: &'a mut ChatSession,
    ) -> Result<AssistantReply<'a>, CompletionError> {
        let messages = Self::request_messages(session);
        let inner = self
            .provider
            .chat_completion_stream(messages, CHAT_TEMPERATURE)
            .await?;

        Ok(AssistantReply {
            inner,
            session,
            text: String::new(),
            finished: false,
        })
    }

    /// Append `text` as a user message, fetch the full reply, append it, return it.
    ///
    /// On failure the user message stays in the history.
    pub async fn send_and_append(
        &self,
        session: &mut ChatSession,
        text: impl Into<String>,
    ) -> Result<String, CompletionError> {
        session.append_user(text);

        let reply = self
            .provider
            .chat_completion(Self::request_messages(session), CHAT_TEMPERATURE)
            .await?;

        session.append_assistant(reply.clone());
        Ok(reply)
    }

    /// Send a journey suggestion's ready-made prompt
    pub async fn send_suggestion(
        &self,
        session: &mut ChatSession,
        suggestion: &JourneySuggestion,
    ) -> Result<String, CompletionError> {
        tracing::debug!(suggestion = suggestion.id, "Sending journey suggestion");
        self.send_and_append(session, suggestion.prompt).await
    }
}

/// Deltas of one assistant turn. Appends the reply to the session when exhausted.
pub struct AssistantReply<'a> {
    inner: StreamingResult,
    session: &'a mut ChatSession,
    text: String,
    finished: bool,
}

impl AssistantReply<'_> {
    /// Concatenation of every delta yielded so far
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Stream for AssistantReply<'_> {
    type Item = Result<String, CompletionError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.finished {
            return Poll::Ready(None);
        }

        match this.inner.as_mut().poll_next(cx) {
            Poll::Ready(Some(Ok(delta))) => {
                this.text.push_str(&delta);
                Poll::Ready(Some(Ok(delta)))
            }
            Poll::Ready(Some(Err(e))) => {
                this.finished = true;
                Poll::Ready(Some(Err(e)))
            }
            Poll::Ready(None) => {
                this.finished = true;
                this.session.append_assistant(this.text.clone());
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
