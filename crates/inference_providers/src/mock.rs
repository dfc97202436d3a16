//! Mock implementation of InferenceProvider for testing
//!
//! Replies are scripted per call: queue text, errors, or delta sequences and
//! they are handed out in order. When a queue runs dry the provider falls
//! back to a canned reply. Every request is recorded for later assertions.

use crate::{ChatMessage, CompletionError, InferenceProvider, StreamingResult};
use async_trait::async_trait;
use futures_util::stream;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

pub const DEFAULT_MOCK_REPLY: &str = "This is a mock travel assistant reply.";

/// A request as seen by the mock
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub stream: bool,
}

type ScriptedStream = Result<Vec<Result<String, CompletionError>>, CompletionError>;

#[derive(Default)]
pub struct MockProvider {
    replies: Mutex<VecDeque<Result<String, CompletionError>>>,
    streams: Mutex<VecDeque<ScriptedStream>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    // A panicking test must not poison the mock for the assertions that follow
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of `push_reply`
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.push_reply(text);
        self
    }

    /// Queue the text returned by the next `chat_completion`
    pub fn push_reply(&self, text: impl Into<String>) {
        lock(&self.replies).push_back(Ok(text.into()));
    }

    /// Queue an error returned by the next `chat_completion`
    pub fn push_error(&self, error: CompletionError) {
        lock(&self.replies).push_back(Err(error));
    }

    /// Queue the deltas produced by the next `chat_completion_stream`
    pub fn push_stream<I, T>(&self, deltas: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let items = deltas.into_iter().map(|d| Ok(d.into())).collect();
        lock(&self.streams).push_back(Ok(items));
    }

    /// Queue raw stream items, for failures in the middle of a stream
    pub fn push_stream_items(&self, items: Vec<Result<String, CompletionError>>) {
        lock(&self.streams).push_back(Ok(items));
    }

    /// Make the next `chat_completion_stream` fail before yielding anything
    pub fn push_stream_error(&self, error: CompletionError) {
        lock(&self.streams).push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        lock(&self.requests).clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        lock(&self.requests).last().cloned()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }

    fn record(&self, messages: Vec<ChatMessage>, temperature: f32, stream: bool) {
        lock(&self.requests).push(RecordedRequest {
            messages,
            temperature,
            stream,
        });
    }
}

#[async_trait]
impl InferenceProvider for MockProvider {
    async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        temperature: f32,
    ) -> Result<String, CompletionError> {
        self.record(messages, temperature, false);

        let scripted = lock(&self.replies).pop_front();
        scripted
            .unwrap_or_else(|| Ok(DEFAULT_MOCK_REPLY.to_string()))
            .map(|text| text.trim().to_string())
    }

    async fn chat_completion_stream(
        &self,
        messages: Vec<ChatMessage>,
        temperature: f32,
    ) -> Result<StreamingResult, CompletionError> {
        self.record(messages, temperature, true);

        let scripted = lock(&self.streams).pop_front();
        let items = match scripted {
            Some(scripted) => scripted?,
            None => DEFAULT_MOCK_REPLY
                .split_inclusive(' ')
                .map(|word| Ok(word.to_string()))
                .collect(),
        };

        Ok(Box::pin(stream::iter(items)))
    }
}
