use inference_providers::ChatMessage;
use serde::Serialize;

/// The conversation of one client.
///
/// History only grows: messages are appended and never edited or removed.
/// The persona message is not stored here; it is prepended per request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_user(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::user(text));
    }

    pub(crate) fn append_assistant(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(text));
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
