use std::sync::Mutex;

use async_trait::async_trait;
use companion_engine::{ChatMessage, ChatModel, ChatModelError, MessageRole};

enum MockMode {
    Echo,
    Fixed(String),
    Error,
}

/// Scripted completion capability that records every call for assertions.
pub struct MockChatModel {
    mode: MockMode,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockChatModel {
    /// Replies with the content of the latest user message.
    pub fn echo() -> Self {
        Self {
            mode: MockMode::Echo,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn fixed(reply: impl Into<String>) -> Self {
        Self {
            mode: MockMode::Fixed(reply.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn error() -> Self {
        Self {
            mode: MockMode::Error,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_messages(&self) -> Option<Vec<ChatMessage>> {
        self.calls.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String, ChatModelError> {
        self.calls.lock().unwrap().push(messages.to_vec());
        match &self.mode {
            MockMode::Echo => Ok(messages
                .iter()
                .rev()
                .find(|m| m.role == MessageRole::User)
                .map(|m| m.content.clone())
                .unwrap_or_default()),
            MockMode::Fixed(reply) => Ok(reply.clone()),
            MockMode::Error => Err(ChatModelError::Http("mock transport failure".to_string())),
        }
    }
}
