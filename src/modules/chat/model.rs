use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

use crate::config::Settings;

#[derive(Error, Debug)]
pub enum ChatModelError {
    #[error("Chat completion request failed: {0}")]
    Http(String),

    #[error("Chat completion returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Malformed chat completion response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
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

/// Opaque text-completion capability. Fails with a generic error on any
/// transport or model problem; callers own the fallback behaviour.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String, ChatModelError>;
}

/// OpenAI-compatible `/chat/completions` client.
pub struct OpenAiChatModel {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
}

impl OpenAiChatModel {
    pub fn from_settings(settings: &Settings) -> Self {
        tracing::info!(model = %settings.model, base_url = %settings.base_url, "chat model client ready");
        Self {
            client: reqwest::Client::new(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            top_p: settings.top_p,
        }
    }
}

#[async_trait]
impl ChatModel for OpenAiChatModel {
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String, ChatModelError> {
        let body = json!({
            "model": self.model,
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
            "top_p": self.top_p,
            "messages": messages,
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatModelError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatModelError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ChatModelError::MalformedResponse(e.to_string()))?;
        parsed
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                ChatModelError::MalformedResponse("no choices[0].message.content".to_string())
            })
    }
}
