use std::sync::Arc;

use super::model::{ChatMessage, ChatModel};

const PLANNER_SYSTEM_PROMPT: &str = "You are a logical reasoning assistant. Your job is to \
break down complex tasks into clear, step-by-step plans. Analyse the task you are given and \
produce a concise plan using numbered steps.";

pub const REASONING_FALLBACK: &str = "I'm sorry, I couldn't analyse that task.";

/// Planning path: the same completion capability as chat, under a distinct
/// system prompt. Failures degrade to a fixed apology.
pub struct ReasoningAgent {
    model: Arc<dyn ChatModel>,
}

impl ReasoningAgent {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    pub async fn analyse(&self, task: &str) -> String {
        let messages = [
            ChatMessage::system(PLANNER_SYSTEM_PROMPT),
            ChatMessage::user(task),
        ];
        match self.model.generate(&messages).await {
            Ok(plan) => {
                tracing::debug!(chars = plan.len(), "plan generated");
                plan
            }
            Err(e) => {
                tracing::warn!(error = %e, "reasoning analysis failed");
                REASONING_FALLBACK.to_string()
            }
        }
    }
}
