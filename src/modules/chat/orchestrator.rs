//! Turn-level composition: plugin interception, memory retrieval, reply
//! generation, affect update and persistence, in a fixed order.

use std::sync::Arc;

use serde_json::{Map, Value};

use super::model::{ChatMessage, ChatModel};
use crate::modules::emotion::EmotionEngine;
use crate::modules::memory::MemoryStore;
use crate::modules::plugins::PluginChain;
use crate::modules::session::{SessionState, TurnPhase, TurnRole};

pub const FALLBACK_REPLY: &str = "Sorry, something went wrong while generating a response.";

const MEMORY_CONTEXT_HEADER: &str = "The following lines are relevant memories from past \
interactions. Use them to inform your answer, but do not mention them explicitly.";

const HIGH_MOOD: f32 = 0.7;
const LOW_MOOD: f32 = 0.3;

pub struct ConversationOrchestrator {
    memory: Arc<MemoryStore>,
    emotion: Arc<EmotionEngine>,
    plugins: PluginChain,
    model: Arc<dyn ChatModel>,
    tone_decoration: bool,
}

impl ConversationOrchestrator {
    pub fn new(
        memory: Arc<MemoryStore>,
        emotion: Arc<EmotionEngine>,
        plugins: PluginChain,
        model: Arc<dyn ChatModel>,
        tone_decoration: bool,
    ) -> Self {
        tracing::info!(
            plugins = plugins.len(),
            tone_decoration,
            "conversation orchestrator ready"
        );
        Self {
            memory,
            emotion,
            plugins,
            model,
            tone_decoration,
        }
    }

    /// Runs one complete turn against `state`. Never fails: every internal
    /// error path degrades to a fallback reply, and the transcript, memory
    /// log and emotion history all advance together before this returns.
    pub async fn handle_turn(&self, message: &str, state: &mut SessionState) -> String {
        state.phase = TurnPhase::ProcessingTurn;

        // `reply` is what the user sees and what gets persisted; `stimulus`
        // is the undecorated text the emotion update runs on, so tone
        // prefixes cannot skew sentiment.
        let (reply, stimulus) = match self.plugins.intercept(message, state) {
            Some(plugin_reply) => (plugin_reply.clone(), plugin_reply),
            None => {
                let generated = self.generate_reply(message, state).await;
                let decorated = if self.tone_decoration {
                    decorate_reply(&generated, state.emotion.mood)
                } else {
                    generated.clone()
                };
                (decorated, generated)
            }
        };

        state.push_turn(TurnRole::User, message);
        state.push_turn(TurnRole::Assistant, reply.clone());

        if let Err(e) = self.memory.append(message, role_metadata("user")).await {
            tracing::warn!(error = %e, "failed to persist user message");
        }
        if let Err(e) = self.memory.append(&reply, role_metadata("assistant")).await {
            tracing::warn!(error = %e, "failed to persist reply");
        }

        self.emotion.update_on_message(&stimulus, &mut state.emotion);
        state.record_emotion_snapshot();

        state.phase = TurnPhase::Idle;
        reply
    }

    async fn generate_reply(&self, message: &str, state: &SessionState) -> String {
        let mut messages = Vec::new();

        let hits = self.memory.retrieve(message, None).await;
        if !hits.is_empty() {
            let memory_context = hits
                .iter()
                .map(|hit| hit.text.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            messages.push(ChatMessage::system(format!(
                "{MEMORY_CONTEXT_HEADER}\n{memory_context}"
            )));
            tracing::debug!(count = hits.len(), "memory context added to prompt");
        }

        for entry in &state.transcript {
            messages.push(match entry.role {
                TurnRole::User => ChatMessage::user(entry.content.clone()),
                TurnRole::Assistant => ChatMessage::assistant(entry.content.clone()),
            });
        }
        messages.push(ChatMessage::user(message));

        match self.model.generate(&messages).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "reply generation failed; using fallback");
                FALLBACK_REPLY.to_string()
            }
        }
    }
}

/// Mood-dependent tone prefix, computed from the affect value before this
/// turn's update runs.
fn decorate_reply(reply: &str, mood: f32) -> String {
    if mood >= HIGH_MOOD {
        format!("*smiling* {reply}")
    } else if mood <= LOW_MOOD {
        format!("*quietly* {reply}")
    } else {
        reply.to_string()
    }
}

fn role_metadata(role: &str) -> Map<String, Value> {
    let mut metadata = Map::new();
    metadata.insert("role".to_string(), Value::String(role.to_string()));
    metadata
}
