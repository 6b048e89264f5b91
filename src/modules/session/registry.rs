use std::sync::Arc;

use thiserror::Error;

use super::state::SessionState;
use crate::config::{ConfigError, Settings};
use crate::modules::chat::{ConversationOrchestrator, OpenAiChatModel, ReasoningAgent};
use crate::modules::emotion::EmotionEngine;
use crate::modules::events::{EventAgent, EventError};
use crate::modules::memory::{MemoryError, MemoryStore};
use crate::modules::plugins::PluginChain;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Memory(#[from] MemoryError),

    #[error(transparent)]
    Events(#[from] EventError),
}

/// Single construction point: wires one memory store, emotion engine, plugin
/// chain and orchestrator from one configuration value, and routes external
/// turn requests. Holds no per-request state of its own.
pub struct SessionRegistry {
    orchestrator: ConversationOrchestrator,
    emotion: Arc<EmotionEngine>,
    reasoning: ReasoningAgent,
    events: EventAgent,
}

impl SessionRegistry {
    /// Fails hard on invalid configuration or an unreachable remote index;
    /// there is no degraded startup mode for a misconfigured backend.
    pub async fn new(settings: &Settings) -> Result<Self, RegistryError> {
        settings.validate()?;

        let memory = Arc::new(MemoryStore::open(settings).await?);
        let emotion = Arc::new(EmotionEngine::new());
        let model = Arc::new(OpenAiChatModel::from_settings(settings));
        let plugins = PluginChain::with_builtin();

        let orchestrator = ConversationOrchestrator::new(
            Arc::clone(&memory),
            Arc::clone(&emotion),
            plugins,
            model.clone(),
            settings.tone_decoration,
        );
        let reasoning = ReasoningAgent::new(model);
        let events = EventAgent::from_settings(settings)?;

        tracing::info!("session registry wired");
        Ok(Self {
            orchestrator,
            emotion,
            reasoning,
            events,
        })
    }

    /// Sole conversational entry point for calling surfaces.
    pub async fn process(&self, message: &str, state: &mut SessionState) -> String {
        self.orchestrator.handle_turn(message, state).await
    }

    pub async fn plan(&self, task: &str) -> String {
        self.reasoning.analyse(task).await
    }

    pub fn events(&self) -> Vec<String> {
        self.events.events()
    }

    /// Injects an ambient event into the session: the generated event text is
    /// integrated exactly like a message stimulus.
    pub fn apply_event(&self, state: &mut SessionState) -> String {
        let event = self.events.generate_event();
        self.emotion.apply_event(&event, &mut state.emotion);
        state.record_emotion_snapshot();
        event
    }
}
