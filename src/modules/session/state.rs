use serde::{Deserialize, Serialize};

use crate::config::Character;
use crate::modules::emotion::EmotionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnEntry {
    pub role: TurnRole,
    pub content: String,
}

/// Externally visible turn phase. Every entry into `ProcessingTurn` completes
/// back to `Idle` with a reply; there is no partial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    Idle,
    ProcessingTurn,
}

/// Per-conversation mutable state. Owned by exactly one caller; the
/// orchestrator takes it as `&mut`, so concurrent turns against the same
/// session are rejected at compile time rather than by convention.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub transcript: Vec<TurnEntry>,
    pub emotion: EmotionState,
    pub emotion_history: Vec<EmotionState>,
    pub character: Option<Character>,
    pub phase: TurnPhase,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            transcript: Vec::new(),
            emotion: EmotionState::neutral(),
            emotion_history: Vec::new(),
            character: None,
            phase: TurnPhase::Idle,
        }
    }

    /// Baseline affect from the character applies once, here.
    pub fn with_character(character: Character) -> Self {
        let emotion = EmotionState::from_character(&character);
        Self {
            transcript: Vec::new(),
            emotion,
            emotion_history: Vec::new(),
            character: Some(character),
            phase: TurnPhase::Idle,
        }
    }

    pub fn push_turn(&mut self, role: TurnRole, content: impl Into<String>) {
        self.transcript.push(TurnEntry {
            role,
            content: content.into(),
        });
    }

    /// Past states are immutable snapshots, so the current state is copied in.
    pub fn record_emotion_snapshot(&mut self) {
        self.emotion_history.push(self.emotion.clone());
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
