use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CharacterError {
    #[error("Failed to read character file: {0}")]
    Io(String),

    #[error("Failed to parse character file: {0}")]
    Parse(String),
}

/// Static persona profile. Read-only at runtime; the baseline affect values
/// are consumed once, at session creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    #[serde(default)]
    pub traits: Map<String, Value>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub portrait: Option<String>,
    #[serde(default = "neutral_baseline")]
    pub baseline_mood: f32,
    #[serde(default = "neutral_baseline")]
    pub baseline_trust: f32,
    #[serde(default = "neutral_baseline")]
    pub baseline_energy: f32,
}

fn neutral_baseline() -> f32 {
    0.5
}

impl Character {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            traits: Map::new(),
            description: String::new(),
            portrait: None,
            baseline_mood: 0.5,
            baseline_trust: 0.5,
            baseline_energy: 0.5,
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self, CharacterError> {
        let raw = std::fs::read_to_string(path).map_err(|e| CharacterError::Io(e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| CharacterError::Parse(e.to_string()))
    }
}
