use std::collections::HashMap;

use companion_engine::SentimentAnalyzer;

/// Deterministic scripted sentiment: exact-text responses with a default.
pub struct ScriptedSentiment {
    responses: HashMap<String, f32>,
    default: f32,
}

impl ScriptedSentiment {
    pub fn new(default: f32) -> Self {
        Self {
            responses: HashMap::new(),
            default,
        }
    }

    pub fn with_response(mut self, text: &str, polarity: f32) -> Self {
        self.responses.insert(text.to_string(), polarity);
        self
    }

    pub fn positive() -> Self {
        Self::new(0.8)
    }

    pub fn negative() -> Self {
        Self::new(-0.8)
    }

    pub fn neutral() -> Self {
        Self::new(0.0)
    }
}

impl SentimentAnalyzer for ScriptedSentiment {
    fn score(&self, text: &str) -> f32 {
        self.responses.get(text).copied().unwrap_or(self.default)
    }
}
