use std::sync::Arc;

use super::sentiment::{LexiconSentiment, SentimentAnalyzer};
use super::state::{adjust, EmotionState};

const MOOD_FACTOR: f32 = 0.1;
const TRUST_FACTOR: f32 = 0.05;
const TRUST_DECAY: f32 = 0.01;
const ENERGY_DECAY: f32 = 0.005;
const ENERGY_NEGATIVITY_FACTOR: f32 = 0.02;

/// Integrates one stimulus into the affect vector. Trust erodes by a constant
/// amount every turn unless positive sentiment outweighs the decay; energy
/// drains every turn, faster under negative sentiment.
pub struct EmotionEngine {
    analyzer: Arc<dyn SentimentAnalyzer>,
}

impl EmotionEngine {
    pub fn new() -> Self {
        Self {
            analyzer: Arc::new(LexiconSentiment::new()),
        }
    }

    pub fn with_analyzer(analyzer: Arc<dyn SentimentAnalyzer>) -> Self {
        Self { analyzer }
    }

    /// Applies exactly one integration of `text` to `state`. Two calls with
    /// the same text shift the state twice; this is an additive process, not
    /// a projection.
    pub fn update_on_message(&self, text: &str, state: &mut EmotionState) {
        let polarity = self.analyzer.score(text).clamp(-1.0, 1.0);

        let mood_change = polarity * MOOD_FACTOR;
        let trust_change = polarity * TRUST_FACTOR - TRUST_DECAY;
        let energy_change = -ENERGY_DECAY + (-polarity * ENERGY_NEGATIVITY_FACTOR);

        let before = state.clone();
        state.mood = adjust(state.mood, mood_change);
        state.trust = adjust(state.trust, trust_change);
        state.energy = adjust(state.energy, energy_change);

        tracing::debug!(
            polarity,
            mood_before = before.mood,
            mood_after = state.mood,
            trust_before = before.trust,
            trust_after = state.trust,
            energy_before = before.energy,
            energy_after = state.energy,
            "emotion state updated"
        );
    }

    /// External events (dreams, ambient triggers) are emotionally equivalent
    /// stimuli and run through the identical update procedure.
    pub fn apply_event(&self, event_text: &str, state: &mut EmotionState) {
        tracing::info!(event = event_text, "applying emotional event");
        self.update_on_message(event_text, state);
    }
}

impl Default for EmotionEngine {
    fn default() -> Self {
        Self::new()
    }
}
