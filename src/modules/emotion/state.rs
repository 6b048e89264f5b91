use serde::{Deserialize, Serialize};

use crate::config::Character;

/// Affect vector of the companion. Every dimension is normalised to
/// `[0.0, 1.0]`; 0.5 is neutral. No mutation may leave a value out of range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionState {
    pub mood: f32,
    pub trust: f32,
    pub energy: f32,
}

impl EmotionState {
    pub fn new(mood: f32, trust: f32, energy: f32) -> Self {
        Self {
            mood: mood.clamp(0.0, 1.0),
            trust: trust.clamp(0.0, 1.0),
            energy: energy.clamp(0.0, 1.0),
        }
    }

    pub fn neutral() -> Self {
        Self::new(0.5, 0.5, 0.5)
    }

    /// Baselines come from the character profile only at session creation,
    /// never during updates.
    pub fn from_character(character: &Character) -> Self {
        Self::new(
            character.baseline_mood,
            character.baseline_trust,
            character.baseline_energy,
        )
    }

    pub fn values(&self) -> (f32, f32, f32) {
        (self.mood, self.trust, self.energy)
    }

    pub fn in_bounds(&self) -> bool {
        let ok = |v: f32| (0.0..=1.0).contains(&v);
        ok(self.mood) && ok(self.trust) && ok(self.energy)
    }
}

impl Default for EmotionState {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Applies a delta to one affect dimension, clamping into `[0.0, 1.0]`.
pub fn adjust(current: f32, change: f32) -> f32 {
    (current + change).clamp(0.0, 1.0)
}
