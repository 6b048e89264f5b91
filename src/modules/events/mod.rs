use chrono::{Local, Timelike};
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::config::Settings;

#[derive(Error, Debug)]
pub enum EventError {
    #[error("Failed to read custom events file: {0}")]
    Io(String),

    #[error("Failed to parse custom events file: {0}")]
    Parse(String),
}

const DAY_EVENTS: &[&str] = &[
    "You feel a surge of energy as if you have just woken from a nap.",
    "A ray of sunlight through the window lifts your spirits.",
    "You remember a vivid childhood memory of playing in the rain.",
    "A sudden noise startles you and makes you wary.",
    "You recall a moment when someone close to you betrayed your trust.",
];

const NIGHT_EVENTS: &[&str] = &[
    "You have a strange dream in which you are flying over mountains.",
    "The quiet of the night makes you feel calm and reflective.",
    "A half-remembered nightmare leaves you uneasy.",
    "You dream of an old friend you have not spoken to in years.",
    "Restless thoughts keep circling as the night drags on.",
];

/// Ambient stimulus source: day/night pools, optionally replaced by a custom
/// list loaded from a JSON file of strings. Generated events run through the
/// same emotion update as messages.
pub struct EventAgent {
    day_events: Vec<String>,
    night_events: Vec<String>,
    custom_events: Vec<String>,
}

impl EventAgent {
    pub fn from_settings(settings: &Settings) -> Result<Self, EventError> {
        let custom_events = match &settings.custom_events_file {
            Some(path) => {
                let raw =
                    std::fs::read_to_string(path).map_err(|e| EventError::Io(e.to_string()))?;
                let events: Vec<String> =
                    serde_json::from_str(&raw).map_err(|e| EventError::Parse(e.to_string()))?;
                tracing::info!(count = events.len(), file = %path.display(), "custom events loaded");
                events
            }
            None => Vec::new(),
        };

        Ok(Self {
            day_events: DAY_EVENTS.iter().map(|s| s.to_string()).collect(),
            night_events: NIGHT_EVENTS.iter().map(|s| s.to_string()).collect(),
            custom_events,
        })
    }

    /// All events currently in rotation: the custom list when present,
    /// otherwise both built-in pools.
    pub fn events(&self) -> Vec<String> {
        if !self.custom_events.is_empty() {
            return self.custom_events.clone();
        }
        self.day_events
            .iter()
            .chain(self.night_events.iter())
            .cloned()
            .collect()
    }

    pub fn generate_event(&self) -> String {
        let pool = if !self.custom_events.is_empty() {
            &self.custom_events
        } else if (6..22).contains(&Local::now().hour()) {
            &self.day_events
        } else {
            &self.night_events
        };
        pool.choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_default()
    }
}
