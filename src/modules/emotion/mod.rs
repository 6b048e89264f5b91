pub mod engine;
pub mod sentiment;
pub mod state;

pub use engine::EmotionEngine;
pub use sentiment::{LexiconSentiment, SentimentAnalyzer};
pub use state::EmotionState;
