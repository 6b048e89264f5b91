use serde::{Deserialize, Serialize};

use crate::modules::emotion::EmotionState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub emotion: EmotionState,
}

#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    pub task: String,
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub plan: String,
}

#[derive(Debug, Serialize)]
pub struct EventsResponse {
    pub events: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
