use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use super::services::{validate_task, validate_user_message};
use super::types::{
    ChatRequest, ChatResponse, ErrorResponse, EventsResponse, PlanRequest, PlanResponse,
};
use crate::modules::session::{SessionRegistry, SessionState};

pub struct AppState {
    pub registry: SessionRegistry,
}

impl AppState {
    pub fn new(registry: SessionRegistry) -> Self {
        Self { registry }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/plan", post(plan))
        .route("/events", get(events))
        .with_state(state)
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(error: impl std::fmt::Display) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::new(error.to_string())),
    )
}

/// Processes one chat turn. The session is per-request here; long-lived
/// sessions are a library concern of callers embedding the registry.
async fn chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = validate_user_message(&request.message).map_err(bad_request)?;

    let mut session = SessionState::new();
    let reply = state.registry.process(&message, &mut session).await;
    Ok(Json(ChatResponse {
        reply,
        emotion: session.emotion,
    }))
}

async fn plan(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PlanRequest>,
) -> Result<Json<PlanResponse>, ApiError> {
    let task = validate_task(&request.task).map_err(bad_request)?;

    let plan = state.registry.plan(&task).await;
    Ok(Json(PlanResponse { plan }))
}

async fn events(State(state): State<Arc<AppState>>) -> Json<EventsResponse> {
    Json(EventsResponse {
        events: state.registry.events(),
    })
}
