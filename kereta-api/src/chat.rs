use axum::{extract::{Path, State}, routing::{get, post}, Json, Router};
use kereta_assistant::{ChatReply, ChatRequest};
use kereta_core::{BookingSession, SessionRepository};
use tracing::info;
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/chat/sessions/{session_id}", get(get_session))
}

async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    let agent = state.chat.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable("Chat assistant is not configured. Set GEMINI_API_KEY to enable it.".to_string())
    })?;

    info!("Chat message for session {}", req.session_id);
    Ok(Json(agent.chat(req).await?))
}

async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<BookingSession>, AppError> {
    state.sessions.get(&session_id).await?
        .map(Json)
        .ok_or_else(|| AppError::NotFoundError(format!("Session {} not found.", session_id)))
}
