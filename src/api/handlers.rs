//! HTTP request handlers

use super::assets::{get_index_html, serve_static};
use super::sse::{sse_stream, InitEvent};
use super::types::{
    CancelResponse, ChatRequest, ChatResponse, ErrorResponse, SessionInfo, SessionResponse,
    SuccessResponse, TranscriptResponse,
};
use super::AppState;
use crate::session::{Command, SessionHandle};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Root serves the chat page
        .route("/", get(serve_page))
        // Static assets (embedded or filesystem fallback)
        .route("/assets/*path", get(serve_static))
        // Session creation
        .route("/api/sessions/new", post(create_session))
        // Transcript snapshot
        .route("/api/sessions/:id", get(get_session))
        // SSE streaming
        .route("/api/sessions/:id/stream", get(stream_session))
        // User actions
        .route("/api/sessions/:id/chat", post(send_chat))
        .route("/api/sessions/:id/cancel", post(cancel_session))
        // Side-panel command: "Clear Chat History"
        .route("/api/sessions/:id/clear", post(clear_session))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Page Handler
// ============================================================

async fn serve_page() -> impl IntoResponse {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - UI not found</h1>".to_string()),
        )
            .into_response(),
    }
}

// ============================================================
// Session Creation
// ============================================================

async fn create_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let id = state.sessions.create().await;
    Json(SessionResponse {
        session: SessionInfo { id },
    })
}

// ============================================================
// Transcript Retrieval
// ============================================================

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TranscriptResponse>, AppError> {
    let handle = lookup(&state, &id).await?;
    let turns = handle.transcript.read().await.all().to_vec();

    Ok(Json(TranscriptResponse {
        turns,
        busy: handle.is_busy(),
    }))
}

// ============================================================
// SSE Streaming
// ============================================================

async fn stream_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let handle = lookup(&state, &id).await?;

    let turns = handle.transcript.read().await.all().to_vec();
    let init = InitEvent {
        turns,
        busy: handle.is_busy(),
    };

    Ok(sse_stream(init, handle.subscribe()))
}

// ============================================================
// User Actions
// ============================================================

async fn send_chat(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let handle = lookup(&state, &id).await?;

    // The input box enforces non-empty already; guard it here too.
    if req.text.trim().is_empty() {
        return Err(AppError::BadRequest("message text is empty".to_string()));
    }

    // No queueing: one interaction at a time per session.
    if !handle.try_claim() {
        return Err(AppError::BadRequest(
            "session is busy, cancel the current interaction first".to_string(),
        ));
    }

    if let Err(e) = handle.command_tx.send(Command::Chat { text: req.text }).await {
        handle.release_claim();
        return Err(AppError::Internal(format!("failed to send command: {e}")));
    }

    Ok(Json(ChatResponse { accepted: true }))
}

async fn cancel_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CancelResponse>, AppError> {
    let handle = lookup(&state, &id).await?;
    handle.cancel();
    Ok(Json(CancelResponse { ok: true }))
}

async fn clear_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, AppError> {
    let handle = lookup(&state, &id).await?;

    handle
        .command_tx
        .send(Command::Clear)
        .await
        .map_err(|e| AppError::Internal(format!("failed to send command: {e}")))?;

    Ok(Json(SuccessResponse { success: true }))
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("tutordesk ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Helpers
// ============================================================

async fn lookup(state: &AppState, id: &str) -> Result<SessionHandle, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("unknown session: {id}")))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
