// HTTP request handlers
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::presentation::app_state::AppState;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;

/// Health check endpoint, reports the scope phase
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let phase = *state.phase.borrow();
    Json(json!({ "status": "ok", "phase": phase }))
}

/// Latest rendered frame, 204 until the window is bootstrapped
pub async fn latest_frame(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.frames.latest() {
        Some(frame) => Json(frame.as_ref()).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Stream every frame as it is rendered
pub async fn stream_frames(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // Check if client accepts Brotli compression
    let compress = headers
        .get("accept-encoding")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.contains("br"))
        .unwrap_or(false);

    let rx = state.frames.subscribe();
    stream_from_receiver(rx, compress).await
}
