use crate::application_state::AppStateMutex;
use crate::services;
use axum::extract::{Query, State};
use axum::{Json, response::IntoResponse};
use serde::Deserialize;

pub async fn detailed_health(State(app_state): State<AppStateMutex>) -> impl IntoResponse {
    let health_status = services::status::check_hardware(&app_state).await;
    Json(health_status)
}

#[derive(Deserialize)]
pub struct RawStatusParams {
    pub offset: Option<usize>,
}

/// Legacy byte-buffer view of the status code: up to 4 little-endian bytes,
/// readable from an offset, as the original character device's read() did.
pub async fn raw_status(
    State(app_state): State<AppStateMutex>,
    Query(params): Query<RawStatusParams>,
) -> impl IntoResponse {
    let state_guard = app_state.lock().await;
    state_guard
        .controller
        .read_status_register(params.offset.unwrap_or(0))
}
