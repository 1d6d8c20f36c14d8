use crate::application_state::AppStateMutex;
use crate::error::ApiError;
use crate::services;
use crate::utils::state_helpers;
use axum::extract::State;

/// Session open: force every motor line low. Leaves the recorded motion
/// status alone.
pub async fn open_session(
    State(app_state): State<AppStateMutex>,
) -> Result<&'static str, ApiError> {
    match services::drive::reset(&app_state).await {
        Ok(()) => Ok("All motor lines reset to low"),
        Err(e) => {
            state_helpers::record_error(&app_state, &e).await;
            Err(e)
        }
    }
}
