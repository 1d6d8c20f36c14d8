use crate::application_state::AppStateMutex;
use crate::error::ApiError;
use crate::services;
use crate::utils::state_helpers;
use axum::extract::{Path, State};

pub async fn drive_chassis(
    State(app_state): State<AppStateMutex>,
    Path(code): Path<u8>,
) -> Result<String, ApiError> {
    match services::drive::drive(&app_state, code).await {
        Ok(command) => Ok(format!("Chassis motion set to {}", command)),
        Err(e) => {
            state_helpers::record_error(&app_state, &e).await;
            Err(e)
        }
    }
}
