use std::fmt::Display;

use crate::application_state::AppStateMutex;
use crate::utils::datetime;

/// Records an error message and timestamp in the application state so the
/// status endpoint can surface the last failure.
pub async fn record_error<E: Display>(app_state: &AppStateMutex, error: &E) {
    let mut state_guard = app_state.lock().await;
    state_guard.last_error_msg = Some(error.to_string());
    state_guard.last_error_time = Some(datetime::get_formatted_current_timestamp());
}
