use crate::application_state::AppStateMutex;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::SystemTime;

pub async fn check_hardware(state: &AppStateMutex) -> HealthStatus {
    let state_clone = Arc::clone(state);
    let state_guard = state_clone.lock().await;
    let now = SystemTime::now();

    let uptime_seconds = now
        .duration_since(state_guard.startup_time)
        .unwrap_or_default()
        .as_secs();

    let motion = state_guard.controller.status();

    HealthStatus {
        chassis_status: state_guard.status.to_string(),
        motion: motion.to_string(),
        motion_code: motion.code(),
        backend: state_guard.backend.clone(),
        uptime_seconds,
        last_drive_time: state_guard.last_drive_time.clone(),
        last_error_msg: state_guard.last_error_msg.clone(),
        last_error_time: state_guard.last_error_time.clone(),
        version: state_guard.version.clone(),
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct HealthStatus {
    pub chassis_status: String,
    pub motion: String,
    pub motion_code: u8,
    pub backend: String,
    pub uptime_seconds: u64,
    pub last_drive_time: Option<String>,
    pub last_error_msg: Option<String>,
    pub last_error_time: Option<String>,
    pub version: String,
}
