use crate::application_state::{AppStateMutex, ChassisStatus};
use crate::error::ApiError;
use crate::motor::Command;
use crate::utils::datetime;
use tracing::{info, warn};

/// Validates a raw command code and applies it to the chassis.
///
/// The state mutex is held across the whole line-write sequence, so drive
/// requests are serialized: two concurrent commands can never interleave
/// their group-A/group-B writes on the hardware.
pub async fn drive(app_state: &AppStateMutex, code: u8) -> Result<Command, ApiError> {
    let command = Command::try_from(code).map_err(|e| {
        warn!("Rejected drive request: {}", e);
        ApiError::BadRequest(e.to_string())
    })?;

    let mut state_guard = app_state.lock().await;

    if state_guard.status != ChassisStatus::Operational {
        return Err(ApiError::Faulted(format!(
            "chassis is not operational (current status: {})",
            state_guard.status
        )));
    }

    match state_guard.controller.apply(command) {
        Ok(()) => {
            state_guard.last_drive_time = Some(datetime::get_formatted_current_timestamp());
            info!("Chassis motion set to {}", command);
            Ok(command)
        }
        Err(e) => {
            // line levels are undefined after a write fault; refuse further
            // commands until a reset or re-attach
            state_guard.status = ChassisStatus::Faulted;
            Err(ApiError::Hardware(e.to_string()))
        }
    }
}

/// Session-open behavior: force all eight lines low. The recorded motion
/// status is deliberately left untouched, matching the original device's
/// open() semantics. A successful reset clears a prior fault.
pub async fn reset(app_state: &AppStateMutex) -> Result<(), ApiError> {
    let mut state_guard = app_state.lock().await;

    match state_guard.controller.reset() {
        Ok(()) => {
            state_guard.status = ChassisStatus::Operational;
            Ok(())
        }
        Err(e) => {
            state_guard.status = ChassisStatus::Faulted;
            Err(ApiError::Hardware(e.to_string()))
        }
    }
}
