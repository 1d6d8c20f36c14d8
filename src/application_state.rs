use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::Mutex;
use tracing::info;

use crate::config::AppConfig;
use crate::error::MotorError;
use crate::motor::PinResolver;
use crate::motor::controller::MotionController;
use crate::motor::gpio_chassis::GpioChassis;
use crate::motor::mock_chassis::MockChassis;

pub type AppStateMutex = Arc<Mutex<ApplicationState>>;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub enum ChassisStatus {
    Operational,
    // a line write faulted; levels are undefined until a reset or re-attach
    Faulted,
}

impl fmt::Display for ChassisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

pub struct ApplicationState {
    pub controller: MotionController,
    pub status: ChassisStatus,
    pub backend: String,
    pub startup_time: SystemTime,
    pub last_drive_time: Option<String>,
    pub last_error_msg: Option<String>,
    pub last_error_time: Option<String>,
    pub app_config: AppConfig,
    pub version: String,
}

impl ApplicationState {
    /// Attaches the chassis: picks the hardware backend, resolves and claims
    /// all eight lines (outputs, initialized low), arms the controller and
    /// forces an initial line reset. Any failure here is fatal and must
    /// abort startup; the component never comes up partially configured.
    pub fn attach(app_config: AppConfig) -> Result<Self, MotorError> {
        let version = env!("CARGO_PKG_VERSION").to_string();
        info!("Starting chassis-motor-api, version: {}", version);

        let backend_name = std::env::var("CHASSIS_BACKEND")
            .unwrap_or_else(|_| app_config.motor.backend.clone());

        let resolver = init_resolver(&backend_name, &app_config)?;
        info!("Hardware backend selected: {}", resolver.get_name());

        let pins = resolver.resolve()?;
        let mut controller = MotionController::new(pins);
        controller.reset()?;

        Ok(Self {
            controller,
            status: ChassisStatus::Operational,
            backend: resolver.get_name(),
            startup_time: SystemTime::now(),
            last_drive_time: None,
            last_error_msg: None,
            last_error_time: None,
            app_config,
            version,
        })
    }
}

fn init_resolver(
    backend: &str,
    config: &AppConfig,
) -> Result<Box<dyn PinResolver>, MotorError> {
    match backend {
        "GpioChassis" => Ok(Box::new(GpioChassis::new(config.motor.clone()))),
        "MockChassis" => Ok(Box::new(MockChassis::new())),
        // Add more hardware backends here as needed
        _ => Err(MotorError::PinResolutionFailed(format!(
            "unsupported hardware backend '{}'",
            backend
        ))),
    }
}
