use crate::config::MotorConfig;
use crate::error::MotorError;
use crate::motor::{OutputLine, PinResolver, Pins};
use rppal::gpio::{Gpio, Level, OutputPin};
use tracing::{debug, info};

/// Electrical pin-control profile applied to the claimed lines.
///
/// "default" resets the lines to their original state when the handles are
/// dropped; "persist" leaves the last driven levels in place across a
/// service restart (rppal's reset-on-drop disabled).
#[derive(Debug, Clone, Copy, PartialEq)]
enum PinctrlProfile {
    Default,
    Persist,
}

fn lookup_pinctrl_profile(name: &str) -> Result<PinctrlProfile, MotorError> {
    match name {
        "default" => Ok(PinctrlProfile::Default),
        "persist" => Ok(PinctrlProfile::Persist),
        other => Err(MotorError::PinControlProfileFailed(other.to_string())),
    }
}

/// Real hardware backend: resolves the configured BCM pin numbers to rppal
/// output pins, each claimed exclusively and initialized low.
pub struct GpioChassis {
    config: MotorConfig,
}

impl GpioChassis {
    pub fn new(config: MotorConfig) -> Self {
        GpioChassis { config }
    }
}

struct GpioLine {
    pin: OutputPin,
}

impl OutputLine for GpioLine {
    fn write(&mut self, level: Level) -> Result<(), MotorError> {
        self.pin.write(level);
        Ok(())
    }
}

fn claim_group(
    gpio: &Gpio,
    bcm_pins: &[u8; 4],
    group: &str,
    profile: PinctrlProfile,
) -> Result<[Box<dyn OutputLine>; 4], MotorError> {
    let mut lines: Vec<Box<dyn OutputLine>> = Vec::with_capacity(4);
    for (i, &bcm) in bcm_pins.iter().enumerate() {
        let pin = gpio.get(bcm).map_err(|e| {
            MotorError::PinResolutionFailed(format!("{}_pin{} (BCM {}): {}", group, i, bcm, e))
        })?;
        let mut output = pin.into_output_low();
        if profile == PinctrlProfile::Persist {
            output.set_reset_on_drop(false);
        }
        debug!("Claimed {}_pin{} on BCM {}", group, i, bcm);
        lines.push(Box::new(GpioLine { pin: output }));
    }
    lines
        .try_into()
        .map_err(|_| MotorError::PinResolutionFailed(format!("{} group incomplete", group)))
}

impl PinResolver for GpioChassis {
    fn resolve(&self) -> Result<Pins, MotorError> {
        let profile = lookup_pinctrl_profile(&self.config.pinctrl_profile)?;
        info!("Selected pinctrl profile '{}'", self.config.pinctrl_profile);

        let gpio = Gpio::new().map_err(|e| {
            MotorError::PinResolutionFailed(format!("GPIO peripheral unavailable: {}", e))
        })?;

        // any failure below drops the pins claimed so far, releasing them
        let motor1 = claim_group(&gpio, &self.config.motor1_pins, "motor1", profile)?;
        let motor2 = claim_group(&gpio, &self.config.motor2_pins, "motor2", profile)?;

        info!(
            "Claimed motor lines, motor1={:?} motor2={:?}",
            self.config.motor1_pins, self.config.motor2_pins
        );
        Ok(Pins { motor1, motor2 })
    }

    fn get_name(&self) -> String {
        "GpioChassis".to_string()
    }
}
