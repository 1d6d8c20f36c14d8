use crate::error::MotorError;
use crate::motor::{Command, Pins};
use rppal::gpio::Level;
use tracing::{debug, info};

/// Drives the two-motor chassis through its eight output lines.
///
/// Owns the resolved pins for the lifetime of the attached device and tracks
/// the last applied command for status queries. Callers must serialize
/// `apply` calls (the service holds the application-state mutex across each
/// call); interleaved line writes from two commands would actuate a pattern
/// that was never in the table.
pub struct MotionController {
    pins: Pins,
    last_command: Command,
}

impl MotionController {
    /// Arms the controller over freshly resolved pins. The resolver has
    /// already configured every line as an output held low, so the chassis
    /// starts stopped and the recorded status starts at `Stop`.
    pub fn new(pins: Pins) -> Self {
        MotionController {
            pins,
            last_command: Command::Stop,
        }
    }

    /// Applies a motion command: writes the 8-entry pattern to the lines,
    /// motor 1's four lines first in index order, then motor 2's. The
    /// group order matters for settling behavior on coupled H-bridge
    /// drivers and must not be reordered.
    ///
    /// On success `last_command` is updated. A line-write fault propagates
    /// and leaves `last_command` unchanged; line levels are undefined at
    /// that point and the device needs a reset or re-attach before reuse.
    pub fn apply(&mut self, command: Command) -> Result<(), MotorError> {
        let pattern = command.pattern();

        for (i, line) in self.pins.motor1.iter_mut().enumerate() {
            line.write(pattern[i].into())?;
        }
        for (i, line) in self.pins.motor2.iter_mut().enumerate() {
            line.write(pattern[i + 4].into())?;
        }

        self.last_command = command;
        debug!("Applied motion command {} ({})", command, command.code());
        Ok(())
    }

    /// Forces all eight lines low, regardless of the last command. Invoked
    /// at session open. Unlike `apply(Stop)` this does NOT update the
    /// recorded status.
    pub fn reset(&mut self) -> Result<(), MotorError> {
        for line in self.pins.motor1.iter_mut() {
            line.write(Level::Low)?;
        }
        for line in self.pins.motor2.iter_mut() {
            line.write(Level::Low)?;
        }
        info!("All motor lines forced low");
        Ok(())
    }

    pub fn status(&self) -> Command {
        self.last_command
    }

    /// The legacy 4-byte little-endian view of the status code, as the
    /// original character device exposed it to `read()`.
    pub fn status_register(&self) -> [u8; 4] {
        (self.last_command.code() as u32).to_le_bytes()
    }

    /// Partial read of the status register from a byte offset. Offsets at
    /// or past the end yield an empty read, matching the old device.
    pub fn read_status_register(&self, offset: usize) -> Vec<u8> {
        let register = self.status_register();
        if offset >= register.len() {
            return Vec::new();
        }
        register[offset..].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motor::PinResolver;
    use crate::motor::mock_chassis::{LineWrite, MockChassis};

    fn armed_controller() -> (MotionController, MockChassis) {
        let chassis = MockChassis::new();
        let pins = chassis.resolve().unwrap();
        (MotionController::new(pins), chassis)
    }

    fn levels_for(writes: &[LineWrite], line: &str) -> Vec<u8> {
        writes
            .iter()
            .filter(|w| w.line == line)
            .map(|w| w.level as u8)
            .collect()
    }

    #[test]
    fn test_apply_updates_status() {
        let (mut controller, _chassis) = armed_controller();
        assert_eq!(controller.status(), Command::Stop);

        for code in [0u8, 1, 3, 4, 5, 6, 7, 8, 9, 10, 11] {
            let command = Command::try_from(code).unwrap();
            controller.apply(command).unwrap();
            assert_eq!(controller.status(), command);
        }
    }

    #[test]
    fn test_apply_forward_pattern() {
        let (mut controller, chassis) = armed_controller();
        controller.apply(Command::Forward).unwrap();

        let writes = chassis.journal().writes();
        assert_eq!(writes.len(), 8);
        let levels: Vec<u8> = writes.iter().map(|w| w.level as u8).collect();
        assert_eq!(levels, vec![1, 0, 1, 0, 1, 0, 1, 0]);
    }

    #[test]
    fn test_apply_back_pattern() {
        let (mut controller, chassis) = armed_controller();
        controller.apply(Command::Back).unwrap();

        let writes = chassis.journal().writes();
        let levels: Vec<u8> = writes.iter().map(|w| w.level as u8).collect();
        assert_eq!(levels, vec![0, 1, 0, 1, 0, 1, 0, 1]);
    }

    #[test]
    fn test_apply_stop_zeroes_all_lines() {
        let (mut controller, chassis) = armed_controller();
        controller.apply(Command::Right).unwrap();
        chassis.journal().clear();

        controller.apply(Command::Stop).unwrap();
        let writes = chassis.journal().writes();
        assert_eq!(writes.len(), 8);
        assert!(writes.iter().all(|w| w.level as u8 == 0));
    }

    #[test]
    fn test_apply_writes_group_a_before_group_b() {
        let (mut controller, chassis) = armed_controller();
        controller.apply(Command::PivotLeft).unwrap();

        let writes = chassis.journal().writes();
        assert_eq!(writes.len(), 8);
        for write in &writes[..4] {
            assert!(write.line.starts_with("motor1_pin"), "got {}", write.line);
        }
        for write in &writes[4..] {
            assert!(write.line.starts_with("motor2_pin"), "got {}", write.line);
        }
        // within each group, wiring index order
        for (i, write) in writes[..4].iter().enumerate() {
            assert_eq!(write.line, format!("motor1_pin{}", i));
        }
        for (i, write) in writes[4..].iter().enumerate() {
            assert_eq!(write.line, format!("motor2_pin{}", i));
        }
    }

    #[test]
    fn test_apply_is_idempotent() {
        let (mut controller, chassis) = armed_controller();
        controller.apply(Command::Left).unwrap();
        let first: Vec<u8> = chassis
            .journal()
            .writes()
            .iter()
            .map(|w| w.level as u8)
            .collect();

        chassis.journal().clear();
        controller.apply(Command::Left).unwrap();
        let second: Vec<u8> = chassis
            .journal()
            .writes()
            .iter()
            .map(|w| w.level as u8)
            .collect();

        assert_eq!(first, second);
        assert_eq!(controller.status(), Command::Left);
    }

    #[test]
    fn test_reset_does_not_touch_status() {
        let (mut controller, chassis) = armed_controller();
        controller.apply(Command::PivotRight).unwrap();
        chassis.journal().clear();

        controller.reset().unwrap();
        assert_eq!(controller.status(), Command::PivotRight);

        let writes = chassis.journal().writes();
        assert_eq!(writes.len(), 8);
        assert!(writes.iter().all(|w| w.level as u8 == 0));
    }

    #[test]
    fn test_write_fault_leaves_status_unchanged() {
        let (mut controller, chassis) = armed_controller();
        controller.apply(Command::Forward).unwrap();

        chassis.fail_writes_on("motor2_pin1");
        let result = controller.apply(Command::Back);
        assert!(matches!(result, Err(MotorError::LineWriteFailed(_))));
        assert_eq!(controller.status(), Command::Forward);
    }

    #[test]
    fn test_write_fault_on_group_b_still_wrote_group_a_in_order() {
        let chassis = MockChassis::new();
        chassis.fail_writes_on("motor2_pin0");
        let pins = chassis.resolve().unwrap();
        let mut controller = MotionController::new(pins);

        assert!(controller.apply(Command::Forward).is_err());
        let writes = chassis.journal().writes();
        assert_eq!(writes.len(), 4);
        assert_eq!(levels_for(&writes, "motor1_pin0"), vec![1]);
        assert_eq!(levels_for(&writes, "motor1_pin1"), vec![0]);
    }

    #[test]
    fn test_status_register_little_endian() {
        let (mut controller, _chassis) = armed_controller();
        controller.apply(Command::PivotRight).unwrap();
        assert_eq!(controller.status_register(), [11, 0, 0, 0]);
    }

    #[test]
    fn test_status_register_partial_reads() {
        let (mut controller, _chassis) = armed_controller();
        controller.apply(Command::Forward).unwrap();

        assert_eq!(controller.read_status_register(0), vec![1, 0, 0, 0]);
        assert_eq!(controller.read_status_register(2), vec![0, 0]);
        assert_eq!(controller.read_status_register(4), Vec::<u8>::new());
        assert_eq!(controller.read_status_register(100), Vec::<u8>::new());
    }
}
