use crate::error::MotorError;
use core::fmt;
use rppal::gpio::Level;

pub mod controller;
pub mod gpio_chassis;
pub mod mock_chassis;

/// One digital output line of the chassis H-bridge driver.
///
/// The real implementation wraps an rppal `OutputPin`; the mock records every
/// write so tests can assert levels and ordering. A claimed line is released
/// when the handle is dropped.
pub trait OutputLine: Send {
    fn write(&mut self, level: Level) -> Result<(), MotorError>;
}

/// The eight output lines, grouped per motor, in wiring order.
/// Resolved once at attach and owned by the controller until detach.
pub struct Pins {
    pub motor1: [Box<dyn OutputLine>; 4],
    pub motor2: [Box<dyn OutputLine>; 4],
}

pub trait PinResolver: Send + Sync {
    /// Claims and configures all eight lines as outputs initialized low.
    /// All-or-nothing: on any failure no line stays claimed.
    fn resolve(&self) -> Result<Pins, MotorError>;

    fn get_name(&self) -> String;
}

/// Discrete motion command. Code 2 is a reserved gap in the original command
/// table and is deliberately unrepresentable here; raw-code conversion
/// rejects it along with anything outside [0, 11].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Command {
    Stop = 0,
    Forward = 1,
    Back = 3,
    Left = 4,
    Right = 5,
    LeftForward = 6,
    RightBack = 7,
    RightForward = 8,
    LeftBack = 9,
    PivotLeft = 10,
    PivotRight = 11,
}

impl Command {
    /// The 8-level actuation pattern for this command: entries [0..4) drive
    /// motor 1's lines in order, entries [4..8) drive motor 2's.
    pub const fn pattern(self) -> [u8; 8] {
        match self {
            Command::Stop => [0, 0, 0, 0, 0, 0, 0, 0],
            Command::Forward => [1, 0, 1, 0, 1, 0, 1, 0],
            Command::Back => [0, 1, 0, 1, 0, 1, 0, 1],
            Command::Left => [0, 1, 1, 0, 0, 1, 1, 0],
            Command::Right => [1, 0, 0, 1, 1, 0, 0, 1],
            Command::LeftForward => [0, 0, 1, 0, 0, 0, 1, 0],
            Command::RightBack => [0, 0, 0, 1, 0, 0, 0, 1],
            Command::RightForward => [1, 0, 0, 0, 1, 0, 0, 0],
            Command::LeftBack => [0, 1, 0, 0, 0, 1, 0, 0],
            Command::PivotLeft => [1, 0, 0, 1, 0, 1, 1, 0],
            Command::PivotRight => [0, 1, 1, 0, 1, 0, 0, 1],
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Command {
    type Error = MotorError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Command::Stop),
            1 => Ok(Command::Forward),
            3 => Ok(Command::Back),
            4 => Ok(Command::Left),
            5 => Ok(Command::Right),
            6 => Ok(Command::LeftForward),
            7 => Ok(Command::RightBack),
            8 => Ok(Command::RightForward),
            9 => Ok(Command::LeftBack),
            10 => Ok(Command::PivotLeft),
            11 => Ok(Command::PivotRight),
            other => Err(MotorError::InvalidCommand(other)),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Stop => write!(f, "Stop"),
            Command::Forward => write!(f, "Forward"),
            Command::Back => write!(f, "Back"),
            Command::Left => write!(f, "Left"),
            Command::Right => write!(f, "Right"),
            Command::LeftForward => write!(f, "LeftForward"),
            Command::RightBack => write!(f, "RightBack"),
            Command::RightForward => write!(f, "RightForward"),
            Command::LeftBack => write!(f, "LeftBack"),
            Command::PivotLeft => write!(f, "PivotLeft"),
            Command::PivotRight => write!(f, "PivotRight"),
        }
    }
}
