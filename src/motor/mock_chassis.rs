use crate::error::MotorError;
use crate::motor::{OutputLine, PinResolver, Pins};
use rppal::gpio::Level;
use std::sync::{Arc, Mutex};

/// One recorded line write: which line and what level.
#[derive(Debug, Clone, PartialEq)]
pub struct LineWrite {
    pub line: String,
    pub level: Level,
}

#[derive(Default)]
struct JournalInner {
    writes: Vec<LineWrite>,
    claimed: usize,
    released: usize,
    fail_claim_at: Option<usize>,
    fail_write_line: Option<String>,
}

/// Shared recorder behind the mock lines. Tests read it to assert write
/// levels, write ordering, and claim/release accounting.
#[derive(Clone, Default)]
pub struct Journal {
    inner: Arc<Mutex<JournalInner>>,
}

impl Journal {
    pub fn writes(&self) -> Vec<LineWrite> {
        self.inner.lock().unwrap().writes.clone()
    }

    pub fn clear(&self) {
        self.inner.lock().unwrap().writes.clear();
    }

    pub fn claimed(&self) -> usize {
        self.inner.lock().unwrap().claimed
    }

    pub fn released(&self) -> usize {
        self.inner.lock().unwrap().released
    }
}

struct MockLine {
    label: String,
    journal: Journal,
}

impl OutputLine for MockLine {
    fn write(&mut self, level: Level) -> Result<(), MotorError> {
        let mut inner = self.journal.inner.lock().unwrap();
        if inner.fail_write_line.as_deref() == Some(self.label.as_str()) {
            return Err(MotorError::LineWriteFailed(self.label.clone()));
        }
        inner.writes.push(LineWrite {
            line: self.label.clone(),
            level,
        });
        Ok(())
    }
}

impl Drop for MockLine {
    fn drop(&mut self) {
        self.journal.inner.lock().unwrap().released += 1;
    }
}

/// In-memory stand-in for the GPIO chassis. Lines journal every write, and
/// failures can be programmed at claim time (line N unclaimable) or at write
/// time (a named line faults on every write).
pub struct MockChassis {
    journal: Journal,
}

impl MockChassis {
    pub fn new() -> Self {
        MockChassis {
            journal: Journal::default(),
        }
    }

    pub fn journal(&self) -> Journal {
        self.journal.clone()
    }

    /// Makes the Nth claim (0-based, across both groups) fail validation.
    pub fn fail_claim_at(&self, index: usize) {
        self.journal.inner.lock().unwrap().fail_claim_at = Some(index);
    }

    /// Makes every write to the named line report a hardware fault.
    pub fn fail_writes_on(&self, line: &str) {
        self.journal.inner.lock().unwrap().fail_write_line = Some(line.to_string());
    }

    /// Clears a programmed write fault, as if the wiring fault were repaired.
    pub fn clear_write_faults(&self) {
        self.journal.inner.lock().unwrap().fail_write_line = None;
    }

    fn claim(&self, label: String) -> Result<Box<dyn OutputLine>, MotorError> {
        let mut inner = self.journal.inner.lock().unwrap();
        if inner.fail_claim_at == Some(inner.claimed) {
            return Err(MotorError::PinResolutionFailed(format!(
                "{} is not a valid output line",
                label
            )));
        }
        inner.claimed += 1;
        drop(inner);
        Ok(Box::new(MockLine {
            label,
            journal: self.journal.clone(),
        }))
    }

    fn claim_group(&self, group: &str) -> Result<[Box<dyn OutputLine>; 4], MotorError> {
        let mut lines: Vec<Box<dyn OutputLine>> = Vec::with_capacity(4);
        for i in 0..4 {
            lines.push(self.claim(format!("{}_pin{}", group, i))?);
        }
        lines
            .try_into()
            .map_err(|_| MotorError::PinResolutionFailed(format!("{} group incomplete", group)))
    }
}

impl PinResolver for MockChassis {
    fn resolve(&self) -> Result<Pins, MotorError> {
        let motor1 = self.claim_group("motor1")?;
        let motor2 = self.claim_group("motor2")?;
        Ok(Pins { motor1, motor2 })
    }

    fn get_name(&self) -> String {
        "MockChassis".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_claims_all_eight_lines() {
        let chassis = MockChassis::new();
        let pins = chassis.resolve().unwrap();
        assert_eq!(chassis.journal().claimed(), 8);
        assert_eq!(chassis.journal().released(), 0);
        drop(pins);
        assert_eq!(chassis.journal().released(), 8);
    }

    #[test]
    fn test_failed_resolve_leaves_no_line_claimed() {
        // the sixth claim (first motor2 line fully claimed, second fails)
        let chassis = MockChassis::new();
        chassis.fail_claim_at(5);

        let result = chassis.resolve();
        assert!(matches!(
            result,
            Err(MotorError::PinResolutionFailed(_))
        ));

        let journal = chassis.journal();
        assert_eq!(journal.claimed(), 5);
        assert_eq!(journal.released(), 5);
    }

    #[test]
    fn test_failed_first_claim_releases_nothing_because_nothing_claimed() {
        let chassis = MockChassis::new();
        chassis.fail_claim_at(0);

        assert!(chassis.resolve().is_err());
        assert_eq!(chassis.journal().claimed(), 0);
        assert_eq!(chassis.journal().released(), 0);
    }
}
