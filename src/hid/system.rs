//! Virtual HID system-control report composer.
//!
//! Single-byte report holding one system usage code (power down, sleep,
//! wake, ...). A `write` is a press followed by a release back to zero.

use std::fmt;

/// Fixed-layout system-control report: a single usage byte.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct SystemReport {
    pub key: u8,
}

impl SystemReport {
    pub fn to_bytes(&self) -> [u8; 1] {
        [self.key]
    }
}

impl fmt::Display for SystemReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.key == 0 {
            f.write_str("none")
        } else {
            write!(f, "{:#04X}", self.key)
        }
    }
}

/// System-control HID composer with change-only report emission.
#[derive(Default)]
pub struct SystemControl {
    report: SystemReport,
    last_report: SystemReport,
}

impl SystemControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the report to the given usage code.
    pub fn press(&mut self, code: u8) -> Option<SystemReport> {
        self.report.key = code;
        self.send_report()
    }

    /// Reset the report to zero.
    pub fn release(&mut self) -> Option<SystemReport> {
        self.press(0)
    }

    /// Press then release the given usage code.
    pub fn write(&mut self, code: u8) -> Vec<SystemReport> {
        self.press(code)
            .into_iter()
            .chain(self.release())
            .collect()
    }

    pub fn release_all(&mut self) -> Option<SystemReport> {
        self.release()
    }

    fn send_report(&mut self) -> Option<SystemReport> {
        if self.report == self.last_report {
            return None;
        }
        self.last_report = self.report;
        Some(self.report)
    }
}
