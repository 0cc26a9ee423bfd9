//! Virtual HID consumer-control report composer.
//!
//! Layout: four 16-bit usage-code slots (8 bytes little-endian on the wire).
//! A press occupies the first free slot; with all four slots in use further
//! presses are silently dropped (rollover).

use std::fmt;

/// Number of simultaneous consumer-control codes.
pub const CONSUMER_SLOTS: usize = 4;

pub const CONSUMER_REPORT_SIZE: usize = CONSUMER_SLOTS * 2;

/// Fixed-layout consumer-control report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct ConsumerReport {
    pub keys: [u16; CONSUMER_SLOTS],
}

impl ConsumerReport {
    pub fn is_empty(&self) -> bool {
        self.keys.iter().all(|&k| k == 0)
    }

    pub fn to_bytes(&self) -> [u8; CONSUMER_REPORT_SIZE] {
        let mut bytes = [0u8; CONSUMER_REPORT_SIZE];
        for (slot, key) in self.keys.iter().enumerate() {
            bytes[slot * 2..slot * 2 + 2].copy_from_slice(&key.to_le_bytes());
        }
        bytes
    }
}

impl fmt::Display for ConsumerReport {
    /// Renders the occupied slots as hex usage codes, or `none`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut first = true;
        for &key in &self.keys {
            if key != 0 {
                if !first {
                    f.write_str(" ")?;
                }
                first = false;
                write!(f, "{key:#06X}")?;
            }
        }
        Ok(())
    }
}

/// Consumer-control HID composer with change-only report emission.
#[derive(Default)]
pub struct ConsumerControl {
    report: ConsumerReport,
    last_report: ConsumerReport,
}

impl ConsumerControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press a usage code into the first free slot. With no free slot the
    /// press is dropped and (the buffer being unchanged) nothing is emitted.
    pub fn press(&mut self, code: u16) -> Option<ConsumerReport> {
        if let Some(slot) = self.report.keys.iter_mut().find(|k| **k == 0) {
            *slot = code;
        }
        self.send_report()
    }

    /// Release a usage code, clearing every slot that holds it.
    pub fn release(&mut self, code: u16) -> Option<ConsumerReport> {
        for slot in self.report.keys.iter_mut() {
            if *slot == code {
                *slot = 0;
            }
        }
        self.send_report()
    }

    /// Press then release a usage code.
    pub fn write(&mut self, code: u16) -> Vec<ConsumerReport> {
        self.press(code)
            .into_iter()
            .chain(self.release(code))
            .collect()
    }

    /// Clear every slot.
    pub fn release_all(&mut self) -> Option<ConsumerReport> {
        self.report = ConsumerReport::default();
        self.send_report()
    }

    /// The current (possibly unsent) report.
    pub fn report(&self) -> &ConsumerReport {
        &self.report
    }

    fn send_report(&mut self) -> Option<ConsumerReport> {
        if self.report == self.last_report {
            return None;
        }
        self.last_report = self.report;
        Some(self.report)
    }
}
