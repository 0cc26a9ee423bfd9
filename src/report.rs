//! Session log and export functionality
//!
//! Collects every HID report emitted during a simulation session and exports
//! the whole session as pretty-printed JSON, suitable for diffing between
//! firmware revisions.

use crate::hid::KeyboardReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Complete session log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionLog {
    /// Log metadata
    pub metadata: LogMetadata,
    /// Every emitted report, in emission order
    pub reports: Vec<ReportEntry>,
}

/// Log metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogMetadata {
    /// Session start timestamp
    pub started_at: String,
    /// Application version
    pub version: String,
    /// Number of scan cycles executed
    pub cycles: u64,
}

/// One emitted HID report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Scan cycle during which the report was emitted
    pub cycle: u64,
    /// Device kind (e.g. "keyboard")
    pub device: String,
    /// Human-readable rendering of the report contents
    pub rendering: String,
    /// Raw report bytes as lowercase hex
    pub bytes: String,
}

impl SessionLog {
    pub fn new() -> Self {
        let now: DateTime<Utc> = Utc::now();
        Self {
            metadata: LogMetadata {
                started_at: now.to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                cycles: 0,
            },
            reports: Vec::new(),
        }
    }

    /// Record the number of the scan cycle currently executing.
    pub fn set_cycles(&mut self, cycles: u64) {
        self.metadata.cycles = cycles;
    }

    /// Record an emitted keyboard report.
    pub fn record_keyboard(&mut self, cycle: u64, report: &KeyboardReport) {
        self.record(cycle, "keyboard", &report.to_string(), &report.to_bytes());
    }

    /// Record an emitted report of any device kind.
    pub fn record(&mut self, cycle: u64, device: &str, rendering: &str, bytes: &[u8]) {
        let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        self.reports.push(ReportEntry {
            cycle,
            device: device.to_string(),
            rendering: rendering.to_string(),
            bytes: hex,
        });
    }

    /// Export the log to a JSON file
    pub fn export_json(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Export the log to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for SessionLog {
    fn default() -> Self {
        Self::new()
    }
}
