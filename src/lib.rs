//! Keyboard SimKit - Virtual key-matrix and HID report simulator
//!
//! Emulates a matrix-scanning keyboard controller on a desktop host: text
//! commands drive a virtual key matrix, keyswitch events are delivered to a
//! firmware handler, and HID report composers emit change-only, bit-accurate
//! reports in place of real USB transmission.

pub mod config;
pub mod firmware;
pub mod hid;
pub mod input;
pub mod matrix;
pub mod report;

pub use config::Config;
