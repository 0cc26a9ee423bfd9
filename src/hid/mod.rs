//! Virtual HID report composers
//!
//! One composer per device kind. Each owns a current report buffer with a
//! fixed, bit-exact wire layout, applies press/release semantics in place,
//! and emits a report only when it differs from the last one transmitted.
//! No composer operation can fail fatally; rollover is silently dropped.

mod absolute_mouse;
mod consumer;
mod keyboard;
mod mouse;
mod system;

pub use absolute_mouse::SingleAbsoluteMouse;
pub use consumer::{ConsumerControl, ConsumerReport, CONSUMER_REPORT_SIZE, CONSUMER_SLOTS};
pub use keyboard::{
    Keyboard, KeyboardReport, HID_FIRST_MODIFIER, HID_LAST_KEY, HID_LAST_MODIFIER, KEYBOARD_REPORT_SIZE,
    KEY_BYTES,
};
pub use mouse::{
    Mouse, MouseReport, MOUSE_ALL, MOUSE_LEFT, MOUSE_MIDDLE, MOUSE_NEXT, MOUSE_PREV, MOUSE_REPORT_SIZE,
    MOUSE_RIGHT,
};
pub use system::{SystemControl, SystemReport};
