//! Virtual HID mouse report composer.
//!
//! Layout (4 bytes): button bitmask, then x, y and wheel as signed 8-bit
//! relative axes. Axes are transient per report; only the button mask is
//! persistent state.

use std::fmt;

pub const MOUSE_LEFT: u8 = 1 << 0;
pub const MOUSE_RIGHT: u8 = 1 << 1;
pub const MOUSE_MIDDLE: u8 = 1 << 2;
pub const MOUSE_PREV: u8 = 1 << 3;
pub const MOUSE_NEXT: u8 = 1 << 4;
pub const MOUSE_ALL: u8 = MOUSE_LEFT | MOUSE_RIGHT | MOUSE_MIDDLE | MOUSE_PREV | MOUSE_NEXT;

pub const MOUSE_REPORT_SIZE: usize = 4;

const BUTTON_NAMES: [(u8, &str); 5] = [
    (MOUSE_LEFT, "left"),
    (MOUSE_RIGHT, "right"),
    (MOUSE_MIDDLE, "middle"),
    (MOUSE_PREV, "prev"),
    (MOUSE_NEXT, "next"),
];

/// Fixed-layout mouse report: buttons plus relative axes.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct MouseReport {
    pub buttons: u8,
    pub x: i8,
    pub y: i8,
    pub wheel: i8,
}

impl MouseReport {
    pub fn to_bytes(&self) -> [u8; MOUSE_REPORT_SIZE] {
        [self.buttons, self.x as u8, self.y as u8, self.wheel as u8]
    }
}

impl fmt::Display for MouseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("buttons:")?;
        if self.buttons == 0 {
            f.write_str(" none")?;
        } else {
            for (mask, name) in BUTTON_NAMES {
                if self.buttons & mask != 0 {
                    write!(f, " {name}")?;
                }
            }
        }
        write!(f, " x: {} y: {} wheel: {}", self.x, self.y, self.wheel)
    }
}

/// Mouse HID composer.
///
/// Relative movement always emits a report (motion is an event, even with
/// zero axes); button presses and releases emit a zero-axis report only when
/// the button mask actually changes.
#[derive(Default)]
pub struct Mouse {
    buttons: u8,
}

impl Mouse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a relative movement report carrying the current button mask.
    pub fn mouse_move(&mut self, x: i8, y: i8, wheel: i8) -> MouseReport {
        MouseReport {
            buttons: self.buttons,
            x,
            y,
            wheel,
        }
    }

    /// Replace the button mask, emitting a report if it changed.
    pub fn set_buttons(&mut self, buttons: u8) -> Option<MouseReport> {
        if buttons == self.buttons {
            return None;
        }
        self.buttons = buttons;
        Some(self.mouse_move(0, 0, 0))
    }

    /// Press the given buttons (in addition to any already held).
    pub fn press(&mut self, buttons: u8) -> Option<MouseReport> {
        self.set_buttons(self.buttons | buttons)
    }

    /// Release the given buttons.
    pub fn release(&mut self, buttons: u8) -> Option<MouseReport> {
        self.set_buttons(self.buttons & !buttons)
    }

    /// Press then immediately release exactly the given buttons, emitting
    /// two reports.
    pub fn click(&mut self, buttons: u8) -> [MouseReport; 2] {
        self.buttons = buttons;
        let down = self.mouse_move(0, 0, 0);
        self.buttons = 0;
        let up = self.mouse_move(0, 0, 0);
        [down, up]
    }

    /// Release every button and emit a zeroed report.
    pub fn release_all(&mut self) -> MouseReport {
        self.buttons = 0;
        self.mouse_move(0, 0, 0)
    }

    pub fn is_pressed(&self, buttons: u8) -> bool {
        self.buttons & buttons != 0
    }
}
