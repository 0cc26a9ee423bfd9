//! Firmware event seam
//!
//! The scan driver delivers one [`KeyswitchEvent`] per cell per cycle to a
//! [`KeyswitchHandler`]. Real firmware under test implements the trait;
//! [`DemoFirmware`] is a minimal built-in handler that maps matrix cells to
//! USB HID usage codes and drives the keyboard report composer, so the
//! binary produces observable reports out of the box.

use crate::hid::{Keyboard, KeyboardReport};
use crate::matrix::{MatrixCoord, COLS, ROWS};

/// One keyswitch transition sample for one matrix cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyswitchEvent {
    pub coord: MatrixCoord,
    /// Cell was pressed in the previous scan cycle.
    pub was_pressed: bool,
    /// Cell is pressed in the current scan cycle.
    pub is_pressed: bool,
}

impl KeyswitchEvent {
    /// Press edge: down now, up before.
    pub fn toggled_on(&self) -> bool {
        self.is_pressed && !self.was_pressed
    }

    /// Release edge: up now, down before.
    pub fn toggled_off(&self) -> bool {
        !self.is_pressed && self.was_pressed
    }
}

/// The seam between the scan driver and the firmware under test.
pub trait KeyswitchHandler {
    fn handle_keyswitch_event(&mut self, event: KeyswitchEvent);
}

/// USB HID usage code for each matrix cell under the default QWERTY layout.
///
/// Zero marks cells with no standard usage (prog, led, any, num, the fn
/// keys, and the virtual fly cell); events on those cells are ignored.
#[rustfmt::skip]
const LAYOUT: [[u8; COLS]; ROWS] = [
    // prog  1     2     3     4     5     led   lctrl rctrl any   6     7     8     9     0     num
    [0x00, 0x1E, 0x1F, 0x20, 0x21, 0x22, 0x00, 0xE0, 0xE4, 0x00, 0x23, 0x24, 0x25, 0x26, 0x27, 0x00],
    // `     q     w     e     r     t     tab   bksp  space enter y     u     i     o     p     =
    [0x35, 0x14, 0x1A, 0x08, 0x15, 0x17, 0x2B, 0x2A, 0x2C, 0x28, 0x1C, 0x18, 0x0C, 0x12, 0x13, 0x2E],
    // pgup  a     s     d     f     g     esc   cmd   alt   fly   h     j     k     l     ;     '
    [0x4B, 0x04, 0x16, 0x07, 0x09, 0x0A, 0x29, 0xE3, 0xE2, 0x00, 0x0B, 0x0D, 0x0E, 0x0F, 0x33, 0x34],
    // pgdn  z     x     c     v     b     lfn   lshf  rshf  rfn   n     m     ,     .     /     -
    [0x4E, 0x1D, 0x1B, 0x06, 0x19, 0x05, 0x00, 0xE1, 0xE5, 0x00, 0x11, 0x10, 0x36, 0x37, 0x38, 0x2D],
];

/// Usage code for a matrix cell, `None` for unmapped or out-of-range cells.
pub fn usage_code(coord: MatrixCoord) -> Option<u8> {
    if !coord.in_bounds() {
        return None;
    }
    match LAYOUT[coord.row as usize][coord.col as usize] {
        0 => None,
        code => Some(code),
    }
}

/// Built-in demo firmware: forwards press/release edges to the keyboard
/// composer and queues every emitted report for the caller to print and log.
#[derive(Default)]
pub struct DemoFirmware {
    keyboard: Keyboard,
    emitted: Vec<KeyboardReport>,
}

impl DemoFirmware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    /// Drain the reports emitted since the last call, in emission order.
    pub fn take_emitted(&mut self) -> Vec<KeyboardReport> {
        std::mem::take(&mut self.emitted)
    }
}

impl KeyswitchHandler for DemoFirmware {
    fn handle_keyswitch_event(&mut self, event: KeyswitchEvent) {
        let Some(code) = usage_code(event.coord) else {
            return;
        };
        if event.toggled_on() {
            self.keyboard.press(code);
        } else if event.toggled_off() {
            self.keyboard.release(code);
        } else {
            return;
        }
        if let Some(report) = self.keyboard.send_report() {
            self.emitted.push(report);
        }
    }
}
