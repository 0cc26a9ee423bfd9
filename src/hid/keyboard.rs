//! Virtual HID keyboard report composer.
//!
//! Layout (29 bytes):
//! ```text
//! Byte 0:    Modifier keys (bitfield)
//!            Bit 0 = Left Ctrl,  Bit 1 = Left Shift,
//!            Bit 2 = Left Alt,   Bit 3 = Left GUI,
//!            Bit 4 = Right Ctrl, Bit 5 = Right Shift,
//!            Bit 6 = Right Alt,  Bit 7 = Right GUI
//! Byte 1-28: Key bitmap addressed by usage code
//!            (bit = code % 8, byte = code / 8)
//! ```
//!
//! This is the NKRO bitmap layout firmware code depends on, not the 6-key
//! boot-protocol array.

use std::fmt;

/// Size of the key bitmap in bytes.
pub const KEY_BYTES: usize = 28;
/// Total report size on the wire.
pub const KEYBOARD_REPORT_SIZE: usize = 1 + KEY_BYTES;

/// Highest printable usage code (keypad hexadecimal).
pub const HID_LAST_KEY: u8 = 0xDD;
/// First modifier usage code (left control).
pub const HID_FIRST_MODIFIER: u8 = 0xE0;
/// Last modifier usage code (right GUI).
pub const HID_LAST_MODIFIER: u8 = 0xE7;

const MODIFIER_NAMES: [&str; 8] = [
    "lctrl", "lshift", "lalt", "lgui", "rctrl", "rshift", "ralt", "rgui",
];

/// Names for the first 17 bitmap bytes; higher bytes render as "(other)".
#[rustfmt::skip]
const KEY_BIT_NAMES: [[&str; 8]; 17] = [
    ["NO_EVENT", "ERROR_ROLLOVER", "POST_FAIL", "ERROR_UNDEFINED", "a", "b", "c", "d"],
    ["e", "f", "g", "h", "i", "j", "k", "l"],
    ["m", "n", "o", "p", "q", "r", "s", "t"],
    ["u", "v", "w", "x", "y", "z", "1/!", "2/@"],
    ["3/#", "4/$", "5/%", "6/^", "7/&", "8/*", "9/(", "0/)"],
    ["enter", "esc", "del/bksp", "tab", "space", "-/_", "=/+", "[/{"],
    ["]/}", "\\/|", "#/~", ";/:", "'/\"", "`/~", ",/<", "./>"],
    ["//?", "capslock", "F1", "F2", "F3", "F4", "F5", "F6"],
    ["F7", "F8", "F9", "F10", "F11", "F12", "prtscr", "scrolllock"],
    ["pause", "ins", "home", "pgup", "del", "end", "pgdn", "r_arrow"],
    ["l_arrow", "d_arrow", "u_arrow", "numlock", "num/", "num*", "num-", "num+"],
    ["numenter", "num1", "num2", "num3", "num4", "num5", "num6", "num7"],
    ["num8", "num9", "num0", "num.", "\\/|", "app", "power", "num="],
    ["F13", "F14", "F15", "F16", "F17", "F18", "F19", "F20"],
    ["F21", "F22", "F23", "F24", "exec", "help", "menu", "sel"],
    ["stop", "again", "undo", "cut", "copy", "paste", "find", "mute"],
    ["volup", "voldn", "capslock_l", "numlock_l", "scrolllock_l", "num,", "num=", "(other)"],
];

/// Fixed-layout keyboard report: modifier byte plus NKRO key bitmap.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct KeyboardReport {
    pub modifiers: u8,
    pub keys: [u8; KEY_BYTES],
}

impl KeyboardReport {
    /// `true` when no modifier and no key bit is set.
    pub fn is_empty(&self) -> bool {
        self.modifiers == 0 && self.keys.iter().all(|&b| b == 0)
    }

    /// Serialize to the 29-byte wire layout, modifiers first.
    pub fn to_bytes(&self) -> [u8; KEYBOARD_REPORT_SIZE] {
        let mut bytes = [0u8; KEYBOARD_REPORT_SIZE];
        bytes[0] = self.modifiers;
        bytes[1..].copy_from_slice(&self.keys);
        bytes
    }
}

impl fmt::Display for KeyboardReport {
    /// Renders the active modifiers and keys by name, or `none`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut first = true;
        let mut emit = |f: &mut fmt::Formatter<'_>, name: &str| -> fmt::Result {
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            f.write_str(name)
        };
        for (bit, name) in MODIFIER_NAMES.iter().enumerate() {
            if self.modifiers & (1 << bit) != 0 {
                emit(f, name)?;
            }
        }
        for (index, &byte) in self.keys.iter().enumerate() {
            if byte == 0 {
                continue;
            }
            match KEY_BIT_NAMES.get(index) {
                Some(names) => {
                    for (bit, name) in names.iter().enumerate() {
                        if byte & (1 << bit) != 0 {
                            emit(f, name)?;
                        }
                    }
                }
                // Rarely-used high usage codes are lumped together.
                None => emit(f, "(other)")?,
            }
        }
        Ok(())
    }
}

/// Keyboard HID composer with change-only report emission.
#[derive(Default)]
pub struct Keyboard {
    report: KeyboardReport,
    last_report: KeyboardReport,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press a usage code: sets its bitmap bit, or the modifier bit for
    /// codes in the modifier range. Returns `false` for codes outside both
    /// ranges.
    pub fn press(&mut self, code: u8) -> bool {
        if code <= HID_LAST_KEY {
            self.report.keys[code as usize / 8] |= 1 << (code % 8);
            true
        } else if (HID_FIRST_MODIFIER..=HID_LAST_MODIFIER).contains(&code) {
            self.report.modifiers |= 1 << (code - HID_FIRST_MODIFIER);
            true
        } else {
            false
        }
    }

    /// Release a usage code. Releasing an unset bit is a safe no-op.
    /// Returns `false` for codes outside the printable and modifier ranges.
    pub fn release(&mut self, code: u8) -> bool {
        if code <= HID_LAST_KEY {
            self.report.keys[code as usize / 8] &= !(1 << (code % 8));
            true
        } else if (HID_FIRST_MODIFIER..=HID_LAST_MODIFIER).contains(&code) {
            self.report.modifiers &= !(1 << (code - HID_FIRST_MODIFIER));
            true
        } else {
            false
        }
    }

    /// Release every key and modifier.
    pub fn release_all(&mut self) {
        self.report = KeyboardReport::default();
    }

    /// Whether a modifier is set in the current (unsent) report.
    pub fn modifier_active(&self, code: u8) -> bool {
        (HID_FIRST_MODIFIER..=HID_LAST_MODIFIER).contains(&code)
            && self.report.modifiers & (1 << (code - HID_FIRST_MODIFIER)) != 0
    }

    /// Whether a modifier was set in the last transmitted report.
    pub fn was_modifier_active(&self, code: u8) -> bool {
        (HID_FIRST_MODIFIER..=HID_LAST_MODIFIER).contains(&code)
            && self.last_report.modifiers & (1 << (code - HID_FIRST_MODIFIER)) != 0
    }

    /// The current (possibly unsent) report.
    pub fn report(&self) -> &KeyboardReport {
        &self.report
    }

    /// Emit the current report if it differs from the last one sent.
    ///
    /// Returns the transmitted report, or `None` when the report is
    /// byte-for-byte identical to the previous transmission.
    pub fn send_report(&mut self) -> Option<KeyboardReport> {
        if self.report == self.last_report {
            return None;
        }
        self.last_report = self.report;
        Some(self.report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_sets_bitmap_bit() {
        let mut kbd = Keyboard::new();
        assert!(kbd.press(0x04)); // 'a'
        assert_eq!(kbd.report().keys[0], 1 << 4);
        assert_eq!(kbd.report().modifiers, 0);
    }

    #[test]
    fn press_modifier_sets_modifier_bit() {
        let mut kbd = Keyboard::new();
        assert!(kbd.press(0xE1)); // left shift
        assert_eq!(kbd.report().modifiers, 1 << 1);
        assert!(kbd.modifier_active(0xE1));
        assert!(!kbd.was_modifier_active(0xE1));
    }

    #[test]
    fn modifier_and_key_in_same_cycle_are_independent() {
        let mut kbd = Keyboard::new();
        kbd.press(0xE1); // lshift
        kbd.press(0x06); // 'c'
        assert_eq!(kbd.report().modifiers, 1 << 1);
        assert_eq!(kbd.report().keys[0], 1 << 6);
        kbd.release(0x06);
        assert_eq!(kbd.report().modifiers, 1 << 1);
        assert_eq!(kbd.report().keys[0], 0);
    }

    #[test]
    fn out_of_range_code_is_rejected() {
        let mut kbd = Keyboard::new();
        assert!(!kbd.press(0xDE));
        assert!(!kbd.press(0xE8));
        assert!(!kbd.release(0xFF));
        assert!(kbd.report().is_empty());
    }

    #[test]
    fn boundary_codes_are_accepted() {
        let mut kbd = Keyboard::new();
        assert!(kbd.press(HID_LAST_KEY));
        assert!(kbd.press(HID_FIRST_MODIFIER));
        assert!(kbd.press(HID_LAST_MODIFIER));
    }

    #[test]
    fn releasing_unset_bit_is_a_noop() {
        let mut kbd = Keyboard::new();
        assert!(kbd.release(0x04));
        assert!(kbd.report().is_empty());
    }

    #[test]
    fn send_report_is_change_only() {
        let mut kbd = Keyboard::new();
        // Nothing pressed yet: current equals last, nothing to send.
        assert!(kbd.send_report().is_none());

        kbd.press(0x04);
        let sent = kbd.send_report().expect("changed report must emit");
        assert_eq!(sent.keys[0], 1 << 4);

        // Identical contents: must not re-emit.
        assert!(kbd.send_report().is_none());

        // A single-bit change emits exactly once.
        kbd.press(0x05);
        assert!(kbd.send_report().is_some());
        assert!(kbd.send_report().is_none());
    }

    #[test]
    fn release_all_then_send_emits_empty_report() {
        let mut kbd = Keyboard::new();
        kbd.press(0xE0);
        kbd.press(0x04);
        kbd.send_report();
        kbd.release_all();
        let sent = kbd.send_report().expect("release must emit");
        assert!(sent.is_empty());
        assert_eq!(format!("{sent}"), "none");
    }

    #[test]
    fn rendering_names_keys_in_bitmap_order() {
        let mut kbd = Keyboard::new();
        kbd.press(0xE1); // lshift
        kbd.press(0x06); // c
        kbd.press(0x2B); // tab
        let sent = kbd.send_report().unwrap();
        assert_eq!(format!("{sent}"), "lshift c tab");
    }

    #[test]
    fn rendering_of_high_codes_is_other() {
        let mut kbd = Keyboard::new();
        kbd.press(0x90); // byte 18, beyond the name table
        let sent = kbd.send_report().unwrap();
        assert_eq!(format!("{sent}"), "(other)");
    }

    #[test]
    fn wire_layout_is_modifiers_then_bitmap() {
        let mut kbd = Keyboard::new();
        kbd.press(0xE0);
        kbd.press(0x04);
        let bytes = kbd.report().to_bytes();
        assert_eq!(bytes.len(), KEYBOARD_REPORT_SIZE);
        assert_eq!(bytes[0], 1); // lctrl
        assert_eq!(bytes[1], 1 << 4); // 'a'
        assert!(bytes[2..].iter().all(|&b| b == 0));
    }

    #[test]
    fn was_modifier_active_tracks_last_transmission() {
        let mut kbd = Keyboard::new();
        kbd.press(0xE5); // rshift
        assert!(!kbd.was_modifier_active(0xE5));
        kbd.send_report();
        assert!(kbd.was_modifier_active(0xE5));
        kbd.release(0xE5);
        assert!(kbd.was_modifier_active(0xE5));
        kbd.send_report();
        assert!(!kbd.was_modifier_active(0xE5));
    }
}
