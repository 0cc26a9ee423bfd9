//! Virtual absolute-positioning mouse.
//!
//! The operations are part of the firmware-facing contract but are
//! intentionally inert: no state is tracked and no reports are emitted.
//! This mirrors the hardware stub; it is a placeholder, not a bug.

/// Absolute-positioning mouse stub.
#[derive(Default)]
pub struct SingleAbsoluteMouse;

impl SingleAbsoluteMouse {
    pub fn new() -> Self {
        Self
    }

    /// Relative movement. Stub: no effect.
    pub fn mouse_move(&mut self, _x: i8, _y: i8, _wheel: i8) {}

    /// Absolute positioning. Stub: no effect.
    pub fn move_to(&mut self, _x: u16, _y: u16, _wheel: i8) {}

    /// Stub: no effect.
    pub fn click(&mut self, _buttons: u8) {}

    /// Stub: no effect.
    pub fn press(&mut self, _buttons: u8) {}

    /// Stub: no effect.
    pub fn release(&mut self, _buttons: u8) {}
}
