//! Virtual key matrix: state grid, name resolution, command parsing, and the
//! scan driver that turns input lines into keyswitch events.

pub mod command;
pub mod keymap;
mod scanner;
mod state;

pub use command::{parse_line, Mode, ScanCommand};
pub use keymap::resolve;
pub use scanner::{ScanDriver, ScanOutcome};
pub use state::{KeyMatrix, KeyState, MatrixCoord, COLS, ROWS};
