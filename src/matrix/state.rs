//! Key matrix state tracking
//!
//! Holds the per-cell key states for the current scan cycle, the snapshot of
//! the previous cycle (used to compute was-pressed/is-pressed transitions),
//! and an independent mask grid that firmware can use to suppress event
//! handling per coordinate.

/// Number of matrix rows.
pub const ROWS: usize = 4;
/// Number of matrix columns.
pub const COLS: usize = 16;

/// State of a single matrix cell.
///
/// `Tap` is transient: it is valid for exactly one scan cycle and must never
/// appear in the previous-cycle snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyState {
    /// Key is up.
    #[default]
    NotPressed,
    /// Key is held down.
    Pressed,
    /// Key is pressed and released within this scan cycle.
    Tap,
}

/// A (row, column) position in the key matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatrixCoord {
    pub row: u8,
    pub col: u8,
}

impl MatrixCoord {
    /// Sentinel returned by the key name resolver for unknown names.
    pub const OUT_OF_BOUNDS: MatrixCoord = MatrixCoord { row: 255, col: 255 };

    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Whether this coordinate addresses a real matrix cell.
    pub fn in_bounds(&self) -> bool {
        (self.row as usize) < ROWS && (self.col as usize) < COLS
    }
}

/// The full key matrix: current states, previous-cycle snapshot, mask grid.
pub struct KeyMatrix {
    current: [[KeyState; COLS]; ROWS],
    previous: [[KeyState; COLS]; ROWS],
    mask: [[bool; COLS]; ROWS],
}

impl KeyMatrix {
    pub fn new() -> Self {
        Self {
            current: [[KeyState::NotPressed; COLS]; ROWS],
            previous: [[KeyState::NotPressed; COLS]; ROWS],
            mask: [[false; COLS]; ROWS],
        }
    }

    /// Current state of a cell. Out-of-range coordinates read as NotPressed.
    pub fn state(&self, coord: MatrixCoord) -> KeyState {
        if coord.in_bounds() {
            self.current[coord.row as usize][coord.col as usize]
        } else {
            KeyState::NotPressed
        }
    }

    /// Previous-cycle state of a cell. Out-of-range reads as NotPressed.
    pub fn previous(&self, coord: MatrixCoord) -> KeyState {
        if coord.in_bounds() {
            self.previous[coord.row as usize][coord.col as usize]
        } else {
            KeyState::NotPressed
        }
    }

    /// Set the current state of a cell. Out-of-range coordinates (including
    /// the resolver sentinel) are silently ignored.
    pub fn set(&mut self, coord: MatrixCoord, state: KeyState) {
        if coord.in_bounds() {
            self.current[coord.row as usize][coord.col as usize] = state;
        }
    }

    pub(crate) fn set_previous(&mut self, coord: MatrixCoord, state: KeyState) {
        if coord.in_bounds() {
            self.previous[coord.row as usize][coord.col as usize] = state;
        }
    }

    /// Whether any cell is currently held down.
    ///
    /// Cells in the `Tap` state do not count: the prompt framing in
    /// interactive mode only cares about keys that persist across cycles.
    pub fn any_held(&self) -> bool {
        self.current
            .iter()
            .flatten()
            .any(|&s| s == KeyState::Pressed)
    }

    /// Set every cell to NotPressed (the `C` command).
    pub fn clear(&mut self) {
        self.current = [[KeyState::NotPressed; COLS]; ROWS];
    }

    /// Mark a coordinate as masked. No-op out of range.
    pub fn mask_key(&mut self, coord: MatrixCoord) {
        if coord.in_bounds() {
            self.mask[coord.row as usize][coord.col as usize] = true;
        }
    }

    /// Clear the mask for a coordinate. No-op out of range.
    pub fn unmask_key(&mut self, coord: MatrixCoord) {
        if coord.in_bounds() {
            self.mask[coord.row as usize][coord.col as usize] = false;
        }
    }

    /// Whether a coordinate is masked. Out-of-range coordinates are never
    /// masked.
    pub fn is_key_masked(&self, coord: MatrixCoord) -> bool {
        if coord.in_bounds() {
            self.mask[coord.row as usize][coord.col as usize]
        } else {
            false
        }
    }

    /// Mask exactly the keys that are currently held, unmasking the rest.
    pub fn mask_held_keys(&mut self) {
        for row in 0..ROWS {
            for col in 0..COLS {
                self.mask[row][col] = self.current[row][col] == KeyState::Pressed;
            }
        }
    }
}

impl Default for KeyMatrix {
    fn default() -> Self {
        Self::new()
    }
}
