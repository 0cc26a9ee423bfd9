//! Physical key name to matrix coordinate mapping
//!
//! Key names are the (unshifted) legends of the standard QWERTY Model 01,
//! with `l`/`r` prefixes distinguishing the paired ctrl/shift/fn keys. The
//! `esc` and `fly` names are virtual: they live in otherwise-unused cells of
//! rows 2.

use super::MatrixCoord;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Static table mapping each physical key name to its matrix coordinate.
pub static KEY_TABLE: LazyLock<HashMap<&'static str, MatrixCoord>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    let mut add = |name: &'static str, row: u8, col: u8| {
        map.insert(name, MatrixCoord::new(row, col));
    };

    // Row 0: number row plus prog/led/any/num and the outer ctrl keys
    add("prog", 0, 0);
    add("1", 0, 1);
    add("2", 0, 2);
    add("3", 0, 3);
    add("4", 0, 4);
    add("5", 0, 5);
    add("led", 0, 6);
    add("lctrl", 0, 7);
    add("rctrl", 0, 8);
    add("any", 0, 9);
    add("6", 0, 10);
    add("7", 0, 11);
    add("8", 0, 12);
    add("9", 0, 13);
    add("0", 0, 14);
    add("num", 0, 15);

    // Row 1: top letter row
    add("`", 1, 0);
    add("q", 1, 1);
    add("w", 1, 2);
    add("e", 1, 3);
    add("r", 1, 4);
    add("t", 1, 5);
    add("tab", 1, 6);
    add("bksp", 1, 7);
    add("space", 1, 8);
    add("enter", 1, 9);
    add("y", 1, 10);
    add("u", 1, 11);
    add("i", 1, 12);
    add("o", 1, 13);
    add("p", 1, 14);
    add("=", 1, 15);

    // Row 2: home row, with the virtual esc/fly cells
    add("pgup", 2, 0);
    add("a", 2, 1);
    add("s", 2, 2);
    add("d", 2, 3);
    add("f", 2, 4);
    add("g", 2, 5);
    add("esc", 2, 6);
    add("cmd", 2, 7);
    add("alt", 2, 8);
    add("fly", 2, 9);
    add("h", 2, 10);
    add("j", 2, 11);
    add("k", 2, 12);
    add("l", 2, 13);
    add(";", 2, 14);
    add("'", 2, 15);

    // Row 3: bottom letter row plus thumb/fn keys
    add("pgdn", 3, 0);
    add("z", 3, 1);
    add("x", 3, 2);
    add("c", 3, 3);
    add("v", 3, 4);
    add("b", 3, 5);
    add("lfn", 3, 6);
    add("lshift", 3, 7);
    add("rshift", 3, 8);
    add("rfn", 3, 9);
    add("n", 3, 10);
    add("m", 3, 11);
    add(",", 3, 12);
    add(".", 3, 13);
    add("/", 3, 14);
    add("-", 3, 15);

    map
});

/// Resolve a physical key name to its matrix coordinate.
///
/// Unknown names return [`MatrixCoord::OUT_OF_BOUNDS`]; callers are
/// responsible for bounds-checking the sentinel.
pub fn resolve(name: &str) -> MatrixCoord {
    KEY_TABLE
        .get(name)
        .copied()
        .unwrap_or(MatrixCoord::OUT_OF_BOUNDS)
}
