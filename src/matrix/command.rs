//! Scan-cycle command parsing
//!
//! Each input line describes one scan cycle. A line is a sequence of
//! space-separated tokens: lowercase key names, and uppercase control
//! commands that change how following key names are applied.

use super::{keymap, KeyState, MatrixCoord};

/// How key-name tokens are applied to the matrix.
///
/// Mode is line-scoped and resets to `Tap` at the start of every line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Press and release within this cycle (`T`, the default).
    #[default]
    Tap,
    /// Hold down until released (`D`).
    Down,
    /// Release a held key (`U`).
    Up,
}

impl Mode {
    /// The key state a key-name token produces under this mode.
    fn key_state(self) -> KeyState {
        match self {
            Mode::Tap => KeyState::Tap,
            Mode::Down => KeyState::Pressed,
            Mode::Up => KeyState::NotPressed,
        }
    }
}

/// One parsed effect, applied to the matrix in line order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanCommand {
    /// Set a cell's state (key name resolved, mode already applied).
    Key(MatrixCoord, KeyState),
    /// Release every key (`C`).
    ClearAll,
    /// Show the command help (`?`/`help`, interactive input only).
    Help,
    /// Terminate the simulation (`Q`); the rest of the line is discarded.
    Quit,
    /// Token that resolved to nothing; reported as a warning, parsing
    /// continues.
    Unknown(String),
}

/// Parse one line of input into an ordered command sequence.
///
/// Tokens are split strictly on single spaces, so doubled spaces produce
/// empty tokens that end the line, exactly like the hardware protocol. `#`
/// discards the remainder of the line. `?`/`help` are recognized only when
/// the input source is interactive; in script mode they fall through to key
/// name resolution and come back as [`ScanCommand::Unknown`].
pub fn parse_line(line: &str, interactive: bool) -> Vec<ScanCommand> {
    let mut commands = Vec::new();
    let mut mode = Mode::default();

    for token in line.split(' ') {
        match token {
            "" => break,
            "#" => break,
            "?" | "help" if interactive => commands.push(ScanCommand::Help),
            "Q" => {
                commands.push(ScanCommand::Quit);
                break;
            }
            "T" => mode = Mode::Tap,
            "D" => mode = Mode::Down,
            "U" => mode = Mode::Up,
            "C" => commands.push(ScanCommand::ClearAll),
            name => {
                let coord = keymap::resolve(name);
                if coord.in_bounds() {
                    commands.push(ScanCommand::Key(coord, mode.key_state()));
                } else {
                    commands.push(ScanCommand::Unknown(name.to_string()));
                }
            }
        }
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str, state: KeyState) -> ScanCommand {
        ScanCommand::Key(keymap::resolve(name), state)
    }

    #[test]
    fn empty_line_parses_to_nothing() {
        assert!(parse_line("", false).is_empty());
    }

    #[test]
    fn default_mode_is_tap() {
        assert_eq!(parse_line("a", false), vec![key("a", KeyState::Tap)]);
    }

    #[test]
    fn mode_applies_to_following_tokens() {
        assert_eq!(
            parse_line("D lshift u", false),
            vec![
                key("lshift", KeyState::Pressed),
                key("u", KeyState::Pressed),
            ]
        );
    }

    #[test]
    fn mode_can_change_mid_line() {
        assert_eq!(
            parse_line("U lshift T e", false),
            vec![
                key("lshift", KeyState::NotPressed),
                key("e", KeyState::Tap),
            ]
        );
    }

    #[test]
    fn explicit_tap_mode() {
        assert_eq!(
            parse_line("D lshift T u", false),
            vec![key("lshift", KeyState::Pressed), key("u", KeyState::Tap)]
        );
    }

    #[test]
    fn comment_discards_rest_of_line() {
        assert_eq!(
            parse_line("a # b c", false),
            vec![key("a", KeyState::Tap)]
        );
    }

    #[test]
    fn quit_discards_rest_of_line() {
        assert_eq!(
            parse_line("a Q b", false),
            vec![key("a", KeyState::Tap), ScanCommand::Quit]
        );
    }

    #[test]
    fn clear_command() {
        assert_eq!(
            parse_line("C enter", false),
            vec![ScanCommand::ClearAll, key("enter", KeyState::Tap)]
        );
    }

    #[test]
    fn unknown_token_is_reported_not_dropped() {
        assert_eq!(
            parse_line("xyz a", false),
            vec![
                ScanCommand::Unknown("xyz".to_string()),
                key("a", KeyState::Tap),
            ]
        );
    }

    #[test]
    fn help_only_in_interactive_mode() {
        assert_eq!(parse_line("?", true), vec![ScanCommand::Help]);
        assert_eq!(parse_line("help", true), vec![ScanCommand::Help]);
        // Script mode: both fall through to the resolver and warn.
        assert_eq!(
            parse_line("?", false),
            vec![ScanCommand::Unknown("?".to_string())]
        );
        assert_eq!(
            parse_line("help", false),
            vec![ScanCommand::Unknown("help".to_string())]
        );
    }

    #[test]
    fn doubled_space_ends_the_line() {
        // Strict single-space splitting: the empty token terminates parsing.
        assert_eq!(
            parse_line("a  b", false),
            vec![key("a", KeyState::Tap)]
        );
    }

    #[test]
    fn key_names_are_case_sensitive() {
        // Uppercase letters are commands, not key names.
        assert_eq!(
            parse_line("A", false),
            vec![ScanCommand::Unknown("A".to_string())]
        );
    }
}
