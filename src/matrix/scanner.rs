//! Matrix scan driver
//!
//! Executes one scan cycle in two phases: the input phase applies one parsed
//! line of commands to the matrix, and the event phase diffs the matrix
//! against the previous cycle's snapshot and delivers keyswitch events to
//! the firmware handler.

use super::command::{parse_line, ScanCommand};
use super::{KeyMatrix, KeyState, MatrixCoord, COLS, ROWS};
use crate::firmware::{KeyswitchEvent, KeyswitchHandler};
use crate::input::{self, InputSource};
use log::{error, warn};
use std::io;

/// How a scan cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Cycle completed; keep scanning.
    Continue,
    /// Explicit quit command; terminate successfully.
    Quit,
    /// Input source is exhausted; terminate successfully.
    EndOfInput,
}

/// Drives the key matrix through scan cycles.
pub struct ScanDriver {
    matrix: KeyMatrix,
}

impl ScanDriver {
    pub fn new() -> Self {
        Self {
            matrix: KeyMatrix::new(),
        }
    }

    pub fn matrix(&self) -> &KeyMatrix {
        &self.matrix
    }

    pub fn matrix_mut(&mut self) -> &mut KeyMatrix {
        &mut self.matrix
    }

    /// Run one full scan cycle: read and apply one line of input, then
    /// deliver the resulting keyswitch events.
    ///
    /// On `Quit` and `EndOfInput` the event phase is skipped, matching the
    /// immediate-exit behavior of the quit command.
    pub fn scan_cycle(
        &mut self,
        input: &mut InputSource,
        handler: &mut dyn KeyswitchHandler,
    ) -> io::Result<ScanOutcome> {
        match self.read_matrix(input)? {
            ScanOutcome::Continue => {}
            other => return Ok(other),
        }
        self.act_on_matrix_scan(handler);
        Ok(ScanOutcome::Continue)
    }

    /// Input phase: obtain one line (blocking) and apply its commands to the
    /// matrix in order. Later tokens override earlier ones on the same cell.
    pub fn read_matrix(&mut self, input: &mut InputSource) -> io::Result<ScanOutcome> {
        let any_held = self.matrix.any_held();
        let Some(line) = input.next_line(any_held)? else {
            return Ok(ScanOutcome::EndOfInput);
        };

        for command in parse_line(&line, input.is_interactive()) {
            match command {
                ScanCommand::Key(coord, state) => self.matrix.set(coord, state),
                ScanCommand::ClearAll => self.matrix.clear(),
                ScanCommand::Help => input::print_help(),
                ScanCommand::Quit => return Ok(ScanOutcome::Quit),
                ScanCommand::Unknown(token) => {
                    println!("Unrecognized command: {token}");
                    warn!("unrecognized input token: {token:?}");
                }
            }
        }
        Ok(ScanOutcome::Continue)
    }

    /// Event phase: diff every cell against the previous snapshot and
    /// deliver one event per cell, collapsing `Tap` into an immediate
    /// press-then-release pair within this cycle.
    pub fn act_on_matrix_scan(&mut self, handler: &mut dyn KeyswitchHandler) {
        for row in 0..ROWS as u8 {
            for col in 0..COLS as u8 {
                let coord = MatrixCoord::new(row, col);
                let previous = self.matrix.previous(coord);
                let current = self.matrix.state(coord);

                if previous == KeyState::Tap {
                    // Invariant violation: Tap must never survive a cycle.
                    // Proceed best-effort, treating it as not pressed.
                    error!("previous state for ({row},{col}) recorded as Tap");
                }
                let was_pressed = previous == KeyState::Pressed;
                let is_pressed = matches!(current, KeyState::Pressed | KeyState::Tap);

                handler.handle_keyswitch_event(KeyswitchEvent {
                    coord,
                    was_pressed,
                    is_pressed,
                });
                self.matrix.set_previous(coord, current);

                if current == KeyState::Tap {
                    handler.handle_keyswitch_event(KeyswitchEvent {
                        coord,
                        was_pressed: true,
                        is_pressed: false,
                    });
                    self.matrix.set(coord, KeyState::NotPressed);
                    self.matrix.set_previous(coord, KeyState::NotPressed);
                }
            }
        }
    }
}

impl Default for ScanDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Records every delivered event for assertions.
    #[derive(Default)]
    struct RecordingHandler {
        events: Vec<KeyswitchEvent>,
    }

    impl KeyswitchHandler for RecordingHandler {
        fn handle_keyswitch_event(&mut self, event: KeyswitchEvent) {
            self.events.push(event);
        }
    }

    impl RecordingHandler {
        /// Events other than idle (not pressed, was not pressed) cells.
        fn transitions(&self) -> Vec<&KeyswitchEvent> {
            self.events
                .iter()
                .filter(|e| e.was_pressed || e.is_pressed)
                .collect()
        }
    }

    fn script(text: &str) -> InputSource {
        InputSource::from_reader(Box::new(Cursor::new(text.to_string())), false)
    }

    fn run_cycle(driver: &mut ScanDriver, line: &str) -> Vec<KeyswitchEvent> {
        let mut input = script(&format!("{line}\n"));
        let mut handler = RecordingHandler::default();
        assert_eq!(
            driver.scan_cycle(&mut input, &mut handler).unwrap(),
            ScanOutcome::Continue
        );
        handler.events
    }

    #[test]
    fn every_cell_gets_exactly_one_event_when_idle() {
        let mut driver = ScanDriver::new();
        let events = run_cycle(&mut driver, "");
        assert_eq!(events.len(), ROWS * COLS);
        assert!(events.iter().all(|e| !e.was_pressed && !e.is_pressed));
    }

    #[test]
    fn tap_yields_press_then_release_in_one_cycle() {
        let mut driver = ScanDriver::new();
        let events = run_cycle(&mut driver, "a");
        let a = crate::matrix::keymap::resolve("a");

        let a_events: Vec<_> = events.iter().filter(|e| e.coord == a).collect();
        assert_eq!(a_events.len(), 2);
        assert!(!a_events[0].was_pressed && a_events[0].is_pressed);
        assert!(a_events[1].was_pressed && !a_events[1].is_pressed);

        // Nothing persists past the cycle.
        assert_eq!(driver.matrix().state(a), KeyState::NotPressed);
        assert_eq!(driver.matrix().previous(a), KeyState::NotPressed);
    }

    #[test]
    fn held_key_stays_pressed_across_cycles() {
        let mut driver = ScanDriver::new();
        let lshift = crate::matrix::keymap::resolve("lshift");

        let events = run_cycle(&mut driver, "D lshift");
        let press: Vec<_> = events.iter().filter(|e| e.coord == lshift).collect();
        assert_eq!(press.len(), 1);
        assert!(!press[0].was_pressed && press[0].is_pressed);

        // Blank line: key remains held, reported as was+is pressed.
        let events = run_cycle(&mut driver, "");
        let held: Vec<_> = events.iter().filter(|e| e.coord == lshift).collect();
        assert_eq!(held.len(), 1);
        assert!(held[0].was_pressed && held[0].is_pressed);
        assert!(driver.matrix().any_held());
    }

    #[test]
    fn release_command_produces_release_event() {
        let mut driver = ScanDriver::new();
        let lshift = crate::matrix::keymap::resolve("lshift");
        run_cycle(&mut driver, "D lshift");

        let events = run_cycle(&mut driver, "U lshift");
        let released: Vec<_> = events.iter().filter(|e| e.coord == lshift).collect();
        assert_eq!(released.len(), 1);
        assert!(released[0].was_pressed && !released[0].is_pressed);
        assert!(!driver.matrix().any_held());
    }

    #[test]
    fn clear_releases_all_held_keys() {
        let mut driver = ScanDriver::new();
        run_cycle(&mut driver, "D lshift alt");
        assert!(driver.matrix().any_held());

        let mut handler = RecordingHandler::default();
        let mut input = script("C\n");
        driver.scan_cycle(&mut input, &mut handler).unwrap();
        assert!(!driver.matrix().any_held());
        // Both cells report was-pressed without is-pressed.
        assert_eq!(handler.transitions().len(), 2);
        assert!(handler
            .transitions()
            .iter()
            .all(|e| e.was_pressed && !e.is_pressed));
    }

    #[test]
    fn tap_while_another_key_is_held() {
        let mut driver = ScanDriver::new();
        let lshift = crate::matrix::keymap::resolve("lshift");
        let c = crate::matrix::keymap::resolve("c");
        run_cycle(&mut driver, "D lshift");

        let events = run_cycle(&mut driver, "c");
        let shift_events: Vec<_> = events.iter().filter(|e| e.coord == lshift).collect();
        let c_events: Vec<_> = events.iter().filter(|e| e.coord == c).collect();
        assert!(shift_events[0].was_pressed && shift_events[0].is_pressed);
        assert_eq!(c_events.len(), 2);
    }

    #[test]
    fn unrecognized_token_leaves_matrix_unchanged() {
        let mut driver = ScanDriver::new();
        let events = run_cycle(&mut driver, "xyz");
        assert!(events.iter().all(|e| !e.was_pressed && !e.is_pressed));
        assert!(!driver.matrix().any_held());
    }

    #[test]
    fn quit_skips_the_event_phase() {
        let mut driver = ScanDriver::new();
        let mut input = script("a Q\n");
        let mut handler = RecordingHandler::default();
        assert_eq!(
            driver.scan_cycle(&mut input, &mut handler).unwrap(),
            ScanOutcome::Quit
        );
        assert!(handler.events.is_empty());
    }

    #[test]
    fn end_of_input_is_reported() {
        let mut driver = ScanDriver::new();
        let mut input = script("");
        let mut handler = RecordingHandler::default();
        assert_eq!(
            driver.scan_cycle(&mut input, &mut handler).unwrap(),
            ScanOutcome::EndOfInput
        );
    }

    #[test]
    fn stale_tap_in_snapshot_is_treated_as_not_pressed() {
        let mut driver = ScanDriver::new();
        let a = crate::matrix::keymap::resolve("a");
        // Corrupt the snapshot directly; normal cycles never leave Tap there.
        driver.matrix_mut().set_previous(a, KeyState::Tap);

        let mut handler = RecordingHandler::default();
        driver.act_on_matrix_scan(&mut handler);

        let a_events: Vec<_> = handler.events.iter().filter(|e| e.coord == a).collect();
        assert_eq!(a_events.len(), 1);
        assert!(!a_events[0].was_pressed && !a_events[0].is_pressed);

        // Cycle completed best-effort and the snapshot is repaired.
        assert_eq!(handler.events.len(), ROWS * COLS);
        assert_eq!(driver.matrix().previous(a), KeyState::NotPressed);
    }

    #[test]
    fn later_tokens_override_earlier_ones_on_the_same_cell() {
        let mut driver = ScanDriver::new();
        let a = crate::matrix::keymap::resolve("a");
        // Hold a, then release it within the same line: net effect released.
        let events = run_cycle(&mut driver, "D a U a");
        let a_events: Vec<_> = events.iter().filter(|e| e.coord == a).collect();
        assert_eq!(a_events.len(), 1);
        assert!(!a_events[0].is_pressed);
    }
}
