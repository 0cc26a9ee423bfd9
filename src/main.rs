//! Keyboard SimKit - Virtual key-matrix and HID report simulator
//!
//! One argument selects the input: a script file path, or `-i` for
//! interactive mode. Each input line is one scan cycle.

use anyhow::{Context, Result};
use keyboard_simkit::config::Config;
use keyboard_simkit::firmware::DemoFirmware;
use keyboard_simkit::input::{self, InputSource};
use keyboard_simkit::matrix::{ScanDriver, ScanOutcome};
use keyboard_simkit::report::SessionLog;
use log::warn;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.as_slice() {
        [] => {
            input::print_help();
            ExitCode::FAILURE
        }
        [arg] if arg == "?" => {
            input::print_help();
            ExitCode::FAILURE
        }
        [arg] => {
            let source = if arg == "-i" {
                Ok(InputSource::interactive())
            } else {
                InputSource::from_script(Path::new(arg))
            };
            let mut source = match source {
                Ok(source) => source,
                Err(e) => {
                    eprintln!("Error: {e}");
                    return ExitCode::FAILURE;
                }
            };
            let config = Config::load().unwrap_or_else(|e| {
                warn!("failed to load config, using defaults: {e}");
                Config::default()
            });
            match run(&mut source, &config) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {e:#}");
                    ExitCode::FAILURE
                }
            }
        }
        _ => {
            eprintln!("Error: more arguments than expected (got {})", args.len());
            ExitCode::FAILURE
        }
    }
}

/// The scan loop: one input line per cycle until quit or end of input.
fn run(source: &mut InputSource, config: &Config) -> Result<()> {
    source.set_prompts(config.prompt.idle.clone(), config.prompt.held.clone());

    let mut driver = ScanDriver::new();
    let mut firmware = DemoFirmware::new();
    let mut session = SessionLog::new();

    let mut cycle: u64 = 0;
    let mut scan_error = None;
    loop {
        if config.output.echo_cycles {
            println!("Starting cycle {cycle}");
        }
        session.set_cycles(cycle + 1);

        let outcome = match driver.scan_cycle(source, &mut firmware) {
            Ok(outcome) => outcome,
            Err(e) => {
                scan_error = Some(anyhow::Error::new(e).context("reading input"));
                break;
            }
        };

        for report in firmware.take_emitted() {
            println!("Sent virtual HID report. Pressed keys: {report}");
            session.record_keyboard(cycle, &report);
        }

        match outcome {
            ScanOutcome::Continue => cycle += 1,
            ScanOutcome::Quit | ScanOutcome::EndOfInput => break,
        }
    }

    // Export even after an input failure so the partial session survives.
    if let Some(path) = &config.output.report_log {
        let exported = session
            .export_json(path)
            .with_context(|| format!("writing session log to {}", path.display()));
        match exported {
            Ok(()) => {}
            Err(e) if scan_error.is_some() => warn!("{e:#}"),
            Err(e) => return Err(e),
        }
    }

    match scan_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
