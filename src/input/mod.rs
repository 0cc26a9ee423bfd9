//! Scan-cycle input sources
//!
//! Supplies one line of text per scan cycle, either from a script file or
//! interactively from stdin. Interactive mode prints a prompt whose framing
//! depends on whether any virtual keys are currently held.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

/// Errors opening an input source.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("error opening input file \"{path}\": {source}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// A line-per-cycle input source.
pub struct InputSource {
    reader: Box<dyn BufRead>,
    interactive: bool,
    idle_prompt: String,
    held_prompt: String,
}

impl InputSource {
    /// Interactive source reading from stdin.
    pub fn interactive() -> Self {
        Self::from_reader(Box::new(BufReader::new(io::stdin())), true)
    }

    /// Script source reading from a file.
    pub fn from_script(path: &Path) -> Result<Self, InputError> {
        let file = File::open(path).map_err(|source| InputError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::from_reader(Box::new(BufReader::new(file)), false))
    }

    /// Source over an arbitrary reader. Useful for tests and custom
    /// embeddings.
    pub fn from_reader(reader: Box<dyn BufRead>, interactive: bool) -> Self {
        Self {
            reader,
            interactive,
            idle_prompt: "> ".to_string(),
            held_prompt: "+> ".to_string(),
        }
    }

    /// Override the interactive prompt strings.
    pub fn set_prompts(&mut self, idle: String, held: String) {
        self.idle_prompt = idle;
        self.held_prompt = held;
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Read one line for the next scan cycle.
    ///
    /// `any_held` selects the prompt framing in interactive mode. Returns
    /// `None` at end of input.
    pub fn next_line(&mut self, any_held: bool) -> io::Result<Option<String>> {
        if self.interactive {
            println!("Enter a command for this scan cycle, or ? or 'help' for help.");
            let prompt = if any_held {
                &self.held_prompt
            } else {
                &self.idle_prompt
            };
            print!("{prompt}");
            io::stdout().flush()?;
        }

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }
}

/// Print the full usage and command help.
pub fn print_help() {
    println!("Usage:\n");
    println!("(Running with no arguments or with the argument '?' will print this help message and quit.)\n");
    println!("This program expects a single argument, which is either:");
    println!("  1. An input file/script, with format given below, or");
    println!("  2. \"-i\", to run interactively, where you can interactively enter commands and see results.");
    println!("\nIn either case, for each scan cycle you will specify zero or more input 'commands', that is,");
    println!("  actions to take on the keys of the virtual keyboard.  Each line of the input file, or each");
    println!("  prompt (in interactive mode), represents one scan cycle; a blank line or empty prompt means");
    println!("  to do nothing to the inputs this scan cycle (held keys will still remain held, though).");
    println!("\nOutput, in terms of HID reports (packets sent to the host computer, for real hardware), is");
    println!("  printed to stdout as it happens.  A JSON session log of all emitted reports can be enabled");
    println!("  through the configuration file.");
    println!("\n--- Commands ---");
    println!("\n1. BASICS\n");
    println!("In any given scan cycle, you can 'tap' a virtual key simply by entering its name.");
    println!("To 'tap' multiple keys in one cycle, enter each of their names separated by a space.");
    println!("Keys are identified by their \"physical\" names, regardless of what the firmware keymap may");
    println!("  or may not be doing.  The physical name of a key is the (unshifted) text printed on the key");
    println!("  on the standard QWERTY Model 01.  As an exception, we distinguish physical keys with the");
    println!("  same text (ctrl, shift, and fn) with 'l' or 'r' indicating the hand.");
    println!("Here is a list of all the valid key names:");
    println!("  prog 1 2 3 4 5 led any 6 7 8 9 0 num ` q w e r t y u i o p = pgup a s d f g tab enter h j k l ; '");
    println!("  pgdn z x c v b esc fly n m , . / - lctrl bksp cmd lshift lfn rshift alt space rctrl rfn");
    println!("The comment character '#' instructs the program to ignore the rest of the line (either in the");
    println!("  script, or in interactive mode).");
    println!("\nExample script:");
    println!("  t             # first scan cycle: tap the physical T key");
    println!("  esc           # next scan cycle: tap the physical esc key");
    println!("                # take no action for a scan cycle");
    println!("  lshift e      # next: tap the lshift and e keys simultaneously");
    println!("  p q lfn fly   # next: tap the p, q, lfn, and fly keys simultaneously");
    println!("\n2. ADVANCED\n");
    println!("In addition to key names and the comment command '#', there are various other commands available.");
    println!("Key names are always in all lowercase (defined as symbols that appear in the unshifted positions");
    println!("  on the standard QWERTY Model 01); uppercase/shifted symbols denote commands.");
    println!("Commands can be inserted anywhere in the input line, and affect the handling of keys following.");
    println!("The default command, which we used above, is 'tap' (where the key is 'down' for just this cycle).");
    println!("'tap' can also be explicitly specified by 'T', as in \"T b\" to 'tap' the physical B key.");
    println!("You can hold virtual keys down using the 'D' (down) command.  The key will remain held until you");
    println!("  say otherwise. In interactive mode, while keys are held, the prompt changes from '>' to '+>'.");
    println!("You can release a previously held virtual key using the 'U' command.");
    println!("Commands affect all following keys within the line unless overridden. So, \"D lshift u\" holds");
    println!("  both lshift and u. To hold lshift and tap u, either enter \"D lshift T u\", or \"u D lshift\".");
    println!("An exception to the above rule is the command 'C', which releases all currently held keys.");
    println!("One final command, 'Q', will quit the program.  In non-interactive mode (i.e. with an input");
    println!("  script), the end of the script also implicitly indicates the end of the program.");
    println!("\nAdvanced script example:");
    println!("  h            # tap the physical H key");
    println!("  D lshift     # hold the physical lshift key down");
    println!("  c tab        # tap both c and tab (with lshift held)");
    println!("  D alt        # hold alt (in addition to lshift)");
    println!("  U lshift T e # Release lshift, and tap e in the same cycle");
    println!("               # Do nothing for a scan cycle (but keep alt held)");
    println!("  C            # Release all held keys (in this case, just alt)");
    println!("  enter D `    # Tap the physical enter key, and hold the ` key");
    println!("  fly          # Tap the fly key (with ` key held)");
    println!("  Q            # Quit the program");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn script_source(text: &str) -> InputSource {
        InputSource::from_reader(Box::new(Cursor::new(text.to_string())), false)
    }

    #[test]
    fn reads_lines_in_order_then_signals_end() {
        let mut source = script_source("a b\n\nD lshift\n");
        assert_eq!(source.next_line(false).unwrap().as_deref(), Some("a b"));
        assert_eq!(source.next_line(false).unwrap().as_deref(), Some(""));
        assert_eq!(
            source.next_line(false).unwrap().as_deref(),
            Some("D lshift")
        );
        assert_eq!(source.next_line(false).unwrap(), None);
    }

    #[test]
    fn strips_carriage_returns() {
        let mut source = script_source("a\r\n");
        assert_eq!(source.next_line(false).unwrap().as_deref(), Some("a"));
    }

    #[test]
    fn last_line_without_newline_is_delivered() {
        let mut source = script_source("enter");
        assert_eq!(source.next_line(false).unwrap().as_deref(), Some("enter"));
        assert_eq!(source.next_line(false).unwrap(), None);
    }

    #[test]
    fn script_sources_are_not_interactive() {
        assert!(!script_source("").is_interactive());
    }

    #[test]
    fn missing_script_file_is_an_open_error() {
        let err = InputSource::from_script(Path::new("/nonexistent/script.kbd"));
        assert!(matches!(err, Err(InputError::Open { .. })));
    }
}
