//! Menu loop with rustyline.
//!
//! Interactive mode: banner, numbered options, prompt, history.
//! Pipe mode: read selections from stdin, one per line, no banner.

use std::io::{self, BufRead, Write};

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use syncscope_concurrency::{Dispatch, MenuChoice, ScenarioRunner};
use syncscope_core::{Error, Result};

/// Menu heading.
pub const BANNER: &str = "==== Real-Time Process Synchronization Analyzer ====";

/// Prompt shown before each selection.
pub const PROMPT: &str = "Enter your choice: ";

/// What the loop does after one line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    /// Show the menu again
    Continue,
    /// Report saved; leave the loop
    Exit,
}

/// Render the banner and the numbered options.
pub fn menu_text() -> String {
    let mut text = format!("\n{}\n", BANNER);
    for choice in MenuChoice::ALL {
        text.push_str(&format!("{}. {}\n", choice.key(), choice.label()));
    }
    text
}

/// Dispatch one line of input and print the user-visible result.
///
/// # Errors
///
/// Only a failed report write is returned; invalid selections are reported on
/// `out` and the loop continues.
pub fn handle_line(runner: &ScenarioRunner, line: &str, out: &mut dyn Write) -> Result<LoopControl> {
    match runner.dispatch(line) {
        Ok(Dispatch::Saved { path, .. }) => {
            writeln!(out, "\nReport saved to {}", path.display())?;
            Ok(LoopControl::Exit)
        }
        Ok(_) => Ok(LoopControl::Continue),
        Err(Error::InvalidChoice(_)) => {
            writeln!(out, "Invalid choice. Try again.")?;
            Ok(LoopControl::Continue)
        }
        Err(e) => Err(e),
    }
}

/// Run the interactive menu until the report is saved or input ends.
pub fn run_repl(runner: &ScenarioRunner) -> Result<()> {
    let mut rl = DefaultEditor::new().map_err(readline_error)?;

    loop {
        print!("{}", menu_text());
        io::stdout().flush()?;

        match rl.readline(PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = rl.add_history_entry(trimmed);
                }
                // Workers print through the console sink, so stdout must not
                // stay locked while a scenario runs.
                if handle_line(runner, trimmed, &mut io::stdout())? == LoopControl::Exit {
                    return Ok(());
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl-C: show the menu again
                continue;
            }
            Err(ReadlineError::Eof) => {
                tracing::warn!(target: "syncscope::cli", "Input closed before the report was saved");
                return Ok(());
            }
            Err(err) => return Err(readline_error(err)),
        }
    }
}

/// Run in pipe mode: read selections from `input`, one per line.
///
/// Blank lines and `#` comments are skipped. Returns when a report has been
/// saved or input ends.
pub fn run_pipe(runner: &ScenarioRunner, input: impl BufRead, out: &mut dyn Write) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if handle_line(runner, trimmed, out)? == LoopControl::Exit {
            return Ok(());
        }
    }
    tracing::warn!(target: "syncscope::cli", "Input closed before the report was saved");
    Ok(())
}

fn readline_error(err: ReadlineError) -> Error {
    match err {
        ReadlineError::Io(e) => Error::Io(e),
        other => Error::Io(io::Error::new(io::ErrorKind::Other, other.to_string())),
    }
}
