//! Terminal retention: hold the session open until the user acknowledges.
//!
//! On an interactive terminal any key press counts; raw mode is used so the
//! key does not need to be followed by Enter. When stdin is not a terminal a
//! single line (or end of input) counts instead.

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use crossterm::terminal;
use std::io::{self, BufRead, IsTerminal, Write};

use crate::error::LaunchError;

/// Prompt printed before waiting.
pub const PAUSE_PROMPT: &str = "Press any key to continue . . . ";

/// How the user released the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acknowledgment {
    KeyPress,
    Line,
    EndOfInput,
}

/// Source of the final acknowledgment.
pub trait Acknowledger {
    /// Block until the user acknowledges.
    fn wait_for_acknowledgment(&mut self) -> Result<Acknowledgment, LaunchError>;
}

/// Reads the acknowledgment from the controlling terminal (or stdin).
#[derive(Debug, Clone)]
pub struct TerminalAcknowledger {
    prompt: String,
}

impl Default for TerminalAcknowledger {
    fn default() -> Self {
        Self::new(PAUSE_PROMPT)
    }
}

impl TerminalAcknowledger {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

impl Acknowledger for TerminalAcknowledger {
    fn wait_for_acknowledgment(&mut self) -> Result<Acknowledgment, LaunchError> {
        let mut stderr = io::stderr();
        write!(stderr, "{}", self.prompt).map_err(LaunchError::Terminal)?;
        stderr.flush().map_err(LaunchError::Terminal)?;

        let ack = if io::stdin().is_terminal() {
            wait_for_key()
        } else {
            wait_for_line(&mut io::stdin().lock())
        }
        .map_err(LaunchError::Terminal)?;

        // Raw mode swallowed the newline; keep later output off the prompt row.
        if ack == Acknowledgment::KeyPress {
            let _ = writeln!(stderr);
        }
        tracing::debug!(?ack, "session acknowledged");
        Ok(ack)
    }
}

fn wait_for_key() -> io::Result<Acknowledgment> {
    let _raw = RawModeGuard::acquire()?;
    loop {
        if let Event::Key(key) = event::read()? {
            if is_acknowledging_key(&key) {
                return Ok(Acknowledgment::KeyPress);
            }
        }
    }
}

/// Only presses count; release/repeat events (reported on Windows) do not.
pub(crate) fn is_acknowledging_key(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
}

pub(crate) fn wait_for_line(input: &mut impl BufRead) -> io::Result<Acknowledgment> {
    let mut line = String::new();
    match input.read_line(&mut line)? {
        0 => Ok(Acknowledgment::EndOfInput),
        _ => Ok(Acknowledgment::Line),
    }
}

/// Raw mode lifetime guard so terminal state is restored on any return path.
struct RawModeGuard;

impl RawModeGuard {
    fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}
