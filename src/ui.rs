//! Status lines written to stderr.
//!
//! `RenderSink` is what the launcher pipeline talks to; `Renderer` is the
//! terminal implementation. Child output never passes through here.

use crossterm::style::{Color, Stylize};

const GLYPH_STEP: &str = "•";
const LABEL_WARNING: &str = "warning:";
const LABEL_ERROR: &str = "error:";
const INDENT: &str = "  ";

/// Injectable rendering interface used by the launcher pipeline.
pub trait RenderSink: Send + Sync {
    /// A step is starting.
    fn step(&self, text: &str);
    /// One key/value detail under the current step.
    fn field(&self, key: &str, value: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
}

/// Default stderr renderer.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl RenderSink for Renderer {
    fn step(&self, text: &str) {
        if self.color {
            eprintln!(
                "{} {}",
                GLYPH_STEP.with(Color::DarkGrey),
                text.with(Color::White).bold()
            );
        } else {
            eprintln!("{GLYPH_STEP} {text}");
        }
    }

    fn field(&self, key: &str, value: &str) {
        if self.color {
            eprintln!(
                "{INDENT}{} {}",
                format!("{key}:").with(Color::DarkGrey),
                value.with(Color::Grey)
            );
        } else {
            eprintln!("{INDENT}{key}: {value}");
        }
    }

    fn warn(&self, msg: &str) {
        if self.color {
            eprintln!("{} {msg}", LABEL_WARNING.with(Color::Yellow).bold());
        } else {
            eprintln!("{LABEL_WARNING} {msg}");
        }
    }

    fn error(&self, msg: &str) {
        if self.color {
            eprintln!("{} {msg}", LABEL_ERROR.with(Color::Red).bold());
        } else {
            eprintln!("{LABEL_ERROR} {msg}");
        }
    }
}
