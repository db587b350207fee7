//! CLI argument parsing via clap.
//!
//! The launcher takes no options. Whatever is passed (including `--help`)
//! is collected and ignored so that a double-click, a shortcut with stray
//! arguments, and a bare invocation all behave the same.

use clap::Parser;
use std::ffi::OsString;

/// Prepare the launcher directory, install dependencies, run the app, and
/// wait for a key press before closing.
#[derive(Debug, Parser)]
#[command(
    name = "runway",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Args {
    /// Ignored. Kept as `OsString` so arguments that are not valid UTF-8
    /// are ignored too instead of failing the parse.
    #[arg(
        hide = true,
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_parser = clap::value_parser!(OsString)
    )]
    pub ignored: Vec<OsString>,
}
