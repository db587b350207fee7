//! Runway: a bootstrap launcher.
//!
//! Runway anchors itself to the directory holding its executable, optionally
//! activates a virtual environment, installs the declared dependencies,
//! starts the target application with the terminal's own streams, and keeps
//! the terminal open until the user presses a key.
//!
//! # Quick start
//!
//! ```no_run
//! use runway::config::load_config;
//! use runway::launcher::Launcher;
//! use runway::process::InheritedStdioRunner;
//! use runway::retention::TerminalAcknowledger;
//! use runway::ui::Renderer;
//! use runway::workdir::locate_base_dir;
//!
//! # async fn example() -> Result<(), runway::error::LaunchError> {
//! let base = locate_base_dir(|name| std::env::var(name).ok())?;
//! let loaded = load_config(base.path())?;
//! let renderer = Renderer::new(loaded.config.display.color);
//! let launcher = Launcher::new(loaded.config, base, InheritedStdioRunner, renderer);
//! let report = launcher.run(&mut TerminalAcknowledger::default()).await?;
//! println!("{} steps ran", report.steps.len());
//! # Ok(())
//! # }
//! ```

pub mod build_info;
pub mod config;
pub mod entry;
pub mod environment;
pub mod error;
pub mod launcher;
pub mod logging;
pub mod preflight;
pub mod process;
pub mod retention;
#[cfg(test)]
pub mod testsupport;
pub mod ui;
pub mod workdir;
