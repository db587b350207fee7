//! Unified error types for the launcher.

use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// LaunchError (top-level)
// ---------------------------------------------------------------------------

/// Top-level error type for the bootstrap sequence.
#[derive(Debug)]
pub enum LaunchError {
    /// The base directory could not be resolved, read, or entered.
    Directory {
        path: Option<PathBuf>,
        reason: String,
    },
    Config(ConfigError),
    /// Environment activation was enabled but could not be applied.
    Activation(String),
    /// A child process could not be started.
    Spawn {
        program: String,
        source: std::io::Error,
    },
    /// Waiting on a started child process failed.
    Wait {
        program: String,
        source: std::io::Error,
    },
    /// Reading the acknowledgment from the terminal failed.
    Terminal(std::io::Error),
}

impl LaunchError {
    pub(crate) fn directory(path: Option<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Directory {
            path,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory {
                path: Some(path),
                reason,
            } => write!(f, "working directory `{}`: {reason}", path.display()),
            Self::Directory { path: None, reason } => write!(f, "working directory: {reason}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Activation(msg) => write!(f, "activation: {msg}"),
            Self::Spawn { program, source } => write!(f, "failed to start `{program}`: {source}"),
            Self::Wait { program, source } => {
                write!(f, "failed waiting for `{program}`: {source}")
            }
            Self::Terminal(e) => write!(f, "terminal: {e}"),
        }
    }
}

impl std::error::Error for LaunchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Spawn { source, .. } | Self::Wait { source, .. } => Some(source),
            Self::Terminal(e) => Some(e),
            Self::Directory { .. } | Self::Activation(_) => None,
        }
    }
}

impl From<ConfigError> for LaunchError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
