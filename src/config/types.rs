//! Configuration data model.
//!
//! Structs deserialize straight from `runway.toml`; every table and key is
//! optional and falls back to the defaults in `config::defaults`.

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::defaults::{
    owned_args, DEFAULT_APP_ARGS, DEFAULT_APP_PROGRAM, DEFAULT_INSTALL_ARGS,
    DEFAULT_INSTALL_PROGRAM, DEFAULT_MANIFEST, DEFAULT_VENV_DIR,
};

/// Top-level launcher configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub install: InstallConfig,
    pub app: AppConfig,
    pub activation: ActivationConfig,
    pub display: DisplayConfig,
}

/// What to do after the dependency installer reports failure.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InstallFailurePolicy {
    /// Warn and start the application anyway.
    #[default]
    Continue,
    /// Skip the application and go straight to terminal retention.
    Halt,
}

impl fmt::Display for InstallFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Continue => write!(f, "continue"),
            Self::Halt => write!(f, "halt"),
        }
    }
}

impl FromStr for InstallFailurePolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "continue" => Ok(Self::Continue),
            "halt" => Ok(Self::Halt),
            other => Err(format!(
                "unknown install failure policy `{other}` (expected `continue` or `halt`)"
            )),
        }
    }
}

/// Dependency-installation step settings (`[install]`).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct InstallConfig {
    pub program: String,
    /// Arguments placed before the manifest path.
    pub args: Vec<String>,
    /// Manifest path handed to the installer verbatim.
    pub manifest: String,
    pub on_failure: InstallFailurePolicy,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_INSTALL_PROGRAM.to_string(),
            args: owned_args(DEFAULT_INSTALL_ARGS),
            manifest: DEFAULT_MANIFEST.to_string(),
            on_failure: InstallFailurePolicy::Continue,
        }
    }
}

impl InstallConfig {
    /// Full installer argument list: configured args, then the manifest.
    pub fn command_args(&self) -> Vec<String> {
        let mut args = self.args.clone();
        args.push(self.manifest.clone());
        args
    }
}

/// Target application settings (`[app]`).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_APP_PROGRAM.to_string(),
            args: owned_args(DEFAULT_APP_ARGS),
        }
    }
}

/// Optional isolated-environment activation (`[activation]`).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ActivationConfig {
    pub enabled: bool,
    /// Virtual environment directory, relative to the base directory.
    pub venv: String,
    /// Program run once with no arguments after the overlay is computed.
    pub hook: Option<String>,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            venv: DEFAULT_VENV_DIR.to_string(),
            hook: None,
        }
    }
}

/// Status-line rendering settings (`[display]`).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Where the effective config text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// File named by `RUNWAY_CONFIG`.
    Explicit(PathBuf),
    /// `runway.toml` in the base directory.
    Local(PathBuf),
    /// `runway.toml` under the platform config root.
    Global(PathBuf),
    /// No file found; built-in defaults.
    BuiltInDefaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(path) | Self::Local(path) | Self::Global(path) => {
                write!(f, "{}", path.display())
            }
            Self::BuiltInDefaults => write!(f, "built-in defaults"),
        }
    }
}

/// Loaded config plus the source it was read from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}
