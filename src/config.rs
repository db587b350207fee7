//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`RUNWAY_MANIFEST`, `RUNWAY_ACTIVATE`, ...)
//! 2. TOML file named by `RUNWAY_CONFIG` (relative to the launcher directory)
//! 3. `runway.toml` next to the launcher executable
//! 4. `$XDG_CONFIG_HOME/runway/runway.toml` (or the platform equivalent)
//! 5. Built-in defaults
//!
//! The launcher never writes configuration.

mod defaults;
mod env;
mod loader;
mod sources;
mod types;

pub use defaults::DEFAULT_RUNWAY_CONFIG_TEMPLATE;
pub use loader::load_config;
pub use types::{
    ActivationConfig, AppConfig, Config, ConfigSource, DisplayConfig, InstallConfig,
    InstallFailurePolicy, LoadedConfig,
};
