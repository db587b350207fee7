//! Top-level config loading pipeline.

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::env::{apply_runtime_env_overrides, non_empty, ENV_CONFIG_PATH};
use super::sources::{config_root_dir, read_config_text_with_sources};
use super::{Config, LoadedConfig};

/// Load configuration for a launcher anchored at `base_dir`.
pub fn load_config(base_dir: &Path) -> Result<LoadedConfig, ConfigError> {
    load_config_from_sources(
        base_dir,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

pub(super) fn load_config_from_sources<FRead, FEnv, FRoot>(
    base_dir: &Path,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<LoadedConfig, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let explicit = non_empty(&env_lookup, ENV_CONFIG_PATH);
    let (config_text, source) =
        read_config_text_with_sources(base_dir, explicit.as_deref(), &read_file, &config_root)?;
    let mut config: Config = toml::from_str(&config_text)?;
    apply_runtime_env_overrides(&mut config, &env_lookup)?;
    validate(&config)?;
    Ok(LoadedConfig { config, source })
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.install.program.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "`install.program` must not be empty".to_string(),
        ));
    }
    if config.app.program.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "`app.program` must not be empty".to_string(),
        ));
    }
    if config.activation.enabled && config.activation.venv.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "`activation.venv` must not be empty when activation is enabled".to_string(),
        ));
    }
    if config
        .activation
        .hook
        .as_deref()
        .is_some_and(|hook| hook.trim().is_empty())
    {
        return Err(ConfigError::Invalid(
            "`activation.hook` must not be blank; remove the key to disable it".to_string(),
        ));
    }
    Ok(())
}
