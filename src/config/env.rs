//! Environment overrides applied on top of file config.
//!
//! Every variable is optional. Empty values are treated as unset so that
//! `RUNWAY_MANIFEST= runway` behaves like not setting it at all.

use crate::error::ConfigError;

use super::{Config, InstallFailurePolicy};

/// Env var naming an explicit config file.
pub(super) const ENV_CONFIG_PATH: &str = "RUNWAY_CONFIG";

pub(super) fn apply_runtime_env_overrides<FEnv>(
    config: &mut Config,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(manifest) = non_empty(env_lookup, "RUNWAY_MANIFEST") {
        config.install.manifest = manifest;
    }
    if let Some(program) = non_empty(env_lookup, "RUNWAY_INSTALL_PROGRAM") {
        config.install.program = program;
    }
    if let Some(program) = non_empty(env_lookup, "RUNWAY_APP_PROGRAM") {
        config.app.program = program;
    }
    if let Some(policy) = non_empty(env_lookup, "RUNWAY_ON_INSTALL_FAILURE") {
        config.install.on_failure = policy
            .parse::<InstallFailurePolicy>()
            .map_err(|msg| ConfigError::Invalid(format!("RUNWAY_ON_INSTALL_FAILURE: {msg}")))?;
    }
    if let Some(flag) = non_empty(env_lookup, "RUNWAY_ACTIVATE") {
        config.activation.enabled = parse_bool_flag(&flag).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "invalid RUNWAY_ACTIVATE value `{flag}`: expected 1/0, true/false, yes/no, or on/off"
            ))
        })?;
    }
    if let Some(venv) = non_empty(env_lookup, "RUNWAY_VENV") {
        config.activation.venv = venv;
    }
    // https://no-color.org: presence alone disables color.
    if env_lookup("NO_COLOR").is_some() {
        config.display.color = false;
    }
    Ok(())
}

/// Parse a human boolean flag value.
pub(super) fn parse_bool_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub(super) fn non_empty<FEnv>(env_lookup: &FEnv, name: &str) -> Option<String>
where
    FEnv: Fn(&str) -> Option<String>,
{
    env_lookup(name).filter(|value| !value.trim().is_empty())
}
