//! Config-file source discovery.
//!
//! Source order: explicit `RUNWAY_CONFIG` path > `<base>/runway.toml` >
//! global `runway/runway.toml` > built-in defaults.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::defaults::{CONFIG_FILE_NAME, GLOBAL_CONFIG_DIR_NAME};
use super::ConfigSource;

/// Read config text from the highest-precedence available source.
///
/// Relative explicit paths are anchored to `base_dir`. Missing optional files
/// fall through to the next source; any other read error is reported.
pub(super) fn read_config_text_with_sources<FRead, FRoot>(
    base_dir: &Path,
    explicit: Option<&str>,
    read_file: &FRead,
    config_root: &FRoot,
) -> Result<(String, ConfigSource), ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FRoot: Fn() -> Option<PathBuf>,
{
    // 1) Explicit path must exist when given.
    if let Some(raw) = explicit.map(str::trim).filter(|raw| !raw.is_empty()) {
        let path = base_dir.join(raw);
        let text = read_file(&path).map_err(|e| {
            ConfigError::Invalid(format!(
                "failed to read RUNWAY_CONFIG file `{}`: {e}",
                path.display()
            ))
        })?;
        return Ok((text, ConfigSource::Explicit(path)));
    }

    // 2) Next to the launcher.
    let local = base_dir.join(CONFIG_FILE_NAME);
    if let Some(text) = read_optional(&local, read_file)? {
        return Ok((text, ConfigSource::Local(local)));
    }

    // 3) Per-user global file.
    if let Some(root) = config_root() {
        let global = root.join(GLOBAL_CONFIG_DIR_NAME).join(CONFIG_FILE_NAME);
        if let Some(text) = read_optional(&global, read_file)? {
            return Ok((text, ConfigSource::Global(global)));
        }
    }

    Ok((String::new(), ConfigSource::BuiltInDefaults))
}

fn read_optional<FRead>(path: &Path, read_file: &FRead) -> Result<Option<String>, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
{
    match read_file(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ConfigError::Io(e)),
    }
}

/// Platform config root (`$XDG_CONFIG_HOME` or equivalent).
pub(super) fn config_root_dir() -> Option<PathBuf> {
    dirs::config_dir()
}
