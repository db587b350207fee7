//! Optional isolated-environment activation.
//!
//! Activation never touches the launcher's own environment. It produces an
//! [`EnvOverlay`] that every later child invocation applies, which is what
//! `source .venv/bin/activate` would have done for a shell.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::config::ActivationConfig;
use crate::error::LaunchError;
use crate::workdir::BaseDir;

/// Environment changes applied to child processes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverlay {
    set: Vec<(String, OsString)>,
    remove: Vec<String>,
}

impl EnvOverlay {
    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.remove.is_empty()
    }

    /// Set `key`, replacing any earlier set or removal of the same key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<OsString>) {
        let key = key.into();
        self.remove.retain(|existing| existing != &key);
        self.set.retain(|(existing, _)| existing != &key);
        self.set.push((key, value.into()));
    }

    /// Remove `key` from the child environment.
    pub fn remove(&mut self, key: impl Into<String>) {
        let key = key.into();
        self.set.retain(|(existing, _)| existing != &key);
        if !self.remove.contains(&key) {
            self.remove.push(key);
        }
    }

    pub fn get(&self, key: &str) -> Option<&OsStr> {
        self.set
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.as_os_str())
    }

    pub fn removes(&self, key: &str) -> bool {
        self.remove.iter().any(|existing| existing == key)
    }

    pub fn apply_to(&self, cmd: &mut tokio::process::Command) {
        for key in &self.remove {
            cmd.env_remove(key);
        }
        for (key, value) in &self.set {
            cmd.env(key, value);
        }
    }
}

/// Result of a successful activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub venv_dir: PathBuf,
    pub overlay: EnvOverlay,
}

/// Executable directory inside a virtual environment.
pub fn venv_bin_dir(venv: &Path) -> PathBuf {
    if cfg!(windows) {
        venv.join("Scripts")
    } else {
        venv.join("bin")
    }
}

/// Compute the activation overlay, or `None` when activation is disabled.
///
/// `inherited_path` is the launcher's own `PATH`; the venv's executable
/// directory is placed in front of it.
pub fn activate(
    config: &ActivationConfig,
    base: &BaseDir,
    inherited_path: Option<&OsStr>,
) -> Result<Option<Activation>, LaunchError> {
    if !config.enabled {
        return Ok(None);
    }

    let venv_dir = base.join(&config.venv);
    let bin_dir = venv_bin_dir(&venv_dir);
    if !bin_dir.is_dir() {
        return Err(LaunchError::Activation(format!(
            "virtual environment `{}` has no `{}` directory (create it with `python -m venv {}`)",
            venv_dir.display(),
            bin_dir
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            config.venv
        )));
    }

    let mut entries = vec![bin_dir.clone()];
    if let Some(path) = inherited_path {
        entries.extend(std::env::split_paths(path).filter(|entry| entry != &bin_dir));
    }
    let path = std::env::join_paths(entries).map_err(|e| {
        LaunchError::Activation(format!(
            "cannot build PATH with `{}`: {e}",
            bin_dir.display()
        ))
    })?;

    let mut overlay = EnvOverlay::default();
    overlay.set("VIRTUAL_ENV", venv_dir.clone().into_os_string());
    overlay.set("PATH", path);
    overlay.remove("PYTHONHOME");
    tracing::info!(venv = %venv_dir.display(), "activated virtual environment");

    Ok(Some(Activation { venv_dir, overlay }))
}
