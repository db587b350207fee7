//! Base-directory resolution and anchoring.
//!
//! The launcher anchors every relative path (config, manifest, application
//! entry point, venv) to the directory holding its own executable. The
//! resolved [`BaseDir`] is passed explicitly to each step and used as the
//! `current_dir` of every child; [`anchor`] additionally makes it the
//! process's current directory.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::LaunchError;

/// Env var that replaces the executable-derived base directory.
pub const ENV_HOME_OVERRIDE: &str = "RUNWAY_HOME";

/// Canonical, readable directory every step resolves paths against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseDir(PathBuf);

impl BaseDir {
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Resolve `relative` against the base directory. Absolute inputs are
    /// returned unchanged.
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.0.join(relative)
    }
}

impl fmt::Display for BaseDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl AsRef<Path> for BaseDir {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// Locate the base directory for this process.
///
/// `RUNWAY_HOME` wins when set and non-blank; otherwise the directory of the
/// running executable is used.
pub fn locate_base_dir<FEnv>(env_lookup: FEnv) -> Result<BaseDir, LaunchError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(home) = env_lookup(ENV_HOME_OVERRIDE).filter(|v| !v.trim().is_empty()) {
        return resolve_directory(Path::new(home.trim()));
    }
    let exe = std::env::current_exe().map_err(|e| {
        LaunchError::directory(None, format!("cannot locate launcher executable: {e}"))
    })?;
    resolve_base_dir(&exe)
}

/// Resolve the directory containing `exe`, following symlinks.
pub fn resolve_base_dir(exe: &Path) -> Result<BaseDir, LaunchError> {
    let canonical = exe
        .canonicalize()
        .map_err(|e| LaunchError::directory(Some(exe.to_path_buf()), e.to_string()))?;
    let parent = canonical.parent().ok_or_else(|| {
        LaunchError::directory(
            Some(canonical.clone()),
            "launcher executable has no parent directory",
        )
    })?;
    ensure_readable_dir(parent)?;
    Ok(BaseDir(parent.to_path_buf()))
}

/// Resolve an explicit directory path.
pub fn resolve_directory(dir: &Path) -> Result<BaseDir, LaunchError> {
    let canonical = dir
        .canonicalize()
        .map_err(|e| LaunchError::directory(Some(dir.to_path_buf()), e.to_string()))?;
    if !canonical.is_dir() {
        return Err(LaunchError::directory(Some(canonical), "not a directory"));
    }
    ensure_readable_dir(&canonical)?;
    Ok(BaseDir(canonical))
}

/// Make `base` the process's current directory.
pub fn anchor(base: &BaseDir) -> Result<(), LaunchError> {
    std::env::set_current_dir(base.path())
        .map_err(|e| LaunchError::directory(Some(base.path().to_path_buf()), e.to_string()))?;
    tracing::debug!(base_dir = %base, "anchored working directory");
    Ok(())
}

fn ensure_readable_dir(dir: &Path) -> Result<(), LaunchError> {
    std::fs::read_dir(dir)
        .map(|_| ())
        .map_err(|e| LaunchError::directory(Some(dir.to_path_buf()), format!("not readable: {e}")))
}
