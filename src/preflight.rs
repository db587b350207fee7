//! Pre-launch checks.
//!
//! These run after config loading and before the first step. They never
//! block the sequence; they turn the most common setup mistake (a program
//! that is not installed) into a readable warning ahead of the raw
//! "failed to start" error.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::environment::venv_bin_dir;
use crate::workdir::BaseDir;

/// Collect warnings for programs that cannot be located.
pub fn collect_launch_warnings(
    config: &Config,
    base: &BaseDir,
    path_var: Option<&OsStr>,
) -> Vec<String> {
    let mut search_dirs = Vec::new();
    if config.activation.enabled {
        search_dirs.push(venv_bin_dir(&base.join(&config.activation.venv)));
    }
    if let Some(path) = path_var {
        search_dirs.extend(std::env::split_paths(path));
    }

    let mut programs = vec![
        ("install.program", config.install.program.as_str()),
        ("app.program", config.app.program.as_str()),
    ];
    if config.activation.enabled {
        if let Some(hook) = config.activation.hook.as_deref() {
            programs.push(("activation.hook", hook));
        }
    }

    programs
        .into_iter()
        .filter(|(_, program)| locate_program(program, base, &search_dirs).is_none())
        .map(|(key, program)| {
            format!("`{program}` ({key}) was not found; the step will fail to start")
        })
        .collect()
}

/// Resolve `program` the way the OS will when spawning it.
///
/// Names containing a path separator are taken relative to the base
/// directory; bare names are searched in `search_dirs`.
pub fn locate_program(program: &str, base: &BaseDir, search_dirs: &[PathBuf]) -> Option<PathBuf> {
    let candidate = Path::new(program);
    if candidate.components().count() > 1 || candidate.is_absolute() {
        return executable_variants(&base.join(candidate))
            .into_iter()
            .find(|path| path.is_file());
    }
    search_dirs
        .iter()
        .flat_map(|dir| executable_variants(&dir.join(program)))
        .find(|path| path.is_file())
}

fn executable_variants(path: &Path) -> Vec<PathBuf> {
    let mut variants = vec![path.to_path_buf()];
    if cfg!(windows) && path.extension().is_none() {
        let pathext = std::env::var("PATHEXT").unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".into());
        variants.extend(
            pathext
                .split(';')
                .filter(|ext| !ext.is_empty())
                .map(|ext| path.with_extension(ext.trim_start_matches('.'))),
        );
    }
    variants
}
