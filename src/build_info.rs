//! Compile-time build metadata.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VCS commit hash captured at build time.
pub const GIT_COMMIT: &str = env!("RUNWAY_BUILD_GIT_HASH");

/// Target triple the binary was compiled for.
pub const TARGET: &str = env!("RUNWAY_BUILD_TARGET");

/// One-line identity logged when the launcher starts.
pub fn startup_metadata_line() -> String {
    format!("runway v{VERSION} ({GIT_COMMIT}, {TARGET})")
}
