//! Default configuration constants.
//!
//! The defaults reproduce the stock launcher: `pip install -r requirements.txt`
//! followed by `streamlit run app.py`, with environment activation off.

/// Annotated example `runway.toml` shipped alongside the binary.
pub const DEFAULT_RUNWAY_CONFIG_TEMPLATE: &str = include_str!("../templates/runway.toml");
/// Config file name looked up in the base directory and the global config dir.
pub(super) const CONFIG_FILE_NAME: &str = "runway.toml";
/// Subdirectory of the platform config root holding the global config file.
pub(super) const GLOBAL_CONFIG_DIR_NAME: &str = "runway";

pub(super) const DEFAULT_INSTALL_PROGRAM: &str = "pip";
pub(super) const DEFAULT_INSTALL_ARGS: &[&str] = &["install", "-r"];
pub(super) const DEFAULT_MANIFEST: &str = "requirements.txt";

pub(super) const DEFAULT_APP_PROGRAM: &str = "streamlit";
pub(super) const DEFAULT_APP_ARGS: &[&str] = &["run", "app.py"];

/// Venv directory, relative to the base directory.
pub(super) const DEFAULT_VENV_DIR: &str = ".venv";

pub(super) fn owned_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|arg| (*arg).to_string()).collect()
}
