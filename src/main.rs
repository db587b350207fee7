//! CLI entry point for runway.

mod cli;

use clap::Parser;
use runway::build_info;
use runway::entry;
use runway::logging::init_logging;
use runway::process::InheritedStdioRunner;
use runway::retention::TerminalAcknowledger;
use runway::ui::Renderer;
use runway::workdir::locate_base_dir;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = cli::Args::parse();

    // Config is not loaded yet; honor NO_COLOR for anything printed before it.
    let color = std::env::var_os("NO_COLOR").is_none();
    init_logging(color);
    tracing::debug!("{}", build_info::startup_metadata_line());
    if !args.ignored.is_empty() {
        tracing::debug!(ignored = ?args.ignored, "ignoring command-line arguments");
    }

    let base = locate_base_dir(|name| std::env::var(name).ok());
    let code = entry::run(
        base,
        color,
        InheritedStdioRunner,
        Renderer::new,
        &mut TerminalAcknowledger::default(),
        std::env::var_os("PATH"),
    )
    .await;
    std::process::exit(code);
}
