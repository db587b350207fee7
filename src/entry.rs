//! Top-level launch flow shared by the binary and its tests.

use std::ffi::OsString;

use crate::config::load_config;
use crate::error::LaunchError;
use crate::launcher::Launcher;
use crate::preflight::collect_launch_warnings;
use crate::process::ProcessRunner;
use crate::retention::Acknowledger;
use crate::ui::RenderSink;
use crate::workdir::{anchor, BaseDir};

/// Process exit code after the pipeline ran, whatever the child outcomes.
pub const EXIT_OK: i32 = 0;
/// Process exit code after a fatal launcher error.
pub const EXIT_FATAL: i32 = 1;

/// Anchor to `base`, load config, and run the launcher.
///
/// Every path ends with exactly one acknowledgment. `make_sink` receives the
/// color setting in effect: `color` before config is loaded, the configured
/// one afterwards.
pub async fn run<R, S, F>(
    base: Result<BaseDir, LaunchError>,
    color: bool,
    runner: R,
    make_sink: F,
    acknowledger: &mut dyn Acknowledger,
    path_var: Option<OsString>,
) -> i32
where
    R: ProcessRunner,
    S: RenderSink,
    F: Fn(bool) -> S,
{
    let base = match base.and_then(|base| anchor(&base).map(|()| base)) {
        Ok(base) => base,
        Err(err) => return abort(&make_sink(color), acknowledger, err),
    };

    let loaded = match load_config(base.path()) {
        Ok(loaded) => loaded,
        Err(err) => return abort(&make_sink(color), acknowledger, err.into()),
    };
    tracing::info!(source = %loaded.source, base_dir = %base, "configuration loaded");

    let sink = make_sink(loaded.config.display.color);
    for warning in collect_launch_warnings(&loaded.config, &base, path_var.as_deref()) {
        sink.warn(&warning);
    }

    let launcher = Launcher::new(loaded.config, base, runner, sink)
        .with_inherited_path(path_var);
    match launcher.run(acknowledger).await {
        Ok(report) => {
            tracing::debug!(steps = report.steps.len(), "launcher finished");
            EXIT_OK
        }
        Err(LaunchError::Terminal(err)) => {
            tracing::warn!("failed to read acknowledgment: {err}");
            EXIT_FATAL
        }
        // Already rendered and acknowledged inside the launcher.
        Err(_) => EXIT_FATAL,
    }
}

/// Report a fatal error from before the pipeline, then pause.
fn abort(sink: &impl RenderSink, acknowledger: &mut dyn Acknowledger, err: LaunchError) -> i32 {
    tracing::debug!(error = ?err, "launch aborted");
    sink.error(&err.to_string());
    if let Err(ack_err) = acknowledger.wait_for_acknowledgment() {
        tracing::warn!("failed to read acknowledgment: {ack_err}");
    }
    EXIT_FATAL
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::{
        CwdGuard, Journal, RecordingRunner, RecordingSink, ScriptedAcknowledger, TestTempDir,
    };
    use crate::workdir::resolve_directory;

    struct Fixture {
        dir: TestTempDir,
        journal: Journal,
        runner: RecordingRunner,
        ack: ScriptedAcknowledger,
    }

    impl Fixture {
        fn new(prefix: &str) -> Self {
            let journal = Journal::default();
            Self {
                dir: TestTempDir::new(prefix),
                runner: RecordingRunner::new(journal.clone()),
                ack: ScriptedAcknowledger::new(journal.clone()),
                journal,
            }
        }

        async fn run(&mut self, base: Result<BaseDir, LaunchError>) -> i32 {
            let journal = self.journal.clone();
            run(
                base,
                false,
                self.runner.clone(),
                move |_| RecordingSink::new(journal.clone()),
                &mut self.ack,
                None,
            )
            .await
        }
    }

    #[tokio::test]
    async fn bad_config_file_renders_error_pauses_once_and_exits_one() {
        let _cwd = CwdGuard::lock();
        let mut f = Fixture::new("entry-bad-config");
        f.dir.write_text("runway.toml", "[install\nprogram = \"pip\"\n");
        let base = resolve_directory(f.dir.path()).unwrap();

        let code = f.run(Ok(base)).await;

        assert_eq!(code, EXIT_FATAL);
        assert_eq!(f.ack.calls, 1);
        assert!(f.runner.invocations().is_empty());
        let entries = f.journal.entries();
        assert!(
            entries.iter().any(|e| e.starts_with("error:config: toml:")),
            "got: {entries:?}"
        );
        assert_eq!(entries.last().map(String::as_str), Some("ack"));
    }

    #[tokio::test]
    async fn directory_error_pauses_once_and_exits_one() {
        let _cwd = CwdGuard::lock();
        let mut f = Fixture::new("entry-no-dir");

        let code = f
            .run(Err(LaunchError::directory(None, "cannot locate launcher executable")))
            .await;

        assert_eq!(code, EXIT_FATAL);
        assert_eq!(f.ack.calls, 1);
        assert!(f.runner.invocations().is_empty());
        assert_eq!(
            f.journal.entries(),
            vec!["error:working directory: cannot locate launcher executable", "ack"]
        );
    }

    #[tokio::test]
    async fn successful_run_anchors_cwd_and_exits_zero() {
        let _cwd = CwdGuard::lock();
        let mut f = Fixture::new("entry-ok");
        f.dir.write_text(
            "runway.toml",
            "[install]\nprogram = \"installer\"\n[app]\nprogram = \"app\"\nargs = []\n",
        );
        let base = resolve_directory(f.dir.path()).unwrap();

        let code = f.run(Ok(base.clone())).await;

        assert_eq!(code, EXIT_OK);
        assert_eq!(std::env::current_dir().unwrap(), base.path());
        let programs: Vec<String> = f
            .runner
            .invocations()
            .into_iter()
            .map(|inv| inv.program)
            .collect();
        assert_eq!(programs, vec!["installer", "app"]);
        assert_eq!(f.ack.calls, 1);
    }
}
