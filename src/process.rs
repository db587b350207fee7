//! Child-process invocation.
//!
//! Every step that starts a program goes through [`ProcessRunner`]. The
//! production runner connects the child to the launcher's own standard
//! streams and blocks until it exits; tests substitute recording runners.

use async_trait::async_trait;
use std::fmt;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use tokio::process::{Child, Command};

use crate::environment::EnvOverlay;
use crate::error::LaunchError;
use crate::workdir::BaseDir;

/// One child-process request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    /// Always the resolved base directory.
    pub current_dir: PathBuf,
    pub env: EnvOverlay,
}

impl Invocation {
    pub fn new(program: impl Into<String>, base: &BaseDir) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: base.path().to_path_buf(),
            env: EnvOverlay::default(),
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, overlay: EnvOverlay) -> Self {
        self.env = overlay;
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", display_word(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", display_word(arg))?;
        }
        Ok(())
    }
}

/// Quote a word for human-readable command lines only; never used to build
/// an actual shell command.
fn display_word(word: &str) -> String {
    if !word.is_empty() && !word.chars().any(|c| c.is_whitespace() || c == '\'' || c == '"') {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', "'\\''"))
    }
}

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    Code(i32),
    /// Terminated by a signal (Unix only).
    Signal(i32),
    Unknown,
}

impl ExitOutcome {
    pub fn success(self) -> bool {
        self == Self::Code(0)
    }

    pub fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Self::Code(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Self::Signal(signal);
            }
        }
        Self::Unknown
    }
}

impl fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "exit code {code}"),
            Self::Signal(signal) => write!(f, "terminated by signal {signal}"),
            Self::Unknown => write!(f, "unknown exit status"),
        }
    }
}

/// Starts child processes and waits for them.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Run `invocation` to completion.
    async fn run(&self, invocation: &Invocation) -> Result<ExitOutcome, LaunchError>;
}

/// Production runner: inherited stdio, blocking wait, no output capture.
#[derive(Debug, Default, Clone, Copy)]
pub struct InheritedStdioRunner;

#[async_trait]
impl ProcessRunner for InheritedStdioRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ExitOutcome, LaunchError> {
        let mut cmd = Command::new(&invocation.program);
        cmd.kill_on_drop(true);
        cmd.args(&invocation.args)
            .current_dir(&invocation.current_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        invocation.env.apply_to(&mut cmd);

        tracing::debug!(
            command = %invocation,
            cwd = %invocation.current_dir.display(),
            "spawning child"
        );
        let mut child = cmd.spawn().map_err(|source| LaunchError::Spawn {
            program: invocation.program.clone(),
            source,
        })?;

        let status = wait_through_interrupts(&mut child)
            .await
            .map_err(|source| LaunchError::Wait {
                program: invocation.program.clone(),
                source,
            })?;
        let outcome = ExitOutcome::from_status(status);
        tracing::debug!(command = %invocation, %outcome, "child exited");
        Ok(outcome)
    }
}

/// Wait for `child`, surviving Ctrl-C.
///
/// The terminal delivers the interrupt to the child as well; the launcher
/// keeps waiting so the pause after the application still happens.
async fn wait_through_interrupts(child: &mut Child) -> std::io::Result<ExitStatus> {
    loop {
        tokio::select! {
            status = child.wait() => return status,
            signal = tokio::signal::ctrl_c() => match signal {
                Ok(()) => tracing::debug!("interrupt received; waiting for child to exit"),
                Err(e) => {
                    tracing::warn!("cannot listen for interrupts: {e}");
                    return child.wait().await;
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::TestTempDir;
    use crate::workdir::resolve_directory;

    #[test]
    fn invocation_display_quotes_spaced_words() {
        let fixture = TestTempDir::new("proc-display");
        let base = resolve_directory(fixture.path()).unwrap();
        let inv = Invocation::new("pip", &base).args(["install", "-r", "my reqs.txt"]);
        assert_eq!(inv.to_string(), "pip install -r 'my reqs.txt'");
        assert_eq!(inv.current_dir, base.path());
    }

    #[test]
    fn outcome_display_and_success() {
        assert!(ExitOutcome::Code(0).success());
        assert!(!ExitOutcome::Code(1).success());
        assert!(!ExitOutcome::Signal(9).success());
        assert_eq!(ExitOutcome::Code(2).to_string(), "exit code 2");
        assert_eq!(
            ExitOutcome::Signal(15).to_string(),
            "terminated by signal 15"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn runner_reports_exit_code() {
        let fixture = TestTempDir::new("proc-code");
        let base = resolve_directory(fixture.path()).unwrap();
        let inv = Invocation::new("sh", &base).args(["-c", "exit 3"]);
        let outcome = InheritedStdioRunner.run(&inv).await.unwrap();
        assert_eq!(outcome, ExitOutcome::Code(3));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn runner_reports_signal_termination() {
        let fixture = TestTempDir::new("proc-signal");
        let base = resolve_directory(fixture.path()).unwrap();
        let inv = Invocation::new("sh", &base).args(["-c", "kill -9 $$"]);
        let outcome = InheritedStdioRunner.run(&inv).await.unwrap();
        assert_eq!(outcome, ExitOutcome::Signal(9));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn runner_starts_child_in_base_dir_with_overlay() {
        let fixture = TestTempDir::new("proc-cwd");
        let base = resolve_directory(fixture.path()).unwrap();
        let mut overlay = EnvOverlay::default();
        overlay.set("RUNWAY_TEST_MARKER", "overlay-value");
        let inv = Invocation::new("sh", &base)
            .args(["-c", "pwd > cwd.txt; printf %s \"$RUNWAY_TEST_MARKER\" > env.txt"])
            .env(overlay);

        let outcome = InheritedStdioRunner.run(&inv).await.unwrap();
        assert!(outcome.success());
        let cwd = std::fs::read_to_string(base.join("cwd.txt")).unwrap();
        assert_eq!(
            PathBuf::from(cwd.trim()).canonicalize().unwrap(),
            base.path()
        );
        let env = std::fs::read_to_string(base.join("env.txt")).unwrap();
        assert_eq!(env, "overlay-value");
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let fixture = TestTempDir::new("proc-missing");
        let base = resolve_directory(fixture.path()).unwrap();
        let inv = Invocation::new("runway-definitely-not-installed", &base);
        let err = InheritedStdioRunner.run(&inv).await.unwrap_err();
        match err {
            LaunchError::Spawn { program, .. } => {
                assert_eq!(program, "runway-definitely-not-installed")
            }
            other => panic!("expected spawn error, got {other}"),
        }
    }
}
