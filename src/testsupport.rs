//! Shared test fixtures: temp directories and recording doubles for the
//! process runner, acknowledger, and render sink.
//!
//! All doubles write into one [`Journal`] so tests can assert the global
//! order of events across steps.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::LaunchError;
use crate::process::{ExitOutcome, Invocation, ProcessRunner};
use crate::retention::{Acknowledger, Acknowledgment};
use crate::ui::RenderSink;

static TEST_DIR_COUNTER: AtomicU64 = AtomicU64::new(0);
static CWD_LOCK: Mutex<()> = Mutex::new(());

/// Temporary directory fixture with best-effort cleanup.
#[derive(Debug)]
pub struct TestTempDir {
    path: PathBuf,
}

impl TestTempDir {
    /// Create a unique temporary directory with a readable prefix.
    pub fn new(prefix: &str) -> Self {
        let suffix = TEST_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let dir = std::env::temp_dir().join(format!(
            "runway-{prefix}-{}-{millis}-{suffix}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).expect("failed to create temporary fixture directory");
        Self { path: dir }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn child(&self, relative: &str) -> PathBuf {
        self.path.join(relative)
    }

    /// Write UTF-8 text to a child path, creating parent directories as needed.
    pub fn write_text(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.child(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent directories for fixture");
        }
        fs::write(&path, content).expect("failed to write fixture file");
        path
    }
}

impl Drop for TestTempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

/// Serializes tests that change the process's current directory and
/// restores the previous one on drop.
pub struct CwdGuard {
    previous: Option<PathBuf>,
    _lock: MutexGuard<'static, ()>,
}

impl CwdGuard {
    pub fn lock() -> Self {
        let lock = CWD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Self {
            previous: std::env::current_dir().ok(),
            _lock: lock,
        }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        if let Some(previous) = &self.previous {
            let _ = std::env::set_current_dir(previous);
        }
    }
}

/// Ordered event log shared by the doubles below.
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().expect("journal lock").push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().expect("journal lock").clone()
    }
}

/// Scripted result for one program.
#[derive(Debug, Clone, Copy)]
pub enum Scripted {
    Exit(ExitOutcome),
    SpawnFailure,
}

/// Runner that records invocations instead of starting processes.
///
/// Programs exit with code 0 unless scripted otherwise.
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    journal: Journal,
    scripted: BTreeMap<String, Scripted>,
    invocations: Arc<Mutex<Vec<Invocation>>>,
}

impl RecordingRunner {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            ..Self::default()
        }
    }

    pub fn script(mut self, program: &str, result: Scripted) -> Self {
        self.scripted.insert(program.to_string(), result);
        self
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().expect("invocations lock").clone()
    }
}

#[async_trait]
impl ProcessRunner for RecordingRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ExitOutcome, LaunchError> {
        self.invocations
            .lock()
            .expect("invocations lock")
            .push(invocation.clone());
        self.journal.push(format!("run:{}", invocation.program));
        let result = self
            .scripted
            .get(&invocation.program)
            .copied()
            .unwrap_or(Scripted::Exit(ExitOutcome::Code(0)));
        match result {
            Scripted::Exit(outcome) => {
                self.journal.push(format!("exit:{}", invocation.program));
                Ok(outcome)
            }
            Scripted::SpawnFailure => Err(LaunchError::Spawn {
                program: invocation.program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            }),
        }
    }
}

/// Acknowledger that returns immediately and journals the call.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAcknowledger {
    journal: Journal,
    pub calls: usize,
}

impl ScriptedAcknowledger {
    pub fn new(journal: Journal) -> Self {
        Self { journal, calls: 0 }
    }
}

impl Acknowledger for ScriptedAcknowledger {
    fn wait_for_acknowledgment(&mut self) -> Result<Acknowledgment, LaunchError> {
        self.calls += 1;
        self.journal.push("ack");
        Ok(Acknowledgment::KeyPress)
    }
}

/// Render sink that journals warnings and errors.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    journal: Journal,
}

impl RecordingSink {
    pub fn new(journal: Journal) -> Self {
        Self { journal }
    }
}

impl RenderSink for RecordingSink {
    fn step(&self, text: &str) {
        self.journal.push(format!("step:{text}"));
    }

    fn field(&self, _key: &str, _value: &str) {}

    fn warn(&self, msg: &str) {
        self.journal.push(format!("warn:{msg}"));
    }

    fn error(&self, msg: &str) {
        self.journal.push(format!("error:{msg}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_dir_fixture_writes_and_resolves_paths() {
        let fixture = TestTempDir::new("fixture");
        let file = fixture.write_text("nested/file.txt", "hello");
        assert_eq!(fs::read_to_string(file).unwrap(), "hello");
    }

    #[test]
    fn journal_clones_share_entries() {
        let journal = Journal::default();
        let other = journal.clone();
        other.push("a");
        journal.push("b");
        assert_eq!(journal.entries(), vec!["a", "b"]);
    }
}
