//! The bootstrap sequence.
//!
//! Steps run strictly in order: optional activation (and its hook),
//! dependency installation, application, then terminal retention. Each
//! process step yields a [`StepRecord`]; the install-failure policy decides
//! whether a failed installation stops the application from starting.
//! Retention happens on every path, including fatal errors.

use std::ffi::OsString;
use std::fmt;

use crate::config::{Config, InstallFailurePolicy};
use crate::environment::{activate, EnvOverlay};
use crate::error::LaunchError;
use crate::process::{ExitOutcome, Invocation, ProcessRunner};
use crate::retention::{Acknowledger, Acknowledgment};
use crate::ui::RenderSink;
use crate::workdir::BaseDir;

/// Process-running steps of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    ActivationHook,
    Install,
    Application,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ActivationHook => write!(f, "activation hook"),
            Self::Install => write!(f, "dependency installation"),
            Self::Application => write!(f, "application"),
        }
    }
}

/// What happened to one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The child ran and exited.
    Exited(ExitOutcome),
    /// The child could not be started or waited on.
    Failed(String),
    /// The step never ran.
    Skipped(String),
}

impl StepOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, Self::Exited(outcome) if outcome.success())
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exited(outcome) => write!(f, "{outcome}"),
            Self::Failed(reason) => write!(f, "{reason}"),
            Self::Skipped(reason) => write!(f, "skipped: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub kind: StepKind,
    /// Human-readable command line.
    pub command: String,
    pub outcome: StepOutcome,
}

/// Observable history of one launcher run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchReport {
    pub steps: Vec<StepRecord>,
    pub acknowledgment: Option<Acknowledgment>,
}

impl LaunchReport {
    pub fn outcome_of(&self, kind: StepKind) -> Option<&StepOutcome> {
        self.steps
            .iter()
            .find(|record| record.kind == kind)
            .map(|record| &record.outcome)
    }
}

/// Runs the bootstrap sequence for one resolved base directory.
pub struct Launcher<R, S> {
    config: Config,
    base: BaseDir,
    runner: R,
    sink: S,
    inherited_path: Option<OsString>,
}

impl<R: ProcessRunner, S: RenderSink> Launcher<R, S> {
    pub fn new(config: Config, base: BaseDir, runner: R, sink: S) -> Self {
        Self {
            config,
            base,
            runner,
            sink,
            inherited_path: std::env::var_os("PATH"),
        }
    }

    /// Replace the `PATH` that activation extends.
    pub fn with_inherited_path(mut self, path: Option<OsString>) -> Self {
        self.inherited_path = path;
        self
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Run every step, then hold the session until `acknowledger` returns.
    ///
    /// A fatal error is rendered before the pause and returned after it.
    pub async fn run(
        &self,
        acknowledger: &mut dyn Acknowledger,
    ) -> Result<LaunchReport, LaunchError> {
        let result = self.run_steps().await;
        if let Err(err) = &result {
            tracing::debug!(error = ?err, "launch aborted");
            self.sink.error(&err.to_string());
        }

        let ack = acknowledger.wait_for_acknowledgment();
        let mut report = result?;
        report.acknowledgment = Some(ack?);
        Ok(report)
    }

    /// Run activation, installation, and the application without pausing.
    pub async fn run_steps(&self) -> Result<LaunchReport, LaunchError> {
        let mut report = LaunchReport::default();

        let overlay = self.activate(&mut report).await?;

        let install = self
            .run_step(
                StepKind::Install,
                Invocation::new(&self.config.install.program, &self.base)
                    .args(self.config.install.command_args())
                    .env(overlay.clone()),
            )
            .await;
        let install_ok = install.outcome.succeeded();
        let install_outcome = install.outcome.clone();
        report.steps.push(install);

        if !install_ok {
            match self.config.install.on_failure {
                InstallFailurePolicy::Continue => {
                    tracing::warn!(
                        outcome = %install_outcome,
                        "dependency installation failed; continuing"
                    );
                    self.sink.warn(&format!(
                        "dependency installation failed ({install_outcome}); starting the application anyway"
                    ));
                }
                InstallFailurePolicy::Halt => {
                    tracing::warn!(
                        outcome = %install_outcome,
                        "dependency installation failed; halting"
                    );
                    self.sink.error(&format!(
                        "dependency installation failed ({install_outcome}); not starting the application"
                    ));
                    report.steps.push(StepRecord {
                        kind: StepKind::Application,
                        command: self.application_invocation(&overlay).to_string(),
                        outcome: StepOutcome::Skipped(
                            "dependency installation failed".to_string(),
                        ),
                    });
                    return Ok(report);
                }
            }
        }

        let app = self
            .run_step(StepKind::Application, self.application_invocation(&overlay))
            .await;
        match &app.outcome {
            StepOutcome::Exited(outcome) if !outcome.success() => {
                self.sink.field("status", &outcome.to_string());
            }
            StepOutcome::Failed(reason) => self.sink.warn(reason),
            _ => {}
        }
        report.steps.push(app);

        Ok(report)
    }

    async fn activate(&self, report: &mut LaunchReport) -> Result<EnvOverlay, LaunchError> {
        let activation = activate(
            &self.config.activation,
            &self.base,
            self.inherited_path.as_deref(),
        )?;
        let Some(activation) = activation else {
            return Ok(EnvOverlay::default());
        };
        self.sink.step("activated virtual environment");
        self.sink
            .field("venv", &activation.venv_dir.display().to_string());

        if let Some(hook) = self.config.activation.hook.as_deref() {
            let record = self
                .run_step(
                    StepKind::ActivationHook,
                    Invocation::new(hook, &self.base).env(activation.overlay.clone()),
                )
                .await;
            if !record.outcome.succeeded() {
                return Err(LaunchError::Activation(format!(
                    "hook `{hook}` failed: {}",
                    record.outcome
                )));
            }
            report.steps.push(record);
        }

        Ok(activation.overlay)
    }

    fn application_invocation(&self, overlay: &EnvOverlay) -> Invocation {
        Invocation::new(&self.config.app.program, &self.base)
            .args(self.config.app.args.iter().cloned())
            .env(overlay.clone())
    }

    async fn run_step(&self, kind: StepKind, invocation: Invocation) -> StepRecord {
        let command = invocation.to_string();
        self.sink.step(&step_headline(kind));
        self.sink.field("command", &command);
        tracing::info!(step = %kind, %command, "step started");

        let outcome = match self.runner.run(&invocation).await {
            Ok(outcome) => StepOutcome::Exited(outcome),
            Err(err) => StepOutcome::Failed(err.to_string()),
        };
        tracing::info!(step = %kind, %outcome, "step finished");

        StepRecord {
            kind,
            command,
            outcome,
        }
    }
}

fn step_headline(kind: StepKind) -> String {
    match kind {
        StepKind::ActivationHook => "running activation hook".to_string(),
        StepKind::Install => "installing dependencies".to_string(),
        StepKind::Application => "starting application".to_string(),
    }
}
