//! One scan cycle, end to end.

use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::adapters::LsofInvoker;
use crate::config::ScanConfig;
use crate::domain::{DegradedReason, ScanFailure, ScanOutcome};
use crate::error::Result;
use crate::ports::{CapturedOutput, EnumerationInvoker};
use crate::scanner::{normalize, parse_lsof_output};

use super::PermissionClassifier;

/// Phases of a single scan cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Idle,
    Invoking,
    Parsing,
    Normalizing,
    Done,
}

impl ScanPhase {
    /// The phase that follows this one on the success path.
    pub fn next(self) -> Self {
        match self {
            ScanPhase::Idle => ScanPhase::Invoking,
            ScanPhase::Invoking => ScanPhase::Parsing,
            ScanPhase::Parsing => ScanPhase::Normalizing,
            ScanPhase::Normalizing | ScanPhase::Done => ScanPhase::Done,
        }
    }
}

impl std::fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ScanPhase::Idle => "idle",
            ScanPhase::Invoking => "invoking",
            ScanPhase::Parsing => "parsing",
            ScanPhase::Normalizing => "normalizing",
            ScanPhase::Done => "done",
        };
        f.write_str(name)
    }
}

/// Phase tracker for one cycle. Lives on the stack of [`ScanController::scan`].
struct Cycle {
    phase: ScanPhase,
}

impl Cycle {
    fn new() -> Self {
        Self {
            phase: ScanPhase::Idle,
        }
    }

    fn advance(&mut self) {
        let next = self.phase.next();
        trace!(from = %self.phase, to = %next, "Scan phase");
        self.phase = next;
    }

    fn finish(&mut self, outcome: ScanOutcome) -> ScanOutcome {
        trace!(from = %self.phase, to = %ScanPhase::Done, "Scan phase");
        self.phase = ScanPhase::Done;
        outcome
    }
}

/// Runs scan cycles and classifies each into a [`ScanOutcome`].
///
/// The controller holds only immutable configuration, so concurrent or
/// back-to-back calls to [`scan`](Self::scan) are independent.
pub struct ScanController<I = LsofInvoker> {
    invoker: I,
    classifier: PermissionClassifier,
}

impl ScanController<LsofInvoker> {
    /// Create a controller that runs lsof with the given configuration.
    pub fn new(config: &ScanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_invoker(
            LsofInvoker::from_config(config),
            PermissionClassifier::from_config(config)?,
        ))
    }
}

impl<I: EnumerationInvoker> ScanController<I> {
    /// Create a controller around any invoker implementation.
    pub fn with_invoker(invoker: I, classifier: PermissionClassifier) -> Self {
        Self {
            invoker,
            classifier,
        }
    }

    pub fn invoker(&self) -> &I {
        &self.invoker
    }

    /// Run one scan cycle.
    ///
    /// Always returns a classified outcome; invoker failures never escape.
    pub async fn scan(&self) -> ScanOutcome {
        let started = Instant::now();
        let outcome = self.run_cycle().await;

        debug!(
            program = self.invoker.program(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            success = outcome.is_success(),
            records = outcome.records().len(),
            "Scan cycle finished"
        );

        outcome
    }

    async fn run_cycle(&self) -> ScanOutcome {
        let mut cycle = Cycle::new();

        cycle.advance();
        let captured = match self.invoker.invoke().await {
            Ok(captured) => captured,
            Err(err) => {
                warn!(program = self.invoker.program(), error = %err, "Enumeration failed");
                let failure = err.into_failure(self.invoker.program());
                return cycle.finish(ScanOutcome::Failed(failure));
            }
        };

        if !captured.is_success() && self.classifier.is_permission_denied(&captured) {
            return cycle.finish(self.permission_denied(captured));
        }

        cycle.advance();
        let candidates = parse_lsof_output(&captured.stdout);

        cycle.advance();
        let records = normalize(candidates);

        if !captured.is_success() {
            if records.is_empty() {
                return cycle.finish(self.exit_failure(captured));
            }
            warn!(
                program = self.invoker.program(),
                exit_code = ?captured.exit_code,
                stderr = captured.stderr.trim(),
                "Enumeration exited unsuccessfully, using partial output"
            );
        }

        cycle.finish(ScanOutcome::Success(records))
    }

    /// A non-zero exit the classifier attributes to missing privileges.
    /// Partial stdout is discarded.
    fn permission_denied(&self, captured: CapturedOutput) -> ScanOutcome {
        let program = self.invoker.program().to_string();
        warn!(%program, exit_code = ?captured.exit_code, "Enumeration refused for lack of permission");
        ScanOutcome::Degraded(DegradedReason::PermissionDenied {
            program,
            code: captured.exit_code,
            stderr: captured.stderr,
        })
    }

    /// A non-permission non-zero exit that produced no records.
    fn exit_failure(&self, captured: CapturedOutput) -> ScanOutcome {
        let program = self.invoker.program().to_string();
        warn!(%program, exit_code = ?captured.exit_code, "Enumeration exited unsuccessfully");
        ScanOutcome::Failed(ScanFailure::ExitStatus {
            program,
            code: captured.exit_code,
            stderr: captured.stderr,
        })
    }
}
