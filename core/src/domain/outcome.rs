//! Scan outcome domain models.
//!
//! A [`ScanOutcome`] is the terminal result of one scan cycle. It is built
//! fresh every cycle, handed to the caller and never mutated afterwards.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use super::PortRecord;

/// Why a scan cycle could not produce records.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ScanFailure {
    /// The enumeration program could not be started.
    #[error("could not run {program}: {reason}")]
    Launch { program: String, reason: String },

    /// The enumeration program did not finish within the bound.
    #[error("{program} timed out after {}s", .after.as_secs())]
    Timeout { program: String, after: Duration },

    /// Non-zero exit with nothing usable on stdout.
    #[error("{program} exited with {}{}", exit_label(.code), stderr_suffix(.stderr))]
    ExitStatus {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// Why a scan cycle ran but was refused visibility.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DegradedReason {
    /// The exit status or stderr looked like a permission restriction.
    #[error("permission denied running {program} ({}){}", exit_label(.code), stderr_suffix(.stderr))]
    PermissionDenied {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

/// Terminal, classified result of one scan cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "camelCase")]
pub enum ScanOutcome {
    /// Records sorted ascending by port, one per port. May be empty.
    Success(Vec<PortRecord>),
    /// Enumeration was refused; the caller should offer remediation.
    Degraded(DegradedReason),
    /// Enumeration could not run or finish.
    Failed(ScanFailure),
}

impl ScanOutcome {
    /// Records of a successful scan; empty for every other outcome.
    pub fn records(&self) -> &[PortRecord] {
        match self {
            ScanOutcome::Success(records) => records,
            ScanOutcome::Degraded(_) | ScanOutcome::Failed(_) => &[],
        }
    }

    /// Take ownership of the records of a successful scan.
    pub fn into_records(self) -> Vec<PortRecord> {
        match self {
            ScanOutcome::Success(records) => records,
            ScanOutcome::Degraded(_) | ScanOutcome::Failed(_) => Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ScanOutcome::Success(_))
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, ScanOutcome::Degraded(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ScanOutcome::Failed(_))
    }

    /// User-facing guidance for this outcome.
    ///
    /// Returns `None` only for a successful scan that found records.
    pub fn guidance(&self) -> Option<Guidance> {
        match self {
            ScanOutcome::Success(records) if records.is_empty() => {
                Some(Guidance::new("No active network connections found", None))
            }
            ScanOutcome::Success(_) => None,
            ScanOutcome::Degraded(DegradedReason::PermissionDenied { .. }) => Some(Guidance::new(
                "Unable to access network info",
                Some("Try running with admin privileges"),
            )),
            ScanOutcome::Failed(ScanFailure::Timeout { .. }) => {
                Some(Guidance::new("Network scan timed out", None))
            }
            ScanOutcome::Failed(failure) => Some(Guidance::new(
                format!("Error accessing network info: {}", failure),
                None,
            )),
        }
    }
}

/// Text the presentation layer shows instead of (or in addition to) records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Guidance {
    /// One-line summary of what happened.
    pub headline: String,
    /// What the user can do about it, if anything.
    pub hint: Option<&'static str>,
}

impl Guidance {
    fn new(headline: impl Into<String>, hint: Option<&'static str>) -> Self {
        Self {
            headline: headline.into(),
            hint,
        }
    }
}
