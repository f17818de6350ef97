//! Enumeration invoker port (interface).

use crate::error::Result;

/// What the enumeration program left behind after it finished.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
    /// Standard output, lossily decoded as UTF-8.
    pub stdout: String,

    /// Standard error, lossily decoded as UTF-8.
    pub stderr: String,

    /// Exit code; `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
}

impl CapturedOutput {
    /// Output of a run that exited with status 0.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            exit_code: Some(0),
        }
    }

    /// Output of a run that exited unsuccessfully.
    pub fn failure(exit_code: Option<i32>, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
            exit_code,
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Whether stdout carries anything beyond whitespace.
    pub fn has_stdout(&self) -> bool {
        !self.stdout.trim().is_empty()
    }
}

/// Port for running the external enumeration facility.
///
/// Implementations target the local host, bound execution with a timeout and
/// report launch failures and timeouts as errors. A non-zero exit is NOT an
/// error here: it is returned as a [`CapturedOutput`] so the caller can
/// classify it.
pub trait EnumerationInvoker: Send + Sync {
    /// Name of the program being run, for diagnostics.
    fn program(&self) -> &str;

    /// Run the enumeration once and capture its output.
    fn invoke(&self) -> impl std::future::Future<Output = Result<CapturedOutput>> + Send;
}
