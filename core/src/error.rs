//! Error types for the portpeek-core library.

use std::time::Duration;

use thiserror::Error;

use crate::domain::ScanFailure;

/// Result type alias for portpeek operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while enumerating ports or building a scanner.
#[derive(Error, Debug)]
pub enum Error {
    /// The enumeration program could not be started.
    #[error("Failed to run {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The enumeration program exceeded its time bound.
    #[error("{program} timed out after {}s", .after.as_secs())]
    Timeout { program: String, after: Duration },

    /// A permission signature is not a valid regular expression.
    #[error("Invalid permission signature: {0}")]
    InvalidSignature(#[from] regex::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The blocking engine could not build its runtime.
    #[error("Failed to create runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl Error {
    /// Convert an enumeration error into the failure reported to callers.
    ///
    /// Launch and timeout errors name their own program; any other error is
    /// reported as a launch failure of `program`.
    pub fn into_failure(self, program: &str) -> ScanFailure {
        match self {
            Error::Launch { program, source } => ScanFailure::Launch {
                program,
                reason: source.to_string(),
            },
            Error::Timeout { program, after } => ScanFailure::Timeout { program, after },
            other => ScanFailure::Launch {
                program: program.to_string(),
                reason: other.to_string(),
            },
        }
    }
}
