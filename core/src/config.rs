//! Scan configuration.
//!
//! Everything here is supplied by the caller at construction time. The core
//! never reads configuration files or the environment on its own.

use std::time::Duration;

use crate::error::{Error, Result};

/// Enumeration program, resolved through `PATH`.
pub const DEFAULT_PROGRAM: &str = "lsof";

/// Fixed lsof arguments.
///
/// - -i: Network files only
/// - -n: Numeric addresses (no DNS lookups)
/// - -P: Numeric ports (no service names)
pub const LSOF_ARGS: [&str; 3] = ["-i", "-n", "-P"];

/// Wall-clock bound on one enumeration run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Case-insensitive stderr patterns treated as a permission restriction.
pub const DEFAULT_PERMISSION_SIGNATURES: &[&str] = &[
    r"permission denied",
    r"operation not permitted",
    r"not permitted",
    r"\bEACCES\b",
    r"\bEPERM\b",
    r"must be root",
    r"insufficient privileges",
];

/// Settings for one scanner instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Program name or absolute path of the enumeration utility.
    pub program: String,

    /// Time bound on the enumeration run.
    pub timeout: Duration,

    /// Regex patterns matched case-insensitively against stderr.
    pub permission_signatures: Vec<String>,

    /// Exit codes treated as permission-class on this host. Empty by
    /// default: no exit code means "permission denied" everywhere.
    pub permission_exit_codes: Vec<i32>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            timeout: DEFAULT_TIMEOUT,
            permission_signatures: DEFAULT_PERMISSION_SIGNATURES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            permission_exit_codes: Vec::new(),
        }
    }
}

impl ScanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the enumeration program (name or path).
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replace the permission signatures.
    pub fn with_permission_signatures<I, S>(mut self, signatures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.permission_signatures = signatures.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_permission_exit_codes(mut self, codes: impl IntoIterator<Item = i32>) -> Self {
        self.permission_exit_codes = codes.into_iter().collect();
        self
    }

    /// Check that the configuration can drive a scan.
    pub fn validate(&self) -> Result<()> {
        if self.program.trim().is_empty() {
            return Err(Error::Config("Enumeration program must not be empty".to_string()));
        }
        if self.timeout.is_zero() {
            return Err(Error::Config("Timeout must be greater than zero".to_string()));
        }
        Ok(())
    }
}
