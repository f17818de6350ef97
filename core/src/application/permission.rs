//! Best-effort permission-denial classification.

use regex::{RegexSet, RegexSetBuilder};

use crate::config::ScanConfig;
use crate::error::Result;
use crate::ports::CapturedOutput;

/// Decides whether a failed enumeration run was refused for lack of
/// privileges.
///
/// A run is permission-class when it exited unsuccessfully AND either its
/// stderr matches one of the signatures (case-insensitive) or its exit code
/// is one of the configured codes. No exit code is assumed by default, since
/// the meaning of lsof's exit status varies between hosts.
#[derive(Debug, Clone)]
pub struct PermissionClassifier {
    signatures: RegexSet,
    exit_codes: Vec<i32>,
}

impl PermissionClassifier {
    /// Build a classifier from regex signatures and exit codes.
    pub fn new<I, S>(signatures: I, exit_codes: impl IntoIterator<Item = i32>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let signatures = RegexSetBuilder::new(signatures)
            .case_insensitive(true)
            .build()?;

        Ok(Self {
            signatures,
            exit_codes: exit_codes.into_iter().collect(),
        })
    }

    pub fn from_config(config: &ScanConfig) -> Result<Self> {
        Self::new(
            &config.permission_signatures,
            config.permission_exit_codes.iter().copied(),
        )
    }

    /// Check a captured run for a permission restriction.
    pub fn is_permission_denied(&self, output: &CapturedOutput) -> bool {
        if output.is_success() {
            return false;
        }

        output
            .exit_code
            .is_some_and(|code| self.exit_codes.contains(&code))
            || self.signatures.is_match(&output.stderr)
    }
}
