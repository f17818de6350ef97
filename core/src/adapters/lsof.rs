//! lsof-backed enumeration invoker.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::{ScanConfig, LSOF_ARGS};
use crate::error::{Error, Result};
use crate::ports::{CapturedOutput, EnumerationInvoker};

/// Runs `lsof -i -n -P` against the local host.
#[derive(Debug, Clone)]
pub struct LsofInvoker {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl LsofInvoker {
    /// Create an invoker with the default program and timeout.
    pub fn new() -> Self {
        Self::from_config(&ScanConfig::default())
    }

    /// Create an invoker from a scan configuration.
    pub fn from_config(config: &ScanConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: LSOF_ARGS.iter().map(|s| s.to_string()).collect(),
            timeout: config.timeout,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[cfg(test)]
    fn with_command(program: &str, args: &[&str], timeout: Duration) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            timeout,
        }
    }
}

impl Default for LsofInvoker {
    fn default() -> Self {
        Self::new()
    }
}

impl EnumerationInvoker for LsofInvoker {
    fn program(&self) -> &str {
        &self.program
    }

    /// Run lsof once.
    ///
    /// The child is killed if the timeout elapses before it exits.
    async fn invoke(&self) -> Result<CapturedOutput> {
        debug!(
            program = %self.program,
            args = ?self.args,
            timeout_secs = self.timeout.as_secs_f64(),
            "Running enumeration"
        );

        let child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| Error::Launch {
                program: self.program.clone(),
                source,
            })?;

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|source| Error::Launch {
                program: self.program.clone(),
                source,
            })?,
            Err(_) => {
                warn!(program = %self.program, timeout_secs = self.timeout.as_secs_f64(), "Enumeration timed out");
                return Err(Error::Timeout {
                    program: self.program.clone(),
                    after: self.timeout,
                });
            }
        };

        let captured = CapturedOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        };

        debug!(
            program = %self.program,
            exit_code = ?captured.exit_code,
            stdout_bytes = captured.stdout.len(),
            stderr_bytes = captured.stderr.len(),
            "Enumeration finished"
        );

        Ok(captured)
    }
}
