//! Scripted invoker shared by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::application::{PermissionClassifier, ScanController};
use crate::config::ScanConfig;
use crate::error::{Error, Result};
use crate::ports::{CapturedOutput, EnumerationInvoker};

/// What a [`ScriptedInvoker`] does on every call.
#[derive(Debug, Clone)]
pub enum Script {
    Output(CapturedOutput),
    Timeout,
    LaunchFailure,
}

impl Script {
    pub fn success(stdout: &str) -> Self {
        Script::Output(CapturedOutput::success(stdout))
    }
}

/// Invoker that replays a fixed script instead of spawning a process.
pub struct ScriptedInvoker {
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedInvoker {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EnumerationInvoker for ScriptedInvoker {
    fn program(&self) -> &str {
        "lsof"
    }

    async fn invoke(&self) -> Result<CapturedOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Output(output) => Ok(output.clone()),
            Script::Timeout => Err(Error::Timeout {
                program: "lsof".to_string(),
                after: Duration::from_secs(10),
            }),
            Script::LaunchFailure => Err(Error::Launch {
                program: "lsof".to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "No such file or directory",
                ),
            }),
        }
    }
}

/// Controller over a scripted invoker with the default classifier.
pub fn controller(script: Script) -> ScanController<ScriptedInvoker> {
    let classifier = PermissionClassifier::from_config(&ScanConfig::default())
        .expect("default signatures compile");
    ScanController::with_invoker(ScriptedInvoker::new(script), classifier)
}
