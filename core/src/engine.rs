//! PortPeek Engine - Blocking entry point for non-async callers.
//!
//! A UI or tray process usually runs scans from a worker thread and has no
//! async runtime of its own. The engine owns a single-threaded tokio runtime
//! and blocks the calling thread for the duration of one scan cycle.

use tokio::runtime::{Builder, Runtime};

use crate::adapters::LsofInvoker;
use crate::application::ScanController;
use crate::config::ScanConfig;
use crate::domain::ScanOutcome;
use crate::error::{Error, Result};
use crate::ports::EnumerationInvoker;

/// Blocking scan engine.
///
/// # Usage Pattern
/// The presentation layer calls `scan()` on a worker thread whenever it wants
/// a fresh list (manual refresh, timer, startup) and replaces its view with
/// the returned outcome. Must not be called from inside an async runtime.
pub struct PortPeekEngine<I = LsofInvoker> {
    controller: ScanController<I>,
    runtime: Runtime,
}

impl PortPeekEngine<LsofInvoker> {
    /// Create an engine that runs lsof with the given configuration.
    pub fn new(config: &ScanConfig) -> Result<Self> {
        Self::with_controller(ScanController::new(config)?)
    }
}

impl<I: EnumerationInvoker> PortPeekEngine<I> {
    /// Create an engine around an existing controller.
    pub fn with_controller(controller: ScanController<I>) -> Result<Self> {
        // Use single-threaded runtime - lighter on resources for GUI app
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(Error::Runtime)?;

        Ok(Self {
            controller,
            runtime,
        })
    }

    pub fn controller(&self) -> &ScanController<I> {
        &self.controller
    }

    /// Run one scan cycle, blocking until it finishes or times out.
    pub fn scan(&self) -> ScanOutcome {
        self.runtime.block_on(self.controller.scan())
    }
}
