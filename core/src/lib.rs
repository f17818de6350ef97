//! PortPeek Core Library
//!
//! Discovers which network ports are active on the local host and which
//! process owns each. One scan cycle:
//! - runs `lsof -i -n -P` with a timeout
//! - parses its table into candidate records, skipping malformed lines
//! - keeps the first record per port and sorts by port
//! - classifies the cycle as success, degraded (permission) or failed
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Pure data models (`PortRecord`, `ScanOutcome`)
//! - `ports`: Trait definitions (interfaces)
//! - `adapters`: External system implementations (lsof)
//! - `scanner`: Pure text-to-records pipeline
//! - `application`: The scan controller
//!
//! # Example
//! ```no_run
//! use portpeek_core::{PortPeekEngine, ScanConfig};
//!
//! let engine = PortPeekEngine::new(&ScanConfig::default())?;
//! for record in engine.scan().records() {
//!     println!("{}", record.label());
//! }
//! # Ok::<(), portpeek_core::Error>(())
//! ```

// Hexagonal architecture layers
pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub mod config;
pub mod engine;
pub mod error;
pub mod scanner;

#[cfg(test)]
mod test_support;

// Re-export domain types (primary API)
pub use domain::{
    DegradedReason, Guidance, PortRecord, PortStatus, RecordFilter, ScanFailure, ScanOutcome,
};

// Re-export other commonly used types
pub use adapters::LsofInvoker;
pub use application::{PermissionClassifier, ScanController, ScanPhase};
pub use config::ScanConfig;
pub use engine::PortPeekEngine;
pub use error::{Error, Result};
pub use ports::{CapturedOutput, EnumerationInvoker};
