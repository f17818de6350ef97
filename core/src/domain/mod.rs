//! Domain layer - Pure data models.
//!
//! This module contains the types a scan cycle produces. They have no I/O
//! dependencies and can be tested in isolation.

mod outcome;
mod record;

pub use outcome::{DegradedReason, Guidance, ScanFailure, ScanOutcome};
pub use record::{PortRecord, PortStatus, RecordFilter};
