//! Application layer - Use case services.
//!
//! The scan controller orchestrates one cycle: it drives an invoker (a port
//! from `ports`), feeds the captured text through the `scanner` pipeline and
//! classifies the result into a `ScanOutcome`.

mod permission;
mod scan_controller;

pub use permission::PermissionClassifier;
pub use scan_controller::{ScanController, ScanPhase};
