//! Ports layer - Trait definitions (interfaces).
//!
//! This module defines the interfaces that the scan controller uses
//! to interact with external systems. Implementations live in `adapters`.

mod invoker;

pub use invoker::{CapturedOutput, EnumerationInvoker};
