//! Scan pipeline: lsof text to an ordered record set.
//!
//! Both stages are pure functions over already-captured text.

mod normalizer;
mod parser;
mod utils;

pub use normalizer::normalize;
pub use parser::{parse_line, parse_lsof_output, LsofLine, SkipReason, FIELD_COUNT};

/// Parse and normalize lsof output in one step.
pub fn records_from_output(output: &str) -> Vec<crate::domain::PortRecord> {
    normalize(parse_lsof_output(output))
}
