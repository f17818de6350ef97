//! Candidate deduplication and ordering.

use std::collections::HashSet;

use tracing::trace;

use crate::domain::PortRecord;

/// Reduce candidates to one record per port, sorted ascending by port.
///
/// The first candidate seen for a port wins; later ones are dropped, not
/// merged. Same input always gives the same output.
pub fn normalize(candidates: impl IntoIterator<Item = PortRecord>) -> Vec<PortRecord> {
    let mut seen: HashSet<u16> = HashSet::new();
    let mut records: Vec<PortRecord> = candidates
        .into_iter()
        .filter(|candidate| {
            let first = seen.insert(candidate.port);
            if !first {
                trace!(port = candidate.port, command = %candidate.command, "Dropping duplicate port");
            }
            first
        })
        .collect();

    // Sort by port number
    records.sort_unstable_by_key(|r| r.port);
    records
}
