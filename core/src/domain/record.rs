//! Port record domain models.

use serde::{Deserialize, Serialize};

// ============================================================================
// PortStatus
// ============================================================================

/// Connection state of a socket, as reported by the enumeration facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PortStatus {
    /// Bound and waiting for inbound connections (`LISTEN`).
    Listening,
    /// Active, connected session (`ESTABLISHED`).
    Established,
}

impl PortStatus {
    /// Both statuses, in display order.
    pub const ALL: [PortStatus; 2] = [PortStatus::Listening, PortStatus::Established];

    /// The literal marker lsof appends to lines in this state.
    pub fn marker(&self) -> &'static str {
        match self {
            PortStatus::Listening => "LISTEN",
            PortStatus::Established => "ESTABLISHED",
        }
    }

    /// Detect the status from a raw output line.
    ///
    /// `LISTEN` wins when a line somehow carries both markers.
    pub fn detect(line: &str) -> Option<Self> {
        PortStatus::ALL
            .into_iter()
            .find(|status| line.contains(status.marker()))
    }

    /// Get the display name for this status.
    pub fn display_name(&self) -> &'static str {
        match self {
            PortStatus::Listening => "Listening",
            PortStatus::Established => "Established",
        }
    }
}

impl std::fmt::Display for PortStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// PortRecord
// ============================================================================

/// One active port on the local host and the process that owns it.
///
/// Parsed candidates and normalized results share this type; a result set
/// holds at most one record per `port`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortRecord {
    /// Transport-layer port number, never 0.
    pub port: u16,

    /// Short name of the owning program (lsof's COMMAND column).
    pub command: String,

    /// Process ID of the owner, if the PID column parsed.
    pub pid: Option<u32>,

    /// Connection state of the socket.
    pub status: PortStatus,
}

impl PortRecord {
    /// Create a new record.
    pub fn new(port: u16, command: impl Into<String>, pid: Option<u32>, status: PortStatus) -> Self {
        Self {
            port,
            command: command.into(),
            pid,
            status,
        }
    }

    /// Menu line text without the status glyph (e.g. "Port 8080: nginx").
    pub fn label(&self) -> String {
        format!("Port {}: {}", self.port, self.command)
    }

    /// Check if this record matches a search query.
    ///
    /// Searches across the port number, command and PID.
    pub fn matches_search(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }

        let query_lower = query.to_lowercase();
        self.command.to_lowercase().contains(&query_lower)
            || self.port.to_string().contains(&query_lower)
            || self
                .pid
                .is_some_and(|pid| pid.to_string().contains(&query_lower))
    }
}

impl std::fmt::Display for PortRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.pid {
            Some(pid) => write!(
                f,
                "{} (PID: {}, {})",
                self.label(),
                pid,
                self.status
            ),
            None => write!(f, "{} ({})", self.label(), self.status),
        }
    }
}

// ============================================================================
// RecordFilter
// ============================================================================

/// Filter criteria applied by the presentation layer to a result set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Text to search across record fields.
    pub search_text: String,
    /// Only keep records in this state.
    pub status: Option<PortStatus>,
    /// Only keep this exact port.
    pub port: Option<u16>,
}

impl RecordFilter {
    /// Create a filter that keeps everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the filter has any active conditions.
    pub fn is_active(&self) -> bool {
        !self.search_text.is_empty() || self.status.is_some() || self.port.is_some()
    }

    /// Check if a record matches all filter criteria.
    pub fn matches(&self, record: &PortRecord) -> bool {
        if !record.matches_search(&self.search_text) {
            return false;
        }
        if self.status.is_some_and(|status| status != record.status) {
            return false;
        }
        if self.port.is_some_and(|port| port != record.port) {
            return false;
        }
        true
    }

    /// Set the search text.
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    /// Restrict to one status.
    pub fn with_status(mut self, status: Option<PortStatus>) -> Self {
        self.status = status;
        self
    }

    /// Restrict to one port.
    pub fn with_port(mut self, port: Option<u16>) -> Self {
        self.port = port;
        self
    }

    /// Apply the filter, preserving order.
    pub fn apply(&self, records: &[PortRecord]) -> Vec<PortRecord> {
        records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_detect() {
        assert_eq!(
            PortStatus::detect("nginx 1 root 6u IPv4 0x1 0t0 TCP *:80 (LISTEN)"),
            Some(PortStatus::Listening)
        );
        assert_eq!(
            PortStatus::detect("node 2 dev 5u IPv4 0x2 0t0 TCP 127.0.0.1:3000 (ESTABLISHED)"),
            Some(PortStatus::Established)
        );
        assert_eq!(PortStatus::detect("rapportd 3 me 4u IPv4 0x3 0t0 UDP *:5353"), None);
    }

    #[test]
    fn test_label_and_display() {
        let record = PortRecord::new(8080, "nginx", Some(123), PortStatus::Listening);
        assert_eq!(record.label(), "Port 8080: nginx");
        assert_eq!(record.to_string(), "Port 8080: nginx (PID: 123, Listening)");

        let kernel = PortRecord::new(22, "launchd", None, PortStatus::Listening);
        assert_eq!(kernel.to_string(), "Port 22: launchd (Listening)");
    }

    #[test]
    fn test_matches_search() {
        let record = PortRecord::new(3000, "node", Some(456), PortStatus::Established);

        assert!(record.matches_search("NODE"));
        assert!(record.matches_search("300"));
        assert!(record.matches_search("456"));
        assert!(record.matches_search(""));
        assert!(!record.matches_search("nginx"));
    }

    #[test]
    fn test_filter_apply() {
        let records = vec![
            PortRecord::new(3000, "node", Some(1), PortStatus::Established),
            PortRecord::new(8080, "nginx", Some(2), PortStatus::Listening),
            PortRecord::new(9000, "node", Some(3), PortStatus::Listening),
        ];

        let filter = RecordFilter::new().with_status(Some(PortStatus::Listening));
        assert!(filter.is_active());
        let ports: Vec<u16> = filter.apply(&records).iter().map(|r| r.port).collect();
        assert_eq!(ports, vec![8080, 9000]);

        let filter = RecordFilter::new()
            .with_search("node")
            .with_status(Some(PortStatus::Listening));
        let ports: Vec<u16> = filter.apply(&records).iter().map(|r| r.port).collect();
        assert_eq!(ports, vec![9000]);

        let filter = RecordFilter::new().with_port(Some(3000));
        assert_eq!(filter.apply(&records).len(), 1);

        assert!(!RecordFilter::new().is_active());
        assert_eq!(RecordFilter::new().apply(&records), records);
    }
}
