//! lsof output parser.
//!
//! Expected lsof output format:
//! ```text
//! COMMAND    PID  USER   FD   TYPE             DEVICE SIZE/OFF NODE NAME
//! node     34805  code   19u  IPv6 0x3d8015e195af1f3f      0t0  TCP [::1]:3000 (LISTEN)
//! ```
//!
//! Parsing is total: a line that does not describe a listening or connected
//! network socket is skipped, never reported as an error.

use tracing::trace;

use crate::domain::{PortRecord, PortStatus};

use super::utils::Utils;

/// Number of positional columns every data line must have.
pub const FIELD_COUNT: usize = 9;

/// The nine positional columns of one lsof data line.
///
/// Trailing tokens (such as the `(LISTEN)` state) are not part of the
/// tokenized fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LsofLine<'a> {
    pub command: &'a str,
    pub pid: &'a str,
    pub user: &'a str,
    pub fd: &'a str,
    /// TYPE column (IPv4, IPv6, ...).
    pub kind: &'a str,
    pub device: &'a str,
    pub size_off: &'a str,
    /// NODE column (TCP, UDP, ...).
    pub node: &'a str,
    /// NAME column: `address:port` or `local->remote`.
    pub name: &'a str,
}

impl<'a> LsofLine<'a> {
    /// Split a line on whitespace into its positional columns.
    ///
    /// Returns `None` when fewer than [`FIELD_COUNT`] fields are present.
    pub fn tokenize(line: &'a str) -> Option<Self> {
        let mut fields = line.split_whitespace();
        Some(Self {
            command: fields.next()?,
            pid: fields.next()?,
            user: fields.next()?,
            fd: fields.next()?,
            kind: fields.next()?,
            device: fields.next()?,
            size_off: fields.next()?,
            node: fields.next()?,
            name: fields.next()?,
        })
    }

    /// PID column as a number, if it is one.
    pub fn pid(&self) -> Option<u32> {
        self.pid.parse().ok()
    }
}

/// Why a data line produced no candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer than nine whitespace-separated fields.
    TooFewFields,
    /// NAME column has no colon, so it is not a network address.
    NotNetworkAddress,
    /// Neither `LISTEN` nor `ESTABLISHED` appears on the line.
    NoStateMarker,
    /// No 1-65535 integer after the last colon.
    NoPort,
}

/// Parse one data line into a candidate record.
pub fn parse_line(line: &str) -> Result<PortRecord, SkipReason> {
    let fields = LsofLine::tokenize(line).ok_or(SkipReason::TooFewFields)?;

    if !fields.name.contains(':') {
        return Err(SkipReason::NotNetworkAddress);
    }

    let status = PortStatus::detect(line).ok_or(SkipReason::NoStateMarker)?;

    let port =
        Utils::parse_port(Utils::local_endpoint(fields.name)).ok_or(SkipReason::NoPort)?;

    Ok(PortRecord::new(port, fields.command, fields.pid(), status))
}

/// Parse full lsof output into candidates, in output order.
///
/// The first line is the header and is always discarded.
pub fn parse_lsof_output(output: &str) -> Vec<PortRecord> {
    let mut candidates = Vec::new();

    // Skip header line
    for line in output.lines().skip(1) {
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(line) {
            Ok(candidate) => candidates.push(candidate),
            Err(reason) => trace!(?reason, line, "Skipping lsof line"),
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "COMMAND   PID  USER FD TYPE DEVICE SIZE NODE NAME";

    #[test]
    fn test_tokenize_named_fields() {
        let line =
            "node     34805  code   19u  IPv6 0x3d8015e195af1f3f      0t0  TCP [::1]:3000 (LISTEN)";
        let fields = LsofLine::tokenize(line).unwrap();

        assert_eq!(fields.command, "node");
        assert_eq!(fields.pid(), Some(34805));
        assert_eq!(fields.user, "code");
        assert_eq!(fields.fd, "19u");
        assert_eq!(fields.kind, "IPv6");
        assert_eq!(fields.device, "0x3d8015e195af1f3f");
        assert_eq!(fields.size_off, "0t0");
        assert_eq!(fields.node, "TCP");
        assert_eq!(fields.name, "[::1]:3000");
    }

    #[test]
    fn test_tokenize_too_few_fields() {
        assert!(LsofLine::tokenize("nginx 123 root 4u IPv4 0x1 0t0 TCP").is_none());
        assert!(LsofLine::tokenize("").is_none());
    }

    #[test]
    fn test_parse_reference_output() {
        let output = format!(
            "{HEADER}\n\
             nginx     123  root 4u IPv4 0x1    0t0  TCP  *:8080 (LISTEN)\n\
             node      456  dev  5u IPv4 0x2    0t0  TCP  127.0.0.1:3000 (ESTABLISHED)\n"
        );

        let candidates = parse_lsof_output(&output);
        assert_eq!(
            candidates,
            vec![
                PortRecord::new(8080, "nginx", Some(123), PortStatus::Listening),
                PortRecord::new(3000, "node", Some(456), PortStatus::Established),
            ]
        );
    }

    #[test]
    fn test_header_only() {
        assert!(parse_lsof_output(HEADER).is_empty());
        assert!(parse_lsof_output(&format!("{HEADER}\n")).is_empty());
        assert!(parse_lsof_output("").is_empty());
        assert!(parse_lsof_output("  \n \n").is_empty());
    }

    #[test]
    fn test_skip_reasons() {
        assert_eq!(
            parse_line("nginx 123 root 4u IPv4 0x1 0t0 (LISTEN)"),
            Err(SkipReason::TooFewFields)
        );
        assert_eq!(
            parse_line("nginx 123 root 4u unix 0x1 0t0 /tmp/sock (LISTEN) LISTEN"),
            Err(SkipReason::NotNetworkAddress)
        );
        assert_eq!(
            parse_line("mDNSResp 200 root 8u IPv4 0x3 0t0 UDP *:5353"),
            Err(SkipReason::NoStateMarker)
        );
        assert_eq!(
            parse_line("nginx 123 root 4u IPv4 0x1 0t0 TCP *:* (LISTEN)"),
            Err(SkipReason::NoPort)
        );
        assert_eq!(
            parse_line("nginx 123 root 4u IPv4 0x1 0t0 TCP *:0 (LISTEN)"),
            Err(SkipReason::NoPort)
        );
        assert_eq!(
            parse_line("nginx 123 root 4u IPv4 0x1 0t0 TCP *:70000 (LISTEN)"),
            Err(SkipReason::NoPort)
        );
    }

    #[test]
    fn test_tokenize_needs_every_column() {
        let columns = ["sshd", "1", "root", "3u", "IPv4", "0x1", "0t0", "TCP", "*:22"];
        assert_eq!(columns.len(), FIELD_COUNT);

        assert!(LsofLine::tokenize(&columns.join(" ")).is_some());
        assert!(LsofLine::tokenize(&columns[..FIELD_COUNT - 1].join(" ")).is_none());
    }

    #[test]
    fn test_split_command_name_shifts_columns() {
        let line = "Google Chrome 5120 dev 41u IPv4 0x1 0t0 TCP 127.0.0.1:3000 (LISTEN)";
        let fields = LsofLine::tokenize(line).unwrap();

        assert_eq!(fields.command, "Google");
        assert_eq!(fields.pid(), None);
        assert_eq!(fields.name, "TCP");
        assert_eq!(parse_line(line), Err(SkipReason::NotNetworkAddress));
    }

    #[test]
    fn test_split_command_name_is_not_repaired() {
        // SIZE/OFF missing, so the address still lands in NAME
        let line = "Google Chrome 5120 dev 41u IPv4 0x1 TCP 127.0.0.1:3000 (LISTEN)";

        assert_eq!(
            parse_line(line),
            Ok(PortRecord::new(3000, "Google", None, PortStatus::Listening))
        );
    }

    #[test]
    fn test_malformed_lines_do_not_stop_parsing() {
        let output = format!(
            "{HEADER}\n\
             garbage\n\
             nginx 123 root 4u IPv4 0x1 0t0 TCP *:* (LISTEN)\n\
             redis 77 root 6u IPv4 0x5 0t0 TCP *:6379 (LISTEN)\n\
             short line (ESTABLISHED)\n"
        );

        let candidates = parse_lsof_output(&output);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].port, 6379);
        assert_eq!(candidates[0].command, "redis");
    }

    #[test]
    fn test_ipv6_listen() {
        let record =
            parse_line("node 34805 code 19u IPv6 0x3d80 0t0 TCP [::1]:3000 (LISTEN)").unwrap();
        assert_eq!(record.port, 3000);
        assert_eq!(record.status, PortStatus::Listening);
    }

    #[test]
    fn test_connection_uses_local_port() {
        let record = parse_line(
            "Safari 901 me 30u IPv4 0x9 0t0 TCP 192.168.1.5:52814->140.82.112.26:443 (ESTABLISHED)",
        )
        .unwrap();
        assert_eq!(record.port, 52814);
        assert_eq!(record.status, PortStatus::Established);
    }

    #[test]
    fn test_non_numeric_pid_is_absent() {
        let record = parse_line("kernel - root 4u IPv4 0x1 0t0 TCP *:22 (LISTEN)").unwrap();
        assert_eq!(record.pid, None);
        assert_eq!(record.command, "kernel");
    }

    #[test]
    fn test_header_is_skipped_even_when_it_looks_like_data() {
        let output = "nginx 1 root 4u IPv4 0x1 0t0 TCP *:80 (LISTEN)\n\
                      nginx 1 root 5u IPv4 0x1 0t0 TCP *:443 (LISTEN)\n";
        let candidates = parse_lsof_output(output);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].port, 443);
    }
}
