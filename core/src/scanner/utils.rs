pub struct Utils;

impl Utils {
    /// Local half of an lsof NAME field.
    ///
    /// Connected sockets are rendered as `local->remote`; everything else is
    /// returned unchanged.
    pub fn local_endpoint(name: &str) -> &str {
        match name.split_once("->") {
            Some((local, _)) => local,
            None => name,
        }
    }

    /// Parse the port at the end of an `address:port` string.
    ///
    /// Takes the trailing run of ASCII digits after the last colon. Handles:
    /// - IPv4: "127.0.0.1:3000" or "*:8080"
    /// - IPv6: "\[::1]:3000" or "\[fe80::1]:8080"
    ///
    /// Returns `None` for a missing colon, no digits (`*:*`), or a value
    /// outside 1-65535.
    pub fn parse_port(endpoint: &str) -> Option<u16> {
        let (_, tail) = endpoint.rsplit_once(':')?;
        let digits_start = tail
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit())
            .last()
            .map(|(i, _)| i)?;

        match tail[digits_start..].parse::<u16>() {
            Ok(0) | Err(_) => None,
            Ok(port) => Some(port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ipv4_port() {
        assert_eq!(Utils::parse_port("127.0.0.1:3000"), Some(3000));
        assert_eq!(Utils::parse_port("*:8080"), Some(8080));
        assert_eq!(Utils::parse_port("localhost:5432"), Some(5432));
    }

    #[test]
    fn test_parse_ipv6_port() {
        assert_eq!(Utils::parse_port("[::1]:3000"), Some(3000));
        assert_eq!(Utils::parse_port("[fe80::1]:8080"), Some(8080));
    }

    #[test]
    fn test_parse_port_rejects_invalid() {
        assert_eq!(Utils::parse_port("*:*"), None);
        assert_eq!(Utils::parse_port("no-colon"), None);
        assert_eq!(Utils::parse_port("*:"), None);
        assert_eq!(Utils::parse_port("*:0"), None);
        assert_eq!(Utils::parse_port("*:65536"), None);
        assert_eq!(Utils::parse_port("*:99999999999"), None);
        assert_eq!(Utils::parse_port("*:http"), None);
    }

    #[test]
    fn test_parse_port_takes_trailing_digits() {
        assert_eq!(Utils::parse_port("*:65535"), Some(65535));
        assert_eq!(Utils::parse_port("host:port1"), Some(1));
    }

    #[test]
    fn test_local_endpoint() {
        assert_eq!(
            Utils::local_endpoint("127.0.0.1:52814->140.82.112.26:443"),
            "127.0.0.1:52814"
        );
        assert_eq!(Utils::local_endpoint("*:8080"), "*:8080");
    }
}
