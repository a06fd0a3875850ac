//! Host syntax and normalization shared by URLs and email domains.
//!
//! ```text
//! host   = ip-literal / ipv4-address / domain
//! domain = label *( "." label )
//! ```
//!
//! Domains are mapped with UTS #46. The ASCII (punycode) form and the
//! unicode form are both computed once and stored.

use std::cmp::Ordering;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use percent_encoding::percent_decode_str;

use crate::config::HostStrictness;
use crate::constants::{MAX_DNS_DOMAIN_LENGTH, MAX_DNS_LABEL_LENGTH};
use crate::error::HostError;

/// The shape of a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HostKind {
    /// A domain name (e.g., "example.com")
    Domain,
    /// An IPv4 address (e.g., "192.168.1.1")
    Ipv4(Ipv4Addr),
    /// An IPv6 address (e.g., `::1`)
    Ipv6(Ipv6Addr),
}

/// A validated, normalized host.
///
/// # Examples
///
/// ```
/// use schema_url::{Host, HostKind, HostStrictness};
///
/// let host = Host::parse("B\u{fc}cher.example", HostStrictness::Lenient).unwrap();
/// assert_eq!(host.as_str(), "xn--bcher-kva.example");
/// assert_eq!(host.unicode_str(), "b\u{fc}cher.example");
///
/// let host = Host::parse("[::1]", HostStrictness::Lenient).unwrap();
/// assert!(matches!(host.kind(), HostKind::Ipv6(_)));
/// assert_eq!(host.as_str(), "[::1]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Host {
    kind: HostKind,
    ascii: String,
    unicode: String,
}

impl Host {
    /// Parses and normalizes a host.
    ///
    /// # Errors
    ///
    /// Returns `HostError` if:
    /// - The input is empty
    /// - An IPv6 literal or numeric IPv4 host is malformed
    /// - The host is not valid percent-encoded UTF-8
    /// - UTS #46 mapping rejects a label
    /// - The mapped domain contains a forbidden code point
    /// - In strict mode, a label breaks the LDH or length rules
    pub fn parse(input: &str, strictness: HostStrictness) -> Result<Self, HostError> {
        if input.is_empty() {
            return Err(HostError::Empty);
        }

        if input.starts_with('[') {
            return Self::parse_ipv6_literal(input);
        }

        let decoded = percent_decode_str(input)
            .decode_utf8()
            .map_err(|_| HostError::InvalidEncoding)?;

        let ascii = match strictness {
            HostStrictness::Lenient => idna::domain_to_ascii(&decoded),
            HostStrictness::Strict => idna::domain_to_ascii_strict(&decoded),
        }
        .map_err(|_| HostError::Idna)?;

        if ascii.is_empty() {
            return Err(HostError::Empty);
        }

        if let Some(c) = ascii.chars().find(|&c| Self::is_forbidden(c)) {
            return Err(HostError::ForbiddenChar { char: c });
        }

        if Self::ends_in_number(&ascii) {
            let trimmed = ascii.strip_suffix('.').unwrap_or(&ascii);
            let ip: Ipv4Addr = trimmed.parse().map_err(|_| HostError::InvalidIpv4)?;
            return Ok(Self::from_ipv4(ip));
        }

        if strictness == HostStrictness::Strict {
            Self::validate_domain(&ascii)?;
        }

        let (unicode, _) = idna::domain_to_unicode(&ascii);
        Ok(Self {
            kind: HostKind::Domain,
            ascii,
            unicode,
        })
    }

    /// Creates a host from an IPv4 address.
    #[must_use]
    pub fn from_ipv4(ip: Ipv4Addr) -> Self {
        let text = ip.to_string();
        Self {
            kind: HostKind::Ipv4(ip),
            ascii: text.clone(),
            unicode: text,
        }
    }

    /// Creates a host from an IPv6 address.
    #[must_use]
    pub fn from_ipv6(ip: Ipv6Addr) -> Self {
        let text = format!("[{ip}]");
        Self {
            kind: HostKind::Ipv6(ip),
            ascii: text.clone(),
            unicode: text,
        }
    }

    /// Returns the host kind.
    #[must_use]
    pub const fn kind(&self) -> HostKind {
        self.kind
    }

    /// Returns the ASCII form (punycode labels, IPv6 in brackets).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.ascii
    }

    /// Returns the unicode form.
    #[must_use]
    pub fn unicode_str(&self) -> &str {
        &self.unicode
    }

    /// Returns true for domain names.
    #[must_use]
    pub const fn is_domain(&self) -> bool {
        matches!(self.kind, HostKind::Domain)
    }

    /// Returns true if this is a localhost address.
    #[must_use]
    pub fn is_localhost(&self) -> bool {
        match self.kind {
            HostKind::Domain => self.ascii == "localhost",
            HostKind::Ipv4(ip) => ip.is_loopback(),
            HostKind::Ipv6(ip) => ip.is_loopback(),
        }
    }

    fn parse_ipv6_literal(input: &str) -> Result<Self, HostError> {
        let inner = input
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .ok_or(HostError::InvalidIpv6)?;
        let ip: Ipv6Addr = inner.parse().map_err(|_| HostError::InvalidIpv6)?;
        Ok(Self::from_ipv6(ip))
    }

    const fn is_forbidden(c: char) -> bool {
        c.is_ascii_control()
            || matches!(
                c,
                ' ' | '#' | '%' | '/' | ':' | '<' | '>' | '?' | '@' | '[' | '\\' | ']' | '^' | '|'
            )
    }

    fn ends_in_number(ascii: &str) -> bool {
        let trimmed = ascii.strip_suffix('.').unwrap_or(ascii);
        trimmed
            .rsplit('.')
            .next()
            .is_some_and(|last| !last.is_empty() && last.bytes().all(|b| b.is_ascii_digit()))
    }

    fn validate_domain(domain: &str) -> Result<(), HostError> {
        if domain.len() > MAX_DNS_DOMAIN_LENGTH {
            return Err(HostError::TooLong);
        }

        for label in domain.split('.') {
            if label.is_empty() {
                return Err(HostError::InvalidLabel {
                    reason: "empty label (consecutive dots or leading/trailing dot)",
                });
            }

            if label.len() > MAX_DNS_LABEL_LENGTH {
                return Err(HostError::InvalidLabel {
                    reason: "label exceeds 63 characters",
                });
            }

            if let Some(c) = label.chars().find(|&c| !c.is_ascii_alphanumeric() && c != '-') {
                return Err(HostError::ForbiddenChar { char: c });
            }

            if label.starts_with('-') || label.ends_with('-') {
                return Err(HostError::InvalidLabel {
                    reason: "label cannot start or end with hyphen",
                });
            }
        }

        Ok(())
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ascii)
    }
}

impl AsRef<str> for Host {
    fn as_ref(&self) -> &str {
        &self.ascii
    }
}

impl PartialOrd for Host {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Host {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind
            .cmp(&other.kind)
            .then_with(|| self.ascii.cmp(&other.ascii))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lenient(s: &str) -> Result<Host, HostError> {
        Host::parse(s, HostStrictness::Lenient)
    }

    fn strict(s: &str) -> Result<Host, HostError> {
        Host::parse(s, HostStrictness::Strict)
    }

    #[test]
    fn parse_domain() {
        let host = lenient("example.com").unwrap();
        assert_eq!(host.kind(), HostKind::Domain);
        assert_eq!(host.as_str(), "example.com");
        assert_eq!(host.unicode_str(), "example.com");
    }

    #[test]
    fn normalizes_to_lowercase() {
        let host = lenient("EXAMPLE.Com").unwrap();
        assert_eq!(host.as_str(), "example.com");
    }

    #[test]
    fn idn_keeps_both_forms() {
        let host = lenient("m\u{fc}nchen.de").unwrap();
        assert_eq!(host.as_str(), "xn--mnchen-3ya.de");
        assert_eq!(host.unicode_str(), "m\u{fc}nchen.de");
    }

    #[test]
    fn punycode_input_derives_unicode() {
        let host = lenient("xn--bcher-kva.example").unwrap();
        assert_eq!(host.unicode_str(), "b\u{fc}cher.example");
    }

    #[test]
    fn percent_encoded_host_is_decoded() {
        let host = lenient("exa%6Dple.com").unwrap();
        assert_eq!(host.as_str(), "example.com");
    }

    #[test]
    fn parse_ipv4() {
        let host = lenient("192.168.1.1").unwrap();
        assert!(matches!(host.kind(), HostKind::Ipv4(_)));
        assert_eq!(host.as_str(), "192.168.1.1");
    }

    #[test]
    fn numeric_tail_must_be_ipv4() {
        assert_eq!(lenient("1.2.3.256"), Err(HostError::InvalidIpv4));
        assert_eq!(lenient("example.123"), Err(HostError::InvalidIpv4));
    }

    #[test]
    fn parse_ipv6_literal() {
        let host = lenient("[2001:DB8::1]").unwrap();
        assert!(matches!(host.kind(), HostKind::Ipv6(_)));
        assert_eq!(host.as_str(), "[2001:db8::1]");
    }

    #[test]
    fn parse_bad_ipv6_fails() {
        assert_eq!(lenient("[::g]"), Err(HostError::InvalidIpv6));
        assert_eq!(lenient("[::1"), Err(HostError::InvalidIpv6));
    }

    #[test]
    fn forbidden_char_fails() {
        assert!(lenient("exa mple.com").is_err());
        assert!(lenient("a<b.com").is_err());
    }

    #[test]
    fn lenient_allows_underscore() {
        assert!(lenient("my_host.internal").is_ok());
    }

    #[test]
    fn strict_rejects_underscore() {
        assert!(strict("my_host.internal").is_err());
    }

    #[test]
    fn strict_rejects_empty_label() {
        assert!(strict("invalid..domain").is_err());
    }

    #[test]
    fn strict_rejects_leading_hyphen() {
        assert!(strict("-invalid.com").is_err());
    }

    #[test]
    fn empty_fails() {
        assert_eq!(lenient(""), Err(HostError::Empty));
    }

    #[test]
    fn localhost_detection() {
        assert!(lenient("localhost").unwrap().is_localhost());
        assert!(lenient("127.0.0.1").unwrap().is_localhost());
        assert!(lenient("[::1]").unwrap().is_localhost());
        assert!(!lenient("example.com").unwrap().is_localhost());
    }
}
