//! Constants for URL and email validation.

/// DNS label maximum length.
pub const MAX_DNS_LABEL_LENGTH: usize = 63;

/// DNS domain maximum length.
pub const MAX_DNS_DOMAIN_LENGTH: usize = 253;

/// Maximum length of an email local part in octets.
pub const MAX_LOCAL_PART_LENGTH: usize = 64;

/// Maximum length of a complete email address in octets.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Well-known schemes and their implicit ports.
pub const DEFAULT_PORTS: &[(&str, u16)] = &[
    ("http", 80),
    ("https", 443),
    ("ws", 80),
    ("wss", 443),
    ("ftp", 21),
];

/// Schemes with hierarchical paths and mandatory host handling.
pub const SPECIAL_SCHEMES: &[&str] = &["http", "https", "ws", "wss", "ftp", "file"];

/// Returns the implicit port for `scheme`, if it has one.
///
/// ```
/// use schema_url::default_port;
///
/// assert_eq!(default_port("https"), Some(443));
/// assert_eq!(default_port("postgres"), None);
/// ```
#[must_use]
pub fn default_port(scheme: &str) -> Option<u16> {
    DEFAULT_PORTS
        .iter()
        .find(|(name, _)| *name == scheme)
        .map(|&(_, port)| port)
}

/// Returns true if `scheme` is one of the special schemes.
#[must_use]
pub fn is_special_scheme(scheme: &str) -> bool {
    SPECIAL_SCHEMES.contains(&scheme)
}

/// Returns true if `scheme` cannot be used without a host.
#[must_use]
pub fn requires_host(scheme: &str) -> bool {
    is_special_scheme(scheme) && scheme != "file"
}
