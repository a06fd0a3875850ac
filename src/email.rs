//! Email address validation.
//!
//! ```text
//! address    = local-part "@" domain
//! local-part = dot-atom / quoted-string        ; quoted only when enabled
//! dot-atom   = 1*atext *( "." 1*atext )
//! domain     = host / "[" ( ipv4 / "IPv6:" ipv6 ) "]"   ; literals only when enabled
//! ```
//!
//! Domains use the same host normalization as URLs, in strict mode.

use std::cmp::Ordering;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::config::{EmailConfig, HostStrictness};
use crate::constants::{MAX_EMAIL_LENGTH, MAX_LOCAL_PART_LENGTH};
use crate::error::{HostError, ParseError, ParseErrorKind};
use crate::host::{Host, HostKind};
use crate::scanner::span_in;

/// Punctuation allowed unquoted in a local part, besides `.`.
const ATEXT_PUNCTUATION: &str = "!#$%&'*+-/=?^_`{|}~";

/// A validated email address.
///
/// # Examples
///
/// ```
/// use schema_url::Email;
///
/// let email = Email::parse("levostatnigrosh@gmail.com").unwrap();
/// assert_eq!(email.local_part(), "levostatnigrosh");
/// assert_eq!(email.domain(), "gmail.com");
/// assert_eq!(email.as_str(), "levostatnigrosh@gmail.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email {
    local_part: String,
    domain: String,
    ascii_domain: String,
    domain_literal: Option<IpAddr>,
    /// `local@domain` with the unicode domain
    normalized: String,
}

/// Validates `input` as an email address with the default configuration.
///
/// # Errors
///
/// See [`EmailConfig::validate`].
pub fn validate_email(input: &str) -> Result<Email, ParseError> {
    EmailConfig::default().validate(input)
}

impl EmailConfig {
    /// Validates `input` as an email address under this configuration.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` with kind:
    /// - `Empty` if the input is blank
    /// - `TooLong` if the address exceeds 254 characters
    /// - `MissingAtSign` if there is no `@`
    /// - `InvalidLocalPart` if the part before the `@` is malformed
    /// - `InvalidDomain` if the part after the `@` is malformed
    ///
    /// # Examples
    ///
    /// ```
    /// use schema_url::EmailConfig;
    ///
    /// let config = EmailConfig::new().allow_domain_literal(true);
    /// let email = config.validate("root@[127.0.0.1]").unwrap();
    /// assert!(email.domain_literal().is_some());
    /// ```
    pub fn validate(&self, input: &str) -> Result<Email, ParseError> {
        let result = self.validate_inner(input);
        if let Err(e) = &result {
            tracing::debug!(kind = ?e.kind, span = ?e.span, "email rejected");
        }
        result
    }

    fn validate_inner(&self, input: &str) -> Result<Email, ParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ParseError::new(input, 0..input.len(), ParseErrorKind::Empty));
        }

        if trimmed.len() > MAX_EMAIL_LENGTH {
            return Err(ParseError::new(
                input,
                span_in(input, trimmed),
                ParseErrorKind::TooLong {
                    max: MAX_EMAIL_LENGTH,
                    actual: trimmed.len(),
                },
            ));
        }

        let (local, domain) = self.split(input, trimmed)?;

        self.check_local_part(local).map_err(|reason| {
            ParseError::new(
                input,
                span_in(input, local),
                ParseErrorKind::InvalidLocalPart { reason },
            )
        })?;

        let (host, domain_literal) = self.check_domain(domain).map_err(|reason| {
            ParseError::new(
                input,
                span_in(input, domain),
                ParseErrorKind::InvalidDomain { reason },
            )
        })?;

        let (domain, ascii_domain) = match domain_literal {
            Some(IpAddr::V4(ip)) => (format!("[{ip}]"), format!("[{ip}]")),
            Some(IpAddr::V6(ip)) => (format!("[IPv6:{ip}]"), format!("[IPv6:{ip}]")),
            None => (host.unicode_str().to_string(), host.as_str().to_string()),
        };

        let normalized = format!("{local}@{domain}");
        tracing::trace!(email = %normalized, "email accepted");

        Ok(Email {
            local_part: local.to_string(),
            domain,
            ascii_domain,
            domain_literal,
            normalized,
        })
    }

    fn split<'a>(&self, input: &str, address: &'a str) -> Result<(&'a str, &'a str), ParseError> {
        if self.allow_quoted_local && address.starts_with('"') {
            if let Some(close) = closing_quote(address) {
                let after = &address[close + 1..];
                return match after.strip_prefix('@') {
                    Some(domain) => Ok((&address[..=close], domain)),
                    None if after.contains('@') => Err(ParseError::new(
                        input,
                        span_in(input, after),
                        ParseErrorKind::InvalidLocalPart {
                            reason: "unexpected text after quoted local part",
                        },
                    )),
                    None => Err(ParseError::new(
                        input,
                        span_in(input, address),
                        ParseErrorKind::MissingAtSign,
                    )),
                };
            }
        }

        let at = address.rfind('@').ok_or_else(|| {
            ParseError::new(input, span_in(input, address), ParseErrorKind::MissingAtSign)
        })?;
        Ok((&address[..at], &address[at + 1..]))
    }

    fn check_local_part(&self, local: &str) -> Result<(), &'static str> {
        if local.is_empty() {
            return if self.allow_empty_local {
                Ok(())
            } else {
                Err("there must be something before the @-sign")
            };
        }

        if local.len() > MAX_LOCAL_PART_LENGTH {
            return Err("local part is longer than 64 characters");
        }

        if local.len() >= 2 && local.starts_with('"') && local.ends_with('"') {
            if !self.allow_quoted_local {
                return Err("quoted local parts are not allowed");
            }
            return self.check_quoted(&local[1..local.len() - 1]);
        }

        if local.starts_with('.') || local.ends_with('.') {
            return Err("local part cannot start or end with a period");
        }

        if local.contains("..") {
            return Err("local part cannot contain two periods in a row");
        }

        for c in local.chars() {
            if c.is_ascii_alphanumeric() || c == '.' || ATEXT_PUNCTUATION.contains(c) {
                continue;
            }
            if c == '@' {
                return Err("local part cannot contain an @-sign");
            }
            if !c.is_ascii() {
                if !self.allow_smtputf8 {
                    return Err("internationalized characters before the @-sign are not allowed");
                }
                if c.is_alphanumeric() {
                    continue;
                }
            }
            return Err("local part contains an invalid character");
        }

        Ok(())
    }

    fn check_quoted(&self, inner: &str) -> Result<(), &'static str> {
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    if chars.next().is_none() {
                        return Err("quoted local part ends with a backslash");
                    }
                }
                '"' => return Err("unescaped quote in quoted local part"),
                ' '..='~' => {}
                _ if !c.is_ascii() && self.allow_smtputf8 && !c.is_control() => {}
                _ if !c.is_ascii() => {
                    return Err("internationalized characters before the @-sign are not allowed");
                }
                _ => return Err("quoted local part contains a control character"),
            }
        }
        Ok(())
    }

    fn check_domain(&self, domain: &str) -> Result<(Host, Option<IpAddr>), &'static str> {
        if domain.is_empty() {
            return Err("there must be something after the @-sign");
        }

        if domain.starts_with('[') {
            if !self.allow_domain_literal {
                return Err("domain literals are not allowed");
            }
            let ip = parse_domain_literal(domain)?;
            let host = match ip {
                IpAddr::V4(v4) => Host::from_ipv4(v4),
                IpAddr::V6(v6) => Host::from_ipv6(v6),
            };
            return Ok((host, Some(ip)));
        }

        // URL hosts may be percent-encoded; mail domains may not.
        if domain.contains('%') {
            return Err("domain contains an invalid character");
        }

        let host = Host::parse(domain, HostStrictness::Strict).map_err(|e| match e {
            HostError::InvalidIpv4 => "top-level domain cannot be all-numeric",
            other => other.reason(),
        })?;

        match host.kind() {
            HostKind::Domain if !host.as_str().contains('.') => {
                Err("domain must contain a period")
            }
            HostKind::Domain => Ok((host, None)),
            HostKind::Ipv4(_) | HostKind::Ipv6(_) => {
                Err("domain cannot be a bare IP address; use a bracketed domain literal")
            }
        }
    }
}

impl Email {
    /// Validates an email address with the default configuration.
    ///
    /// # Errors
    ///
    /// See [`EmailConfig::validate`].
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        validate_email(input)
    }

    /// Validates an email address under `config`.
    ///
    /// # Errors
    ///
    /// See [`EmailConfig::validate`].
    pub fn parse_with(input: &str, config: &EmailConfig) -> Result<Self, ParseError> {
        config.validate(input)
    }

    /// Returns the local part (before the `@`).
    #[must_use]
    pub fn local_part(&self) -> &str {
        &self.local_part
    }

    /// Returns the domain in unicode form.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns the domain in ASCII form.
    #[must_use]
    pub fn ascii_domain(&self) -> &str {
        &self.ascii_domain
    }

    /// Returns the address of a bracketed domain literal.
    #[must_use]
    pub const fn domain_literal(&self) -> Option<IpAddr> {
        self.domain_literal
    }

    /// Returns the normalized address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// Returns the address with the ASCII domain.
    #[must_use]
    pub fn ascii_email(&self) -> String {
        format!("{}@{}", self.local_part, self.ascii_domain)
    }
}

/// Index of the quote closing a quoted string that starts at index 0.
fn closing_quote(s: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in s.char_indices().skip(1) {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return Some(i),
            _ => {}
        }
    }
    None
}

fn parse_domain_literal(domain: &str) -> Result<IpAddr, &'static str> {
    let inner = domain
        .strip_prefix('[')
        .and_then(|d| d.strip_suffix(']'))
        .ok_or("unterminated domain literal")?;

    let v6 = inner
        .get(..5)
        .filter(|tag| tag.eq_ignore_ascii_case("IPv6:"))
        .map(|_| &inner[5..]);

    match v6 {
        Some(addr) => addr
            .parse::<Ipv6Addr>()
            .map(IpAddr::V6)
            .map_err(|_| "invalid IPv6 address in domain literal"),
        None => inner
            .parse::<Ipv4Addr>()
            .map(IpAddr::V4)
            .map_err(|_| "invalid IPv4 address in domain literal"),
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

impl FromStr for Email {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.normalized
    }
}

impl TryFrom<&str> for Email {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl PartialOrd for Email {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Email {
    fn cmp(&self, other: &Self) -> Ordering {
        self.normalized.cmp(&other.normalized)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Email {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.normalized)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Email {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
