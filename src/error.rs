//! Error types for URL and email validation.

use std::fmt;
use std::ops::Range;

/// Errors that can occur when validating a URL or an email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The input that failed to validate
    pub input: String,
    /// Byte range of the offending region within `input`
    pub span: Range<usize>,
    /// The specific error that occurred
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Creates an error for `input` pointing at `span`.
    #[must_use]
    pub fn new(input: &str, span: Range<usize>, kind: ParseErrorKind) -> Self {
        Self {
            input: input.to_string(),
            span,
            kind,
        }
    }

    /// Returns the slice of the input the error points at.
    #[must_use]
    pub fn span_text(&self) -> &str {
        self.input.get(self.span.clone()).unwrap_or_default()
    }
}

/// Specific validation error types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input is empty (or only whitespace)
    Empty,
    /// Input exceeds the configured maximum length
    TooLong {
        /// Maximum allowed length
        max: usize,
        /// Actual length
        actual: usize,
    },
    /// No `scheme:` prefix was found
    MissingScheme,
    /// The scheme requires a host but none was given
    EmptyHost,
    /// Port is not numeric or out of the 16-bit range
    InvalidPort {
        /// The offending port text
        value: String,
    },
    /// The scheme is not in the accepted set
    UnsupportedScheme {
        /// The scheme that was found
        scheme: String,
        /// The schemes that would have been accepted
        expected: Vec<String>,
    },
    /// The host could not be mapped to its ASCII form
    HostNormalizationFailed {
        /// The host as written
        host: String,
        /// Reason for the failure
        reason: &'static str,
    },
    /// Email address has no `@` separator
    MissingAtSign,
    /// Email local part is malformed
    InvalidLocalPart {
        /// Reason for invalidity
        reason: &'static str,
    },
    /// Email domain is malformed
    InvalidDomain {
        /// Reason for invalidity
        reason: &'static str,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to validate '{}': ", self.input)?;
        match &self.kind {
            ParseErrorKind::Empty => write!(f, "input is empty"),
            ParseErrorKind::TooLong { max, actual } => {
                write!(f, "length {actual} exceeds maximum {max}")
            }
            ParseErrorKind::MissingScheme => {
                write!(f, "relative URL without a base; expected a 'scheme:' prefix")
            }
            ParseErrorKind::EmptyHost => write!(f, "empty host"),
            ParseErrorKind::InvalidPort { value } => {
                write!(f, "invalid port '{value}'; port must be 0-65535")
            }
            ParseErrorKind::UnsupportedScheme { scheme, expected } => {
                write!(
                    f,
                    "scheme '{scheme}' is not allowed; expected one of {}",
                    expected.join(", ")
                )
            }
            ParseErrorKind::HostNormalizationFailed { host, reason } => {
                write!(f, "invalid host '{host}': {reason}")
            }
            ParseErrorKind::MissingAtSign => {
                write!(f, "an email address must have an @-sign")
            }
            ParseErrorKind::InvalidLocalPart { reason } => {
                write!(f, "invalid local part at {}..{}: {reason}", self.span.start, self.span.end)
            }
            ParseErrorKind::InvalidDomain { reason } => {
                write!(f, "invalid domain at {}..{}: {reason}", self.span.start, self.span.end)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors raised by host validation before they are tied to an input span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// Host is empty
    Empty,
    /// Host is not valid percent-encoded UTF-8
    InvalidEncoding,
    /// IPv6 literal is malformed
    InvalidIpv6,
    /// Numeric host is not a valid IPv4 address
    InvalidIpv4,
    /// Unicode to ASCII mapping rejected a label
    Idna,
    /// A code point that may not appear in a host
    ForbiddenChar {
        /// The offending character
        char: char,
    },
    /// Label is empty, too long, or has a misplaced hyphen
    InvalidLabel {
        /// Reason for invalidity
        reason: &'static str,
    },
    /// Domain exceeds 253 characters
    TooLong,
}

impl HostError {
    /// Short human-readable reason.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Empty => "host is empty",
            Self::InvalidEncoding => "host is not valid percent-encoded UTF-8",
            Self::InvalidIpv6 => "invalid IPv6 address",
            Self::InvalidIpv4 => "invalid IPv4 address",
            Self::Idna => "invalid international domain name",
            Self::ForbiddenChar { .. } => "invalid domain character",
            Self::InvalidLabel { reason } => reason,
            Self::TooLong => "domain exceeds 253 character limit",
        }
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ForbiddenChar { char } => write!(f, "invalid domain character '{char}'"),
            other => write!(f, "{}", other.reason()),
        }
    }
}

impl std::error::Error for HostError {}
