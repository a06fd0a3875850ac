//! Grammar scanner: splits a URL string into its syntactic regions.
//!
//! ```text
//! url       = scheme ":" [ "//" authority ] path [ "?" query ] [ "#" fragment ]
//! authority = [ userinfo "@" ] host [ ":" port ]
//! userinfo  = username [ ":" password ]
//! ```
//!
//! The scanner interprets nothing beyond what is needed to find the
//! regions: the scheme is lowercased and the port is range-checked, every
//! other component is returned as a raw slice of the input.

use std::borrow::Cow;
use std::ops::Range;

use crate::constants::requires_host;
use crate::error::{ParseError, ParseErrorKind};

/// The raw regions of a URL, borrowed from the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlComponents<'a> {
    input: &'a str,
    scheme: Cow<'a, str>,
    scheme_span: Range<usize>,
    has_authority: bool,
    username: Option<&'a str>,
    password: Option<&'a str>,
    host: &'a str,
    port: Option<u16>,
    port_str: Option<&'a str>,
    path: &'a str,
    query: Option<&'a str>,
    fragment: Option<&'a str>,
}

impl<'a> UrlComponents<'a> {
    /// Returns the full input the components were scanned from.
    #[must_use]
    pub const fn input(&self) -> &'a str {
        self.input
    }

    /// Returns the lowercased scheme.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns the byte span of the scheme in the input.
    #[must_use]
    pub fn scheme_span(&self) -> Range<usize> {
        self.scheme_span.clone()
    }

    /// Returns true if the input had a `//` authority.
    #[must_use]
    pub const fn has_authority(&self) -> bool {
        self.has_authority
    }

    /// Returns the raw username, if userinfo was present.
    #[must_use]
    pub const fn username(&self) -> Option<&'a str> {
        self.username
    }

    /// Returns the raw password, if present.
    #[must_use]
    pub const fn password(&self) -> Option<&'a str> {
        self.password
    }

    /// Returns the raw host; empty when there is none.
    #[must_use]
    pub const fn host(&self) -> &'a str {
        self.host
    }

    /// Returns the explicit port.
    #[must_use]
    pub const fn port(&self) -> Option<u16> {
        self.port
    }

    /// Returns the raw port digits.
    #[must_use]
    pub const fn port_str(&self) -> Option<&'a str> {
        self.port_str
    }

    /// Returns the raw path.
    #[must_use]
    pub const fn path(&self) -> &'a str {
        self.path
    }

    /// Returns the path segments in order.
    pub fn path_segments(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        let path = self.path;
        (!path.is_empty())
            .then(|| path.strip_prefix('/').unwrap_or(path).split('/'))
            .into_iter()
            .flatten()
    }

    /// Returns the raw query, without the leading `?`.
    #[must_use]
    pub const fn query(&self) -> Option<&'a str> {
        self.query
    }

    /// Returns the raw fragment, without the leading `#`.
    #[must_use]
    pub const fn fragment(&self) -> Option<&'a str> {
        self.fragment
    }

    /// Returns the byte span of `part`, which must be a slice of the input.
    #[must_use]
    pub fn span_of(&self, part: &str) -> Range<usize> {
        span_in(self.input, part)
    }
}

/// Scans `input` into its URL regions.
///
/// # Errors
///
/// Returns `ParseError` with kind:
/// - `Empty` if the input is blank
/// - `MissingScheme` if there is no `scheme:` prefix
/// - `InvalidPort` if the port is not numeric or exceeds 65535
/// - `EmptyHost` if the scheme requires a host and none was given
///
/// # Examples
///
/// ```
/// use schema_url::scan;
///
/// let parts = scan("HTTPS://user:pw@example.com:8443/a/b?x=1#top").unwrap();
/// assert_eq!(parts.scheme(), "https");
/// assert_eq!(parts.username(), Some("user"));
/// assert_eq!(parts.password(), Some("pw"));
/// assert_eq!(parts.host(), "example.com");
/// assert_eq!(parts.port(), Some(8443));
/// assert_eq!(parts.path(), "/a/b");
/// assert_eq!(parts.query(), Some("x=1"));
/// assert_eq!(parts.fragment(), Some("top"));
/// ```
pub fn scan(input: &str) -> Result<UrlComponents<'_>, ParseError> {
    let trimmed = input.trim_matches(|c: char| c <= ' ');
    if trimmed.is_empty() {
        return Err(ParseError::new(input, 0..input.len(), ParseErrorKind::Empty));
    }

    let scheme_len = scheme_length(trimmed).ok_or_else(|| {
        ParseError::new(input, span_in(input, trimmed), ParseErrorKind::MissingScheme)
    })?;
    let raw_scheme = &trimmed[..scheme_len];
    let scheme = if raw_scheme.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(raw_scheme.to_ascii_lowercase())
    } else {
        Cow::Borrowed(raw_scheme)
    };
    let scheme_span = span_in(input, raw_scheme);
    let rest = &trimmed[scheme_len + 1..];

    let mut components = UrlComponents {
        input,
        scheme,
        scheme_span,
        has_authority: false,
        username: None,
        password: None,
        host: &rest[..0],
        port: None,
        port_str: None,
        path: rest,
        query: None,
        fragment: None,
    };

    let tail = if let Some(after) = rest.strip_prefix("//") {
        let authority_end = after.find(['/', '?', '#']).unwrap_or(after.len());
        scan_authority(&mut components, &after[..authority_end])?;
        &after[authority_end..]
    } else {
        if requires_host(&components.scheme) {
            return Err(ParseError::new(
                input,
                span_in(input, &rest[..0]),
                ParseErrorKind::EmptyHost,
            ));
        }
        rest
    };

    let (before_fragment, fragment) = match tail.find('#') {
        Some(idx) => (&tail[..idx], Some(&tail[idx + 1..])),
        None => (tail, None),
    };
    let (path, query) = match before_fragment.find('?') {
        Some(idx) => (&before_fragment[..idx], Some(&before_fragment[idx + 1..])),
        None => (before_fragment, None),
    };

    components.path = path;
    components.query = query;
    components.fragment = fragment;
    Ok(components)
}

fn scan_authority<'a>(
    components: &mut UrlComponents<'a>,
    authority: &'a str,
) -> Result<(), ParseError> {
    let input = components.input;
    components.has_authority = true;

    let host_port = match authority.rfind('@') {
        Some(at) => {
            let userinfo = &authority[..at];
            match userinfo.find(':') {
                Some(colon) => {
                    components.username = Some(&userinfo[..colon]);
                    components.password = Some(&userinfo[colon + 1..]);
                }
                None => components.username = Some(userinfo),
            }
            &authority[at + 1..]
        }
        None => authority,
    };

    let (host, port_str) = split_host_port(input, host_port)?;
    components.host = host;

    if let Some(digits) = port_str.filter(|p| !p.is_empty()) {
        let invalid = || {
            ParseError::new(
                input,
                span_in(input, digits),
                ParseErrorKind::InvalidPort {
                    value: digits.to_string(),
                },
            )
        };
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let port = digits
            .parse::<u32>()
            .ok()
            .and_then(|p| u16::try_from(p).ok())
            .ok_or_else(invalid)?;
        components.port = Some(port);
        components.port_str = Some(digits);
    }

    if host.is_empty() && requires_host(&components.scheme) {
        return Err(ParseError::new(
            input,
            span_in(input, host),
            ParseErrorKind::EmptyHost,
        ));
    }

    Ok(())
}

fn split_host_port<'a>(
    input: &str,
    host_port: &'a str,
) -> Result<(&'a str, Option<&'a str>), ParseError> {
    if host_port.starts_with('[') {
        let Some(close) = host_port.find(']') else {
            return Ok((host_port, None));
        };
        let host = &host_port[..=close];
        let after = &host_port[close + 1..];
        if after.is_empty() {
            return Ok((host, None));
        }
        return match after.strip_prefix(':') {
            Some(port) => Ok((host, Some(port))),
            None => Err(ParseError::new(
                input,
                span_in(input, after),
                ParseErrorKind::InvalidPort {
                    value: after.to_string(),
                },
            )),
        };
    }

    Ok(match host_port.rfind(':') {
        Some(colon) => (&host_port[..colon], Some(&host_port[colon + 1..])),
        None => (host_port, None),
    })
}

/// Length of the leading scheme, if `input` starts with `scheme ":"`.
fn scheme_length(input: &str) -> Option<usize> {
    let bytes = input.as_bytes();
    if !bytes.first()?.is_ascii_alphabetic() {
        return None;
    }
    let len = bytes
        .iter()
        .position(|&b| !(b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.')))?;
    (bytes[len] == b':').then_some(len)
}

/// Byte span of `part` within `input`; `part` must be a subslice.
pub(crate) fn span_in(input: &str, part: &str) -> Range<usize> {
    let start = (part.as_ptr() as usize)
        .saturating_sub(input.as_ptr() as usize)
        .min(input.len());
    start..(start + part.len()).min(input.len())
}
