//! Main validated URL type.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::config::UrlConfig;
use crate::constants::{default_port, is_special_scheme};
use crate::error::{ParseError, ParseErrorKind};
use crate::host::Host;
use crate::normalizer::normalize;
use crate::query::QueryParams;
use crate::scanner::scan;

/// A parsed, validated and normalized URL.
///
/// `Url` is immutable. It keeps every component in normalized form and
/// its canonical ASCII serialization.
///
/// # Structure
///
/// ```text
/// scheme ":" [ "//" [ username [ ":" password ] "@" ] host [ ":" port ] ] path [ "?" query ] [ "#" fragment ]
/// ```
///
/// # Examples
///
/// ```
/// use schema_url::Url;
///
/// let url = Url::parse("https://example.com/foo/bar?baz=qux#quux").unwrap();
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_str(), Some("example.com"));
/// assert_eq!(url.port(), Some(443));
/// assert_eq!(url.path(), "/foo/bar");
/// assert_eq!(url.query(), Some("baz=qux"));
/// assert_eq!(url.fragment(), Some("quux"));
/// assert_eq!(url.to_string(), "https://example.com/foo/bar?baz=qux#quux");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Url {
    scheme: String,
    has_authority: bool,
    username: Option<String>,
    password: Option<String>,
    host: Option<Host>,
    port: Option<u16>,
    path: String,
    query: Option<String>,
    query_params: QueryParams,
    fragment: Option<String>,
    /// Canonical ASCII serialization
    serialization: String,
}

/// Normalized components handed over by the normalizer.
pub(crate) struct UrlParts {
    pub(crate) scheme: String,
    pub(crate) has_authority: bool,
    pub(crate) username: Option<String>,
    pub(crate) password: Option<String>,
    pub(crate) host: Option<Host>,
    pub(crate) port: Option<u16>,
    pub(crate) path: String,
    pub(crate) query: Option<String>,
    pub(crate) fragment: Option<String>,
}

impl Url {
    /// Parses a URL, accepting any scheme.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if:
    /// - The input is empty or has no scheme
    /// - The port is not a valid 16-bit number
    /// - The scheme requires a host and none is present
    /// - The host cannot be normalized
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Self::parse_with(input, &UrlConfig::default())
    }

    /// Parses a URL under the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` for every failure [`Url::parse`] reports, and
    /// additionally if the input is too long, the scheme is not allowed, or
    /// a required host is missing.
    ///
    /// # Examples
    ///
    /// ```
    /// use schema_url::{ParseErrorKind, Url, UrlConfig};
    ///
    /// let config = UrlConfig::new().allowed_schemes(["https"]);
    /// let err = Url::parse_with("http://example.com/", &config).unwrap_err();
    /// assert!(matches!(err.kind, ParseErrorKind::UnsupportedScheme { .. }));
    /// ```
    pub fn parse_with(input: &str, config: &UrlConfig) -> Result<Self, ParseError> {
        let result = match scan(input) {
            Ok(components) => normalize(components, config),
            Err(err) => match Self::fill_default_host(&err, config) {
                Some(filled) => scan(&filled).and_then(|components| normalize(components, config)),
                None => Err(err),
            },
        };
        match &result {
            Ok(url) => tracing::trace!(url = %url, "url accepted"),
            Err(e) => tracing::debug!(
                kind = ?e.kind,
                span = ?e.span,
                "url rejected"
            ),
        }
        result
    }

    /// Splices `config.default_host` into an input whose authority has an
    /// empty host, so special schemes can fall back to it.
    fn fill_default_host(err: &ParseError, config: &UrlConfig) -> Option<String> {
        let host = config.default_host.as_deref()?;
        if err.kind != ParseErrorKind::EmptyHost || !err.span.is_empty() {
            return None;
        }
        let before = err.input.get(..err.span.start)?;
        let after = err.input.get(err.span.start..)?;
        (before.ends_with("//") || before.ends_with('@')).then(|| format!("{before}{host}{after}"))
    }

    pub(crate) fn from_parts(parts: UrlParts) -> Self {
        let query_params = parts
            .query
            .as_deref()
            .map(QueryParams::parse)
            .unwrap_or_default();
        let mut url = Self {
            scheme: parts.scheme,
            has_authority: parts.has_authority,
            username: parts.username,
            password: parts.password,
            host: parts.host,
            port: parts.port,
            path: parts.path,
            query: parts.query,
            query_params,
            fragment: parts.fragment,
            serialization: String::new(),
        };
        url.serialization = url.serialize(false);
        url
    }

    /// Returns the lowercase scheme.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns true for the special schemes (`http`, `https`, `ws`, `wss`, `ftp`, `file`).
    #[must_use]
    pub fn is_special(&self) -> bool {
        is_special_scheme(&self.scheme)
    }

    /// Returns true if the URL has a `//` authority.
    #[must_use]
    pub const fn has_authority(&self) -> bool {
        self.has_authority
    }

    /// Returns the percent-encoded username, if present.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns the percent-encoded password, if present.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Returns the host.
    #[must_use]
    pub const fn host(&self) -> Option<&Host> {
        self.host.as_ref()
    }

    /// Returns the host in ASCII form.
    #[must_use]
    pub fn host_str(&self) -> Option<&str> {
        self.host.as_ref().map(Host::as_str)
    }

    /// Returns the host in unicode form.
    ///
    /// ```
    /// use schema_url::Url;
    ///
    /// let url = Url::parse("https://xn--bcher-kva.example/").unwrap();
    /// assert_eq!(url.unicode_host(), Some("b\u{fc}cher.example"));
    /// ```
    #[must_use]
    pub fn unicode_host(&self) -> Option<&str> {
        self.host.as_ref().map(Host::unicode_str)
    }

    /// Returns the effective port: explicit, configured default, or scheme default.
    #[must_use]
    pub const fn port(&self) -> Option<u16> {
        self.port
    }

    /// Returns the normalized path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the path segments in order.
    pub fn path_segments(&self) -> impl Iterator<Item = &str> {
        let path = self.path.as_str();
        (!path.is_empty())
            .then(|| path.strip_prefix('/').unwrap_or(path).split('/'))
            .into_iter()
            .flatten()
    }

    /// Returns the query string without the leading `?`.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Returns the query as ordered key/value pairs.
    ///
    /// ```
    /// use schema_url::Url;
    ///
    /// let url = Url::parse("https://example.com/?baz=qux&baz=zap").unwrap();
    /// let pairs: Vec<_> = url.query_params().iter().collect();
    /// assert_eq!(pairs, vec![("baz", "qux"), ("baz", "zap")]);
    /// ```
    #[must_use]
    pub const fn query_params(&self) -> &QueryParams {
        &self.query_params
    }

    /// Returns the fragment without the leading `#`.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Returns the canonical serialization with an ASCII host.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.serialization
    }

    /// Returns the serialization with the host in unicode form.
    ///
    /// ```
    /// use schema_url::Url;
    ///
    /// let url = Url::parse("https://B\u{fc}cher.example/a").unwrap();
    /// assert_eq!(url.as_str(), "https://xn--bcher-kva.example/a");
    /// assert_eq!(url.unicode_string(), "https://b\u{fc}cher.example/a");
    /// ```
    #[must_use]
    pub fn unicode_string(&self) -> String {
        match &self.host {
            Some(host) if host.as_str() != host.unicode_str() => self.serialize(true),
            _ => self.serialization.clone(),
        }
    }

    /// Returns true if the host is a loopback address or `localhost`.
    #[must_use]
    pub fn is_localhost(&self) -> bool {
        self.host.as_ref().is_some_and(Host::is_localhost)
    }

    fn serialize(&self, unicode: bool) -> String {
        let mut out = String::with_capacity(self.scheme.len() + self.path.len() + 16);
        out.push_str(&self.scheme);
        out.push(':');

        if self.has_authority {
            out.push_str("//");
            if self.username.is_some() || self.password.is_some() {
                out.push_str(self.username.as_deref().unwrap_or_default());
                if let Some(password) = &self.password {
                    out.push(':');
                    out.push_str(password);
                }
                out.push('@');
            }
            if let Some(host) = &self.host {
                out.push_str(if unicode {
                    host.unicode_str()
                } else {
                    host.as_str()
                });
            }
            if let Some(port) = self.port.filter(|&p| Some(p) != default_port(&self.scheme)) {
                out.push(':');
                out.push_str(&port.to_string());
            }
        }

        out.push_str(&self.path);

        if let Some(query) = &self.query {
            out.push('?');
            out.push_str(query);
        }

        if let Some(fragment) = &self.fragment {
            out.push('#');
            out.push_str(fragment);
        }

        out
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialization)
    }
}

impl FromStr for Url {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Url {
    fn as_ref(&self) -> &str {
        &self.serialization
    }
}

impl TryFrom<&str> for Url {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<Url> for String {
    fn from(url: Url) -> Self {
        url.serialization
    }
}

impl PartialOrd for Url {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Url {
    fn cmp(&self, other: &Self) -> Ordering {
        self.serialization.cmp(&other.serialization)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Url {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.serialization)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Url {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reference_url() {
        let input = "https://example.com/foo/bar?baz=qux#quux";
        let url = Url::parse(input).unwrap();

        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(url.unicode_host(), Some("example.com"));
        assert_eq!(url.path(), "/foo/bar");
        assert_eq!(url.query(), Some("baz=qux"));
        assert_eq!(
            url.query_params().iter().collect::<Vec<_>>(),
            vec![("baz", "qux")]
        );
        assert_eq!(url.fragment(), Some("quux"));
        assert_eq!(url.username(), None);
        assert_eq!(url.password(), None);
        assert_eq!(url.port(), Some(443));
        assert_eq!(url.to_string(), input);
        assert_eq!(url.unicode_string(), input);
    }

    #[test]
    fn parse_missing_scheme_returns_error() {
        let result = Url::parse("example.com/foo");
        assert!(matches!(
            result,
            Err(ParseError {
                kind: ParseErrorKind::MissingScheme,
                ..
            })
        ));
    }

    #[test]
    fn query_params_are_stable() {
        let url = Url::parse("https://example.com/?baz=qux&baz=zap").unwrap();
        assert_eq!(url.query_params(), url.query_params());
        assert_eq!(url.query_params().len(), 2);
    }

    #[test]
    fn equality_is_structural() {
        let a = Url::parse("HTTPS://EXAMPLE.com:443").unwrap();
        let b = Url::parse("https://example.com/").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unicode_string_reparses_to_same_url() {
        let url = Url::parse("https://m\u{fc}nchen.de/stra\u{df}e?q=1").unwrap();
        let again = Url::parse(&url.unicode_string()).unwrap();
        assert_eq!(url, again);
    }

    #[test]
    fn ipv6_host_serialization() {
        let url = Url::parse("http://[::1]:8080/x").unwrap();
        assert_eq!(url.host_str(), Some("[::1]"));
        assert_eq!(url.as_str(), "http://[::1]:8080/x");
        assert!(url.is_localhost());
    }

    #[test]
    fn path_segments_of_root() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(url.path_segments().collect::<Vec<_>>(), vec![""]);

        let url = Url::parse("https://example.com/a/b").unwrap();
        assert_eq!(url.path_segments().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn ordering_follows_serialization() {
        let a = Url::parse("https://a.example/").unwrap();
        let b = Url::parse("https://b.example/").unwrap();
        assert!(a < b);
    }

    #[test]
    fn from_str_and_try_from() {
        let a: Url = "https://example.com/".parse().unwrap();
        let b = Url::try_from("https://example.com/").unwrap();
        assert_eq!(a, b);
        assert_eq!(String::from(a), "https://example.com/");
    }

    #[test]
    fn default_host_fills_special_scheme() {
        let config = UrlConfig::new().default_host("localhost");

        let url = Url::parse_with("http:///path", &config).unwrap();
        assert_eq!(url.as_str(), "http://localhost/path");
        assert_eq!(url.port(), Some(80));

        let url = Url::parse_with("https://user@:8443/x", &config).unwrap();
        assert_eq!(url.as_str(), "https://user@localhost:8443/x");
        assert_eq!(url.host_str(), Some("localhost"));
    }

    #[test]
    fn empty_special_host_without_default_fails() {
        let err = Url::parse("http:///path").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::EmptyHost);

        let config = UrlConfig::new().default_host("localhost");
        let err = Url::parse_with("http:example.com", &config).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::EmptyHost);
    }
}
