//! Per-call validation settings.
//!
//! The crate holds no configuration state of its own; the caller passes a
//! [`UrlConfig`] or [`EmailConfig`] with each validation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How unicode hosts that fail strict mapping are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HostStrictness {
    /// UTS #46 mapping with only URL-forbidden code points rejected.
    #[default]
    Lenient,
    /// STD3 rules: every label must be letters, digits and inner hyphens.
    Strict,
}

/// Settings for URL validation.
///
/// # Examples
///
/// ```
/// use schema_url::{Url, UrlConfig};
///
/// let config = UrlConfig::new().allowed_schemes(["https"]).max_length(64);
/// assert!(Url::parse_with("https://example.com/", &config).is_ok());
/// assert!(Url::parse_with("ftp://example.com/", &config).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct UrlConfig {
    /// Accepted schemes; `None` accepts any scheme
    pub allowed_schemes: Option<Vec<String>>,
    /// Maximum input length in bytes
    pub max_length: Option<usize>,
    /// Reject URLs without a host even when the scheme allows it
    pub host_required: bool,
    /// Host used when the input has none
    pub default_host: Option<String>,
    /// Port used when the input has none
    pub default_port: Option<u16>,
    /// Path used when the input path is empty or `/`
    pub default_path: Option<String>,
    /// Host mapping strictness
    pub host_strictness: HostStrictness,
}

impl UrlConfig {
    /// Creates a configuration that accepts any absolute URL.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the accepted schemes.
    #[must_use]
    pub fn allowed_schemes<I, S>(mut self, schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_schemes = Some(
            schemes
                .into_iter()
                .map(|s| s.into().to_ascii_lowercase())
                .collect(),
        );
        self
    }

    /// Sets the maximum input length.
    #[must_use]
    pub const fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Requires a host for every scheme.
    #[must_use]
    pub const fn host_required(mut self, required: bool) -> Self {
        self.host_required = required;
        self
    }

    /// Sets the host used when the input has none.
    #[must_use]
    pub fn default_host(mut self, host: impl Into<String>) -> Self {
        self.default_host = Some(host.into());
        self
    }

    /// Sets the port used when the input has none.
    #[must_use]
    pub const fn default_port(mut self, port: u16) -> Self {
        self.default_port = Some(port);
        self
    }

    /// Sets the path used when the input path is empty or `/`.
    #[must_use]
    pub fn default_path(mut self, path: impl Into<String>) -> Self {
        self.default_path = Some(path.into());
        self
    }

    /// Sets the host mapping strictness.
    #[must_use]
    pub const fn host_strictness(mut self, strictness: HostStrictness) -> Self {
        self.host_strictness = strictness;
        self
    }

    /// Returns true if `scheme` passes the scheme policy.
    #[must_use]
    pub fn accepts_scheme(&self, scheme: &str) -> bool {
        self.allowed_schemes
            .as_ref()
            .is_none_or(|allowed| allowed.iter().any(|s| s == scheme))
    }
}

/// Settings for email validation.
///
/// Every relaxation is off by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EmailConfig {
    /// Accept non-ASCII characters in the local part
    pub allow_smtputf8: bool,
    /// Accept an empty local part (`@example.com`)
    pub allow_empty_local: bool,
    /// Accept a quoted local part (`"john doe"@example.com`)
    pub allow_quoted_local: bool,
    /// Accept a bracketed IP address as the domain
    pub allow_domain_literal: bool,
}

impl EmailConfig {
    /// Creates the default (strictest) configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            allow_smtputf8: false,
            allow_empty_local: false,
            allow_quoted_local: false,
            allow_domain_literal: false,
        }
    }

    /// Accepts internationalized local parts.
    #[must_use]
    pub const fn allow_smtputf8(mut self, allow: bool) -> Self {
        self.allow_smtputf8 = allow;
        self
    }

    /// Accepts an empty local part.
    #[must_use]
    pub const fn allow_empty_local(mut self, allow: bool) -> Self {
        self.allow_empty_local = allow;
        self
    }

    /// Accepts quoted local parts.
    #[must_use]
    pub const fn allow_quoted_local(mut self, allow: bool) -> Self {
        self.allow_quoted_local = allow;
        self
    }

    /// Accepts domain literals.
    #[must_use]
    pub const fn allow_domain_literal(mut self, allow: bool) -> Self {
        self.allow_domain_literal = allow;
        self
    }
}
