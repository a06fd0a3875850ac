//! Typestate builder for assembling a [`Url`] from parts.
//!
//! The builder renders its parts into a URL string and runs it through the
//! regular scan and normalize pipeline, so a built `Url` is indistinguishable
//! from a parsed one. Components are percent-encoded on the way in, so a
//! delimiter inside a component never changes the URL's structure.

use std::marker::PhantomData;

use crate::config::UrlConfig;
use crate::encoding::{self, FRAGMENT, PATH, QUERY, USERINFO};
use crate::error::ParseError;
use crate::url::Url;

/// Marker: No components set yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct Empty;

/// Marker: Scheme has been set.
#[derive(Debug, Clone, Copy, Default)]
pub struct HasScheme;

/// Marker: Scheme and host are set, ready to build.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ready;

/// A typestate builder for constructing [`Url`] instances.
///
/// The scheme must be set first, then the host; every other component is
/// optional and can be added at any point.
///
/// # Examples
///
/// ```
/// use schema_url::UrlBuilder;
///
/// let url = UrlBuilder::new()
///     .scheme("https")
///     .host("example.com")
///     .port(8443)
///     .path("foo/bar")
///     .query("baz=qux")
///     .build()
///     .unwrap();
///
/// assert_eq!(url.as_str(), "https://example.com:8443/foo/bar?baz=qux");
/// ```
///
/// # Compile-Time Safety
///
/// ```compile_fail
/// use schema_url::UrlBuilder;
///
/// // Error: cannot call build() without a scheme and host
/// let url = UrlBuilder::new().scheme("https").build();
/// ```
#[derive(Debug, Clone)]
pub struct UrlBuilder<State = Empty> {
    scheme: String,
    host: String,
    username: Option<String>,
    password: Option<String>,
    port: Option<u16>,
    path: Option<String>,
    query: Option<String>,
    fragment: Option<String>,
    _state: PhantomData<State>,
}

impl UrlBuilder<Empty> {
    /// Creates a new builder in the initial state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scheme: String::new(),
            host: String::new(),
            username: None,
            password: None,
            port: None,
            path: None,
            query: None,
            fragment: None,
            _state: PhantomData,
        }
    }

    /// Sets the scheme and advances to the [`HasScheme`] state.
    #[must_use]
    pub fn scheme(self, scheme: impl Into<String>) -> UrlBuilder<HasScheme> {
        UrlBuilder {
            scheme: scheme.into(),
            host: self.host,
            username: self.username,
            password: self.password,
            port: self.port,
            path: self.path,
            query: self.query,
            fragment: self.fragment,
            _state: PhantomData,
        }
    }
}

impl Default for UrlBuilder<Empty> {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlBuilder<HasScheme> {
    /// Sets the host and advances to the [`Ready`] state.
    ///
    /// Bare IPv6 addresses are bracketed automatically.
    #[must_use]
    pub fn host(self, host: impl Into<String>) -> UrlBuilder<Ready> {
        let host = host.into();
        let host = if host.contains(':') && !host.starts_with('[') {
            format!("[{host}]")
        } else {
            host
        };
        UrlBuilder {
            scheme: self.scheme,
            host,
            username: self.username,
            password: self.password,
            port: self.port,
            path: self.path,
            query: self.query,
            fragment: self.fragment,
            _state: PhantomData,
        }
    }
}

impl UrlBuilder<Ready> {
    /// Builds the [`Url`] with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the assembled URL does not validate.
    pub fn build(self) -> Result<Url, ParseError> {
        self.build_with(&UrlConfig::default())
    }

    /// Builds the [`Url`] under `config`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the assembled URL does not validate.
    pub fn build_with(self, config: &UrlConfig) -> Result<Url, ParseError> {
        Url::parse_with(&self.render(), config)
    }

    /// Returns the URL string the builder would validate.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = format!("{}://", self.scheme);
        if self.username.is_some() || self.password.is_some() {
            if let Some(username) = &self.username {
                out.push_str(&encoding::encode(username, USERINFO));
            }
            if let Some(password) = &self.password {
                out.push(':');
                out.push_str(&encoding::encode(password, USERINFO));
            }
            out.push('@');
        }
        out.push_str(&self.host);
        if let Some(port) = self.port {
            out.push(':');
            out.push_str(&port.to_string());
        }
        if let Some(path) = self.path.as_deref().filter(|p| !p.is_empty()) {
            if !path.starts_with('/') {
                out.push('/');
            }
            out.push_str(&encoding::encode(path, PATH));
        }
        if let Some(query) = &self.query {
            out.push('?');
            out.push_str(&encoding::encode(query, QUERY));
        }
        if let Some(fragment) = &self.fragment {
            out.push('#');
            out.push_str(&encoding::encode(fragment, FRAGMENT));
        }
        out
    }
}

/// Optional components, available in every state.
impl<State> UrlBuilder<State> {
    /// Sets the username.
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Sets the password.
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets an explicit port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the path; a leading `/` is added when missing.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the query string (without `?`).
    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Sets the fragment (without `#`).
    #[must_use]
    pub fn fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = Some(fragment.into());
        self
    }
}
