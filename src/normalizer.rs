//! URL normalizer: turns scanned components into a validated [`Url`].

use std::borrow::Cow;

use crate::config::UrlConfig;
use crate::constants::{default_port, is_special_scheme};
use crate::encoding::{self, FRAGMENT, OPAQUE_PATH, PATH, QUERY, SPECIAL_QUERY, USERINFO};
use crate::error::{ParseError, ParseErrorKind};
use crate::host::Host;
use crate::scanner::UrlComponents;
use crate::url::{Url, UrlParts};

/// Normalizes scanned components under `config`.
///
/// Applies the scheme policy, maps the host to its ASCII and unicode forms,
/// resolves the effective port, percent-encodes userinfo, path, query and
/// fragment, and removes dot segments from hierarchical paths.
///
/// # Errors
///
/// Returns `ParseError` with kind:
/// - `TooLong` if the input exceeds `config.max_length`
/// - `UnsupportedScheme` if the scheme is not accepted by `config`
/// - `HostNormalizationFailed` if the host cannot be mapped
/// - `EmptyHost` if `config.host_required` and no host is available
///
/// # Examples
///
/// ```
/// use schema_url::{normalize, scan, UrlConfig};
///
/// let url = normalize(scan("https://example.com").unwrap(), &UrlConfig::default()).unwrap();
/// assert_eq!(url.as_str(), "https://example.com/");
/// assert_eq!(url.port(), Some(443));
/// ```
#[allow(clippy::needless_pass_by_value)]
pub fn normalize(components: UrlComponents<'_>, config: &UrlConfig) -> Result<Url, ParseError> {
    let input = components.input();
    let fail = |span, kind| ParseError::new(input, span, kind);

    if let Some(max) = config.max_length {
        if input.len() > max {
            return Err(fail(
                0..input.len(),
                ParseErrorKind::TooLong {
                    max,
                    actual: input.len(),
                },
            ));
        }
    }

    let scheme = components.scheme().to_string();
    if !config.accepts_scheme(&scheme) {
        return Err(fail(
            components.scheme_span(),
            ParseErrorKind::UnsupportedScheme {
                scheme,
                expected: config.allowed_schemes.clone().unwrap_or_default(),
            },
        ));
    }

    let special = is_special_scheme(&scheme);
    let has_authority = components.has_authority() || special;

    let host = normalize_host(&components, config, has_authority)?;
    if host.is_none() && config.host_required {
        return Err(fail(
            components.span_of(components.host()),
            ParseErrorKind::EmptyHost,
        ));
    }

    let port = components.port().or_else(|| {
        host.as_ref()
            .and(config.default_port.or_else(|| default_port(&scheme)))
    });

    let username = components
        .username()
        .filter(|u| !u.is_empty())
        .map(|u| encoding::encode(u, USERINFO).into_owned());
    let password = components
        .password()
        .filter(|p| !p.is_empty())
        .map(|p| encoding::encode(p, USERINFO).into_owned());

    let mut path = normalize_path(components.path(), special, has_authority);
    if let Some(default_path) = &config.default_path {
        if path.is_empty() || path == "/" {
            path = normalize_path(default_path, special, has_authority);
        }
    }

    let query_set = if special { SPECIAL_QUERY } else { QUERY };
    let query = components
        .query()
        .filter(|q| !q.is_empty())
        .map(|q| encoding::encode(q, query_set).into_owned());
    let fragment = components
        .fragment()
        .filter(|f| !f.is_empty())
        .map(|f| encoding::encode(f, FRAGMENT).into_owned());

    Ok(Url::from_parts(UrlParts {
        scheme,
        has_authority,
        username,
        password,
        host,
        port,
        path,
        query,
        fragment,
    }))
}

fn normalize_host(
    components: &UrlComponents<'_>,
    config: &UrlConfig,
    has_authority: bool,
) -> Result<Option<Host>, ParseError> {
    let raw = components.host();
    let (text, span) = if raw.is_empty() {
        match config.default_host.as_deref().filter(|_| has_authority) {
            Some(default_host) => (default_host, components.span_of(raw)),
            None => return Ok(None),
        }
    } else {
        (raw, components.span_of(raw))
    };

    Host::parse(text, config.host_strictness)
        .map(Some)
        .map_err(|e| {
            ParseError::new(
                components.input(),
                span,
                ParseErrorKind::HostNormalizationFailed {
                    host: text.to_string(),
                    reason: e.reason(),
                },
            )
        })
}

fn normalize_path(raw: &str, special: bool, has_authority: bool) -> String {
    if !has_authority && !special {
        return encoding::encode(raw, OPAQUE_PATH).into_owned();
    }

    let encoded = encoding::encode(raw, PATH);
    let rooted: Cow<'_, str> = if encoded.is_empty() {
        if special {
            Cow::Borrowed("/")
        } else {
            return String::new();
        }
    } else if encoded.starts_with('/') {
        encoded
    } else {
        Cow::Owned(format!("/{encoded}"))
    };

    remove_dot_segments(&rooted)
}

/// Resolves `.` and `..` segments of a path that starts with `/`.
fn remove_dot_segments(path: &str) -> String {
    let segments: Vec<&str> = path[1..].split('/').collect();
    let last = segments.len() - 1;
    let mut out: Vec<&str> = Vec::with_capacity(segments.len());

    for (i, segment) in segments.iter().enumerate() {
        match *segment {
            "." | "%2e" | "%2E" => {
                if i == last {
                    out.push("");
                }
            }
            ".." | ".%2e" | ".%2E" | "%2e." | "%2E." | "%2e%2e" | "%2E%2E" | "%2e%2E" | "%2E%2e" => {
                out.pop();
                if i == last {
                    out.push("");
                }
            }
            other => out.push(other),
        }
    }

    format!("/{}", out.join("/"))
}
