//! URL and email address validation core for schema-driven validators.
//!
//! A schema framework that has decided a field is "a URL" or "an email
//! address" calls one of two independent entry points and gets back an
//! immutable, normalized value or a [`ParseError`] carrying the error kind
//! and the byte span of the offending input.
//!
//! # Overview
//!
//! ```text
//! raw string ──scan──▶ UrlComponents ──normalize(config)──▶ Url
//! raw string ──EmailConfig::validate──────────────────────▶ Email
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use schema_url::{Url, validate_email};
//!
//! let url = Url::parse("https://example.com/foo/bar?baz=qux#quux").unwrap();
//! assert_eq!(url.scheme(), "https");
//! assert_eq!(url.host_str(), Some("example.com"));
//! assert_eq!(url.port(), Some(443));
//! assert_eq!(url.to_string(), "https://example.com/foo/bar?baz=qux#quux");
//!
//! let email = validate_email("levostatnigrosh@gmail.com").unwrap();
//! assert_eq!(email.local_part(), "levostatnigrosh");
//! assert_eq!(email.domain(), "gmail.com");
//! ```
//!
//! # Configuration
//!
//! Validation settings are passed per call:
//!
//! ```rust
//! use schema_url::{HostStrictness, Url, UrlConfig};
//!
//! let config = UrlConfig::new()
//!     .allowed_schemes(["http", "https"])
//!     .host_strictness(HostStrictness::Strict);
//!
//! assert!(Url::parse_with("https://example.com/", &config).is_ok());
//! assert!(Url::parse_with("https://my_host.example/", &config).is_err());
//! ```
//!
//! # Normalization Rules
//!
//! | Component | Rule |
//! |-----------|------|
//! | Scheme | lowercased |
//! | Host | UTS #46 to ASCII; unicode form kept alongside |
//! | Port | explicit, else configured default, else scheme default |
//! | Path | percent-encoded; dot segments removed; `/` for special schemes |
//! | Query, fragment | percent-encoded; omitted when empty |
//!
//! # Logging
//!
//! Rejections are reported as `tracing` debug events and acceptances as
//! trace events. The crate never installs a subscriber.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod builder;
mod config;
mod constants;
mod email;
mod encoding;
mod error;
mod host;
mod normalizer;
pub mod prelude;
mod query;
mod scanner;
mod url;

pub use builder::{Empty, HasScheme, Ready, UrlBuilder};
pub use config::{EmailConfig, HostStrictness, UrlConfig};
pub use constants::{
    DEFAULT_PORTS, MAX_DNS_DOMAIN_LENGTH, MAX_DNS_LABEL_LENGTH, MAX_EMAIL_LENGTH,
    MAX_LOCAL_PART_LENGTH, SPECIAL_SCHEMES, default_port, is_special_scheme,
};
pub use email::{Email, validate_email};
pub use error::{HostError, ParseError, ParseErrorKind};
pub use host::{Host, HostKind};
pub use normalizer::normalize;
pub use query::QueryParams;
pub use scanner::{UrlComponents, scan};
pub use url::Url;
