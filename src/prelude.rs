//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use schema_url::prelude::*;
//!
//! let url = Url::parse("https://example.com/").unwrap();
//! let email = Email::parse("someone@example.com").unwrap();
//! ```
//!
//! Builder state markers (`Empty`, `HasScheme`, `Ready`) are left out.

pub use crate::{
    // Values
    Email, Host, HostKind, QueryParams, Url, UrlComponents,
    // Builder
    UrlBuilder,
    // Configuration
    EmailConfig, HostStrictness, UrlConfig,
    // Errors
    HostError, ParseError, ParseErrorKind,
    // Entry points
    normalize, scan, validate_email,
};
