//! End-to-end validation tests through the public API.

use schema_url::{
    Email, EmailConfig, HostKind, HostStrictness, ParseErrorKind, Url, UrlConfig, normalize,
    scan, validate_email,
};

#[test]
fn reference_url_round_trips_exactly() {
    let input = "https://example.com/foo/bar?baz=qux#quux";
    let url = Url::parse(input).unwrap();

    assert_eq!(url.scheme(), "https");
    assert_eq!(url.host_str(), Some("example.com"));
    assert_eq!(url.unicode_host(), Some("example.com"));
    assert_eq!(url.path(), "/foo/bar");
    assert_eq!(url.query(), Some("baz=qux"));
    assert_eq!(url.fragment(), Some("quux"));
    assert_eq!(url.username(), None);
    assert_eq!(url.password(), None);
    assert_eq!(url.port(), Some(443));
    assert_eq!(url.to_string(), input);
    assert_eq!(url.unicode_string(), input);
}

#[test]
fn scan_then_normalize_matches_parse() {
    let input = "HTTP://Example.COM:8080/a/../b?x=1";
    let staged = normalize(scan(input).unwrap(), &UrlConfig::default()).unwrap();
    assert_eq!(staged, Url::parse(input).unwrap());
    assert_eq!(staged.as_str(), "http://example.com:8080/b?x=1");
}

#[test]
fn duplicate_query_keys_keep_order() {
    let url = Url::parse("https://example.com/?baz=qux&baz=zap").unwrap();
    let pairs: Vec<_> = url.query_params().iter().collect();
    assert_eq!(pairs, vec![("baz", "qux"), ("baz", "zap")]);
    assert_eq!(url.query_params().get("baz"), Some("qux"));
}

#[test]
fn effective_port_resolution() {
    assert_eq!(Url::parse("https://example.com/").unwrap().port(), Some(443));
    assert_eq!(
        Url::parse("https://example.com:8443/").unwrap().port(),
        Some(8443)
    );
    assert_eq!(Url::parse("ws://example.com/").unwrap().port(), Some(80));
    assert_eq!(Url::parse("redis://cache.local/").unwrap().port(), None);

    let config = UrlConfig::new().default_port(6379);
    let url = Url::parse_with("redis://cache.local/", &config).unwrap();
    assert_eq!(url.port(), Some(6379));
    assert_eq!(url.as_str(), "redis://cache.local:6379/");
}

#[test]
fn default_port_is_not_serialized() {
    let url = Url::parse("https://example.com:443/").unwrap();
    assert_eq!(url.as_str(), "https://example.com/");
    assert_eq!(url.port(), Some(443));
}

#[test]
fn empty_path_becomes_slash() {
    let url = Url::parse("https://example.com").unwrap();
    assert_eq!(url.as_str(), "https://example.com/");
    assert_eq!(url.path(), "/");
}

#[test]
fn idn_host_has_both_forms() {
    let url = Url::parse("https://B\u{fc}cher.example/").unwrap();
    assert_eq!(url.host_str(), Some("xn--bcher-kva.example"));
    assert_eq!(url.unicode_host(), Some("b\u{fc}cher.example"));
    assert_eq!(url.as_str(), "https://xn--bcher-kva.example/");
    assert_eq!(url.unicode_string(), "https://b\u{fc}cher.example/");

    let from_ascii = Url::parse(url.as_str()).unwrap();
    let from_unicode = Url::parse(&url.unicode_string()).unwrap();
    assert_eq!(from_ascii, from_unicode);
}

#[test]
fn missing_scheme_is_rejected() {
    let err = Url::parse("example.com/foo").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::MissingScheme);
    assert_eq!(err.input, "example.com/foo");
}

#[test]
fn surrounding_whitespace_is_ignored() {
    let url = Url::parse("  https://example.com/  ").unwrap();
    assert_eq!(url.as_str(), "https://example.com/");
}

#[test]
fn blank_input_is_empty() {
    assert_eq!(Url::parse("   ").unwrap_err().kind, ParseErrorKind::Empty);
    assert_eq!(validate_email("").unwrap_err().kind, ParseErrorKind::Empty);
}

#[test]
fn invalid_port_reports_digit_span() {
    let input = "https://example.com:99999/";
    let err = Url::parse(input).unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::InvalidPort {
            value: "99999".to_string()
        }
    );
    assert_eq!(err.span, 20..25);
    assert_eq!(&input[err.span.clone()], "99999");
}

#[test]
fn scheme_policy_reports_scheme_span() {
    let config = UrlConfig::new().allowed_schemes(["http", "https"]);
    let err = Url::parse_with("ftp://files.example.com/", &config).unwrap_err();
    match &err.kind {
        ParseErrorKind::UnsupportedScheme { scheme, expected } => {
            assert_eq!(scheme, "ftp");
            assert_eq!(expected, &vec!["http".to_string(), "https".to_string()]);
        }
        other => panic!("unexpected kind: {other:?}"),
    }
    assert_eq!(err.span, 0..3);
}

#[test]
fn special_scheme_without_host_is_rejected() {
    assert_eq!(
        Url::parse("https://").unwrap_err().kind,
        ParseErrorKind::EmptyHost
    );
    assert_eq!(
        Url::parse("http:example.com").unwrap_err().kind,
        ParseErrorKind::EmptyHost
    );
}

#[test]
fn file_urls_allow_empty_host() {
    let url = Url::parse("file:///etc/hosts").unwrap();
    assert_eq!(url.host(), None);
    assert_eq!(url.port(), None);
    assert_eq!(url.as_str(), "file:///etc/hosts");
}

#[test]
fn opaque_urls_keep_their_path() {
    let url = Url::parse("mailto:someone@example.com").unwrap();
    assert!(!url.has_authority());
    assert_eq!(url.host(), None);
    assert_eq!(url.path(), "someone@example.com");
    assert_eq!(url.as_str(), "mailto:someone@example.com");
}

#[test]
fn dot_segments_are_removed() {
    let url = Url::parse("http://example.com/a/./b/../c").unwrap();
    assert_eq!(url.path(), "/a/c");
    assert_eq!(url.path_segments().collect::<Vec<_>>(), vec!["a", "c"]);
}

#[test]
fn components_are_percent_encoded() {
    let url = Url::parse("http://example.com/a b?q=a b#frag ment").unwrap();
    assert_eq!(url.path(), "/a%20b");
    assert_eq!(url.query(), Some("q=a%20b"));
    assert_eq!(url.fragment(), Some("frag%20ment"));
    assert_eq!(url.query_params().get("q"), Some("a b"));
}

#[test]
fn host_kinds() {
    let v4 = Url::parse("http://192.168.0.1/").unwrap();
    assert!(matches!(v4.host().unwrap().kind(), HostKind::Ipv4(_)));

    let v6 = Url::parse("http://[::1]:8080/").unwrap();
    assert!(matches!(v6.host().unwrap().kind(), HostKind::Ipv6(_)));
    assert_eq!(v6.host_str(), Some("[::1]"));
    assert!(v6.is_localhost());

    let bad = Url::parse("http://1.2.3.999/").unwrap_err();
    assert!(matches!(
        bad.kind,
        ParseErrorKind::HostNormalizationFailed { .. }
    ));
}

#[test]
fn strict_hosts_reject_underscores() {
    let input = "https://my_host.example/";
    assert!(Url::parse(input).is_ok());

    let strict = UrlConfig::new().host_strictness(HostStrictness::Strict);
    let err = Url::parse_with(input, &strict).unwrap_err();
    assert!(matches!(
        err.kind,
        ParseErrorKind::HostNormalizationFailed { .. }
    ));
}

#[test]
fn max_length_is_enforced() {
    let config = UrlConfig::new().max_length(20);
    let err = Url::parse_with("https://example.com/long/path", &config).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::TooLong { max: 20, actual: 29 });
}

#[test]
fn error_display_names_the_input() {
    let err = Url::parse("example.com/foo").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("example.com/foo"), "{message}");
}

#[test]
fn reference_email_validates() {
    let email = validate_email("levostatnigrosh@gmail.com").unwrap();
    assert_eq!(email.local_part(), "levostatnigrosh");
    assert_eq!(email.domain(), "gmail.com");
    assert_eq!(email.to_string(), "levostatnigrosh@gmail.com");
}

#[test]
fn email_rejections() {
    assert_eq!(
        validate_email("no-at-sign.example.com").unwrap_err().kind,
        ParseErrorKind::MissingAtSign
    );
    assert!(matches!(
        validate_email("a..b@example.com").unwrap_err().kind,
        ParseErrorKind::InvalidLocalPart { .. }
    ));
    assert!(matches!(
        validate_email(".ab@example.com").unwrap_err().kind,
        ParseErrorKind::InvalidLocalPart { .. }
    ));
    assert!(matches!(
        validate_email("user@localhost").unwrap_err().kind,
        ParseErrorKind::InvalidDomain { .. }
    ));
    assert!(matches!(
        validate_email("user@example.123").unwrap_err().kind,
        ParseErrorKind::InvalidDomain { .. }
    ));
}

#[test]
fn email_idn_domain() {
    let email = Email::parse("user@B\u{fc}cher.example").unwrap();
    assert_eq!(email.domain(), "b\u{fc}cher.example");
    assert_eq!(email.ascii_domain(), "xn--bcher-kva.example");
    assert_eq!(email.ascii_email(), "user@xn--bcher-kva.example");
}

#[test]
fn email_options() {
    let input = "postmaster@[192.168.0.1]";
    assert!(validate_email(input).is_err());

    let config = EmailConfig::new().allow_domain_literal(true);
    let email = config.validate(input).unwrap();
    assert_eq!(email.domain_literal(), Some("192.168.0.1".parse().unwrap()));

    let quoted = "\"john doe\"@example.com";
    assert!(validate_email(quoted).is_err());
    let email = EmailConfig::new()
        .allow_quoted_local(true)
        .validate(quoted)
        .unwrap();
    assert_eq!(email.local_part(), "\"john doe\"");
}

#[test]
fn values_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Url>();
    assert_send_sync::<Email>();
    assert_send_sync::<UrlConfig>();
    assert_send_sync::<EmailConfig>();
}

#[cfg(feature = "serde")]
mod serde_tests {
    use super::*;

    #[test]
    fn url_serializes_as_string() {
        let url = Url::parse("https://example.com:8443/a?b=c").unwrap();
        let json = serde_json::to_string(&url).unwrap();
        assert_eq!(json, "\"https://example.com:8443/a?b=c\"");

        let back: Url = serde_json::from_str(&json).unwrap();
        assert_eq!(back, url);
    }

    #[test]
    fn invalid_url_fails_deserialization() {
        let result: Result<Url, _> = serde_json::from_str("\"example.com/foo\"");
        assert!(result.is_err());
    }

    #[test]
    fn email_serializes_as_string() {
        let email = validate_email("someone@example.com").unwrap();
        let json = serde_json::to_string(&email).unwrap();
        let back: Email = serde_json::from_str(&json).unwrap();
        assert_eq!(back, email);
    }

    #[test]
    fn config_deserializes_from_json() {
        let config: UrlConfig = serde_json::from_str(
            r#"{
                "allowed_schemes": ["https"],
                "max_length": 2083,
                "host_required": true,
                "default_host": null,
                "default_port": null,
                "default_path": null,
                "host_strictness": "strict"
            }"#,
        )
        .unwrap();
        assert_eq!(config.host_strictness, HostStrictness::Strict);
        assert!(config.accepts_scheme("https"));
        assert!(!config.accepts_scheme("http"));
    }
}
