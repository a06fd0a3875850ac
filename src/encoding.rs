//! Percent-encode sets for each URL component.
//!
//! `%` is never part of a set, so escapes already present in the input are
//! kept as written and encoding an encoded component is a no-op.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

/// Characters encoded in fragments.
pub const FRAGMENT: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>').add(b'`');

/// Characters encoded in hierarchical paths.
pub const PATH: &AsciiSet = &FRAGMENT.add(b'#').add(b'?').add(b'{').add(b'}');

/// Characters encoded in usernames and passwords.
pub const USERINFO: &AsciiSet = &PATH
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'=')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'|');

/// Characters encoded in queries of non-special URLs.
pub const QUERY: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'#').add(b'<').add(b'>');

/// Characters encoded in queries of special URLs.
pub const SPECIAL_QUERY: &AsciiSet = &QUERY.add(b'\'');

/// Characters encoded in opaque paths (no authority).
pub const OPAQUE_PATH: &AsciiSet = CONTROLS;

/// Percent-encodes `input` with `set`.
pub fn encode<'a>(input: &'a str, set: &'static AsciiSet) -> Cow<'a, str> {
    utf8_percent_encode(input, set).into()
}

/// Decodes one `application/x-www-form-urlencoded` key or value.
///
/// `+` becomes a space; malformed escapes are kept literally and invalid
/// UTF-8 is replaced.
#[must_use]
pub fn form_decode(input: &str) -> String {
    let replaced: Cow<'_, str> = if input.contains('+') {
        Cow::Owned(input.replace('+', " "))
    } else {
        Cow::Borrowed(input)
    };
    percent_decode_str(&replaced).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_keeps_existing_escapes() {
        assert_eq!(encode("/a%20b", PATH), "/a%20b");
        assert_eq!(encode("/a b", PATH), "/a%20b");
    }

    #[test]
    fn encode_non_ascii_path() {
        assert_eq!(encode("/caf\u{e9}", PATH), "/caf%C3%A9");
    }

    #[test]
    fn userinfo_encodes_separators() {
        assert_eq!(encode("a@b:c", USERINFO), "a%40b%3Ac");
    }

    #[test]
    fn special_query_encodes_apostrophe() {
        assert_eq!(encode("a='b'", SPECIAL_QUERY), "a=%27b%27");
        assert_eq!(encode("a='b'", QUERY), "a='b'");
    }

    #[test]
    fn form_decode_plus_and_escapes() {
        assert_eq!(form_decode("hello+world%21"), "hello world!");
        assert_eq!(form_decode("%zz"), "%zz");
    }
}
