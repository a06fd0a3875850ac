//! Query parameters materialized from a URL query string.

use std::fmt;
use std::str::FromStr;

use crate::encoding::form_decode;

/// Ordered query parameters.
///
/// Pairs keep the order in which they appear in the query string and
/// duplicate keys are kept as separate entries.
///
/// # Examples
///
/// ```
/// use schema_url::QueryParams;
///
/// let params = QueryParams::parse("baz=qux&baz=zap&flag");
/// assert_eq!(params.get("baz"), Some("qux"));
/// assert_eq!(params.get_all("baz").collect::<Vec<_>>(), vec!["qux", "zap"]);
/// assert_eq!(params.get("flag"), Some(""));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Creates an empty query params instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses query parameters from a query string (without leading '?').
    ///
    /// Pieces are split on `&`, then on the first `=`. A piece without `=`
    /// maps to an empty value; empty pieces are skipped. Keys and values are
    /// form-decoded.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let pairs = input
            .split('&')
            .filter(|piece| !piece.is_empty())
            .map(|piece| {
                let (name, value) = piece.split_once('=').unwrap_or((piece, ""));
                (form_decode(name), form_decode(value))
            })
            .collect();
        Self { pairs }
    }

    /// Returns the first value for a parameter, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value for a parameter, in order.
    pub fn get_all<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a str> + use<'a, 'n> {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if the query is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns an iterator over the pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the pairs as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Consumes the params, returning the pairs.
    #[must_use]
    pub fn into_vec(self) -> Vec<(String, String)> {
        self.pairs
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{k}={v}")?;
        }
        Ok(())
    }
}

impl FromStr for QueryParams {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl<'a> IntoIterator for &'a QueryParams {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
