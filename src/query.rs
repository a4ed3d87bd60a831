//! Typed query parameters and the query-string codec.

use std::fmt::{self, Display, Formatter};

use indexmap::IndexMap;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::trace;

use crate::url::Url;

/// Bytes escaped in query values: everything except ASCII alphanumerics and
/// `-`, `_`, `.`, `~`. Space therefore encodes as `%20`, never `+`.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// A single query parameter value.
///
/// Typed values only arise from [`UrlBuilder::param`](crate::UrlBuilder::param)
/// calls. Decoding a query string yields `Str` and `Null` exclusively and
/// never attempts to recover the original typing, so a boolean written as
/// `z=true` comes back as the string `"true"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// A plain string.
    Str(String),
    /// An integer, serialized in decimal without grouping.
    Int(i64),
    /// A boolean, serialized as the literal `true` or `false`.
    Bool(bool),
    /// A key with no usable value, serialized as `key=`.
    Null,
    /// A nested URL, kept as a typed value until serialization and then
    /// percent-encoded as its full href.
    Url(Box<Url>),
}

impl ParamValue {
    /// If the value is a string, returns it. Returns `None` otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(value) => Some(value),
            _ => None,
        }
    }

    /// If the value is a nested URL, returns it. Returns `None` otherwise.
    pub fn as_url(&self) -> Option<&Url> {
        match self {
            ParamValue::Url(url) => Some(url),
            _ => None,
        }
    }

    /// Returns `true` if the value is the null placeholder.
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Null)
    }
}

impl Display for ParamValue {
    /// Writes the unencoded textual form; `Null` displays as the empty
    /// string.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(value) => f.write_str(value),
            ParamValue::Int(value) => write!(f, "{value}"),
            ParamValue::Bool(value) => write!(f, "{value}"),
            ParamValue::Null => Ok(()),
            ParamValue::Url(url) => f.write_str(url.href()),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<Url> for ParamValue {
    fn from(url: Url) -> Self {
        ParamValue::Url(Box::new(url))
    }
}

impl From<&Url> for ParamValue {
    fn from(url: &Url) -> Self {
        ParamValue::Url(Box::new(url.clone()))
    }
}

/// An insertion-ordered mapping of query parameter keys to values.
///
/// Inserting an existing key overwrites the value but keeps the key's
/// original position; serialization order is insertion order. Keys travel
/// verbatim in both directions, values are percent-coded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryMap(IndexMap<String, ParamValue>);

impl QueryMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a raw query string, with or without its leading `?`.
    ///
    /// Pairs split at their first `=`, so a value containing a literal `=`
    /// keeps everything after the first one. Empty pairs (`a=1&&b=2`) are
    /// skipped. A value that is absent or decodes to the empty string is
    /// stored as [`ParamValue::Null`]. Duplicate keys keep the last value
    /// at the first key's position.
    ///
    /// Decoding never fails: invalid percent escapes pass through verbatim
    /// and non-UTF-8 sequences decode lossily.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut map = Self::new();
        if raw.is_empty() {
            return map;
        }
        for pair in raw.split('&') {
            if pair.is_empty() {
                continue;
            }
            let (key, value) = match pair.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (pair, None),
            };
            let value = match value {
                None => ParamValue::Null,
                Some(raw_value) => {
                    let decoded = percent_decode_str(raw_value).decode_utf8_lossy();
                    if decoded.is_empty() {
                        ParamValue::Null
                    } else {
                        ParamValue::Str(decoded.into_owned())
                    }
                }
            };
            map.insert(key, value);
        }
        trace!(params = map.len(), "decoded query string");
        map
    }

    /// Inserts or overwrites `key`; an existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Removes `key` and returns its value, keeping the order of the
    /// remaining entries. Absent keys are a silent no-op.
    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.0.shift_remove(key)
    }

    /// Returns the value stored for `key`, if the key is present.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    /// Returns `true` if `key` is present, even with a null value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map holds no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl Display for QueryMap {
    /// Encodes entries in insertion order as `key=value&...`; the empty map
    /// encodes to the empty string. The caller decides whether to prefix
    /// `?`.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            f.write_str(key)?;
            f.write_str("=")?;
            match value {
                ParamValue::Str(value) => write!(f, "{}", utf8_percent_encode(value, QUERY_VALUE))?,
                ParamValue::Int(value) => write!(f, "{value}")?,
                ParamValue::Bool(value) => write!(f, "{value}")?,
                ParamValue::Null => {}
                ParamValue::Url(url) => {
                    write!(f, "{}", utf8_percent_encode(url.href(), QUERY_VALUE))?
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_basic() {
        let map = QueryMap::parse("a=1&b=2");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&ParamValue::Str("1".to_string())));
        assert_eq!(map.get("b"), Some(&ParamValue::Str("2".to_string())));
    }

    #[test]
    fn parse_strips_question_mark() {
        assert_eq!(QueryMap::parse("?a=1"), QueryMap::parse("a=1"));
        assert!(QueryMap::parse("?").is_empty());
        assert!(QueryMap::parse("").is_empty());
    }

    #[test]
    fn parse_skips_empty_pairs() {
        let map = QueryMap::parse("a=1&&b=2&");
        assert_eq!(map.len(), 2);
        assert!(map.contains_key("a"));
        assert!(map.contains_key("b"));
    }

    #[test]
    fn parse_splits_at_first_equals() {
        let map = QueryMap::parse("k=a=b");
        assert_eq!(map.get("k"), Some(&ParamValue::Str("a=b".to_string())));
    }

    #[test]
    fn parse_missing_and_empty_values_are_null() {
        let map = QueryMap::parse("flag&empty=");
        assert_eq!(map.get("flag"), Some(&ParamValue::Null));
        assert_eq!(map.get("empty"), Some(&ParamValue::Null));
        assert_eq!(map.get("missing"), None);
    }

    #[test]
    fn parse_duplicate_key_keeps_last_value_first_position() {
        let map = QueryMap::parse("a=1&b=2&a=3");
        assert_eq!(map.get("a"), Some(&ParamValue::Str("3".to_string())));
        let keys: Vec<&str> = map.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn parse_percent_decodes_values() {
        let map = QueryMap::parse("msg=hello%20world&cjk=%E4%BD%A0%E5%A5%BD");
        assert_eq!(
            map.get("msg"),
            Some(&ParamValue::Str("hello world".to_string()))
        );
        assert_eq!(map.get("cjk"), Some(&ParamValue::Str("你好".to_string())));
    }

    #[test]
    fn parse_keeps_invalid_escapes_and_plus() {
        let map = QueryMap::parse("a=%zz&b=1+2");
        assert_eq!(map.get("a"), Some(&ParamValue::Str("%zz".to_string())));
        assert_eq!(map.get("b"), Some(&ParamValue::Str("1+2".to_string())));
    }

    #[test]
    fn parse_never_recovers_typing() {
        let map = QueryMap::parse("n=2&t=true");
        assert_eq!(map.get("n"), Some(&ParamValue::Str("2".to_string())));
        assert_eq!(map.get("t"), Some(&ParamValue::Str("true".to_string())));
    }

    #[test]
    fn encode_preserves_insertion_order() {
        let mut map = QueryMap::new();
        map.insert("a", "1");
        map.insert("b", "2");
        map.insert("c", "3");
        assert_eq!(map.to_string(), "a=1&b=2&c=3");
    }

    #[test]
    fn encode_typed_values() {
        let mut map = QueryMap::new();
        map.insert("n", 42);
        map.insert("neg", -7i64);
        map.insert("t", true);
        map.insert("f", false);
        map.insert("nil", ParamValue::Null);
        assert_eq!(map.to_string(), "n=42&neg=-7&t=true&f=false&nil=");
    }

    #[test]
    fn encode_escapes_values_not_keys() {
        let mut map = QueryMap::new();
        map.insert("msg", "hello world & more");
        assert_eq!(map.to_string(), "msg=hello%20world%20%26%20more");
    }

    #[test]
    fn encode_empty_map() {
        assert_eq!(QueryMap::new().to_string(), "");
    }

    #[test]
    fn insert_overwrite_keeps_position() {
        let mut map = QueryMap::new();
        map.insert("a", "1");
        map.insert("b", "2");
        map.insert("c", "3");
        map.insert("b", "changed");
        assert_eq!(map.to_string(), "a=1&b=changed&c=3");
    }

    #[test]
    fn remove_keeps_order_of_rest() {
        let mut map = QueryMap::new();
        map.insert("a", "1");
        map.insert("b", "2");
        map.insert("c", "3");
        assert_eq!(map.remove("b"), Some(ParamValue::Str("2".to_string())));
        assert_eq!(map.remove("b"), None);
        assert_eq!(map.to_string(), "a=1&c=3");
    }

    #[test]
    fn null_is_distinct_from_absent() {
        let mut map = QueryMap::new();
        map.insert("x", ParamValue::Null);
        assert!(map.get("x").is_some_and(ParamValue::is_null));
        assert!(map.contains_key("x"));
        assert_eq!(map.get("y"), None);
        assert!(!map.contains_key("y"));
    }

    #[test]
    fn round_trip_survives_decode() {
        let mut map = QueryMap::new();
        map.insert("msg", "hello world");
        map.insert("path", "a/b?c=d");
        let reparsed = QueryMap::parse(&map.to_string());
        assert_eq!(
            reparsed.get("msg"),
            Some(&ParamValue::Str("hello world".to_string()))
        );
        assert_eq!(
            reparsed.get("path"),
            Some(&ParamValue::Str("a/b?c=d".to_string()))
        );
    }
}
