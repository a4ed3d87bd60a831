//! The fluent URL builder.

use crate::error::ParseUrlError;
use crate::parse;
use crate::query::{ParamValue, QueryMap};
use crate::url::{Parts, Url};

/// A port accepted by [`UrlBuilder::port`]: an integer or a numeric string.
///
/// Zero, the empty string and non-numeric strings all normalize to "no
/// explicit port", so the conversion is total and the setter never fails.
/// Values above 65535 are kept as given; range validation is a non-goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortValue(Option<u32>);

impl From<u16> for PortValue {
    fn from(port: u16) -> Self {
        PortValue((port != 0).then_some(port.into()))
    }
}

impl From<u32> for PortValue {
    fn from(port: u32) -> Self {
        PortValue((port != 0).then_some(port))
    }
}

impl From<Option<u32>> for PortValue {
    fn from(port: Option<u32>) -> Self {
        PortValue(port.filter(|port| *port != 0))
    }
}

impl From<&str> for PortValue {
    fn from(port: &str) -> Self {
        PortValue(port.parse::<u32>().ok().filter(|port| *port != 0))
    }
}

impl From<String> for PortValue {
    fn from(port: String) -> Self {
        port.as_str().into()
    }
}

/// A fluent builder of [`Url`] values.
///
/// Every setter takes the builder by value and returns it, so calls chain;
/// none of them validates its input beyond its type (no scheme allow-list,
/// no hostname checks). The only fallible operation on the whole path from
/// construction to [`build`](UrlBuilder::build) is
/// [`parse`](UrlBuilder::parse).
///
/// # Example
///
/// ```
/// use weburl::UrlBuilder;
///
/// let url = UrlBuilder::new()
///     .protocol("https:")
///     .hostname("deno.land")
///     .port(8080u16)
///     .pathname("path/to/file")
///     .param("x", "hello_world")
///     .build();
/// assert_eq!(url.href(), "https://deno.land:8080/path/to/file?x=hello_world");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlBuilder {
    parts: Parts,
}

impl UrlBuilder {
    /// Creates a builder with every component at its default: empty
    /// strings, no port, no query parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder by splitting a URL string of the shape
    /// `scheme://[user[:pass]@]host[:port][/path][?query][#fragment]`.
    ///
    /// The raw query string goes through [`QueryMap::parse`], so every
    /// decoded value is a string or null regardless of how it was produced.
    /// Fails with [`ParseUrlError`] when no scheme/host structure is
    /// recognizable; no partial result is returned.
    pub fn parse(input: &str) -> Result<Self, ParseUrlError> {
        let raw = parse::split(input)?;
        Ok(Self {
            parts: Parts {
                protocol: format!("{}:", raw.scheme),
                username: raw.username.to_string(),
                password: raw.password.to_string(),
                hostname: raw.hostname.to_string(),
                port: raw.port,
                pathname: raw.pathname.to_string(),
                hash: raw.hash.to_string(),
                query: QueryMap::parse(raw.query),
            },
        })
    }

    pub(crate) fn from_parts(parts: Parts) -> Self {
        Self { parts }
    }

    /// Sets the protocol. Expected to include the trailing colon
    /// (`"https:"`); stored as given.
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.parts.protocol = protocol.into();
        self
    }

    /// Sets the username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.parts.username = username.into();
        self
    }

    /// Sets the password. A password without a username is stored but
    /// never serialized.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.parts.password = password.into();
        self
    }

    /// Sets the hostname.
    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.parts.hostname = hostname.into();
        self
    }

    /// Sets the port from an integer or a numeric string.
    ///
    /// See [`PortValue`] for the normalization rules; this setter never
    /// fails.
    pub fn port(mut self, port: impl Into<PortValue>) -> Self {
        self.parts.port = port.into().0;
        self
    }

    /// Sets the pathname, with or without a leading `/`.
    ///
    /// A non-empty pathname lacking the leading `/` gains one in the
    /// built value's `path` and `href` (the stored component is returned
    /// verbatim by [`Url::pathname`]). Because of that, parsing such an
    /// href back yields the slash-prefixed pathname; the href itself is
    /// stable from then on.
    pub fn pathname(mut self, pathname: impl Into<String>) -> Self {
        self.parts.pathname = pathname.into();
        self
    }

    /// Sets the fragment identifier, without its leading `#`.
    pub fn hash(mut self, hash: impl Into<String>) -> Self {
        self.parts.hash = hash.into();
        self
    }

    /// Replaces the entire query mapping.
    pub fn query(mut self, query: QueryMap) -> Self {
        self.parts.query = query;
        self
    }

    /// Inserts or overwrites one query parameter.
    ///
    /// An existing key keeps its insertion position. A nested [`Url`]
    /// value stays a typed value in the mapping and is only stringified
    /// when the query is serialized.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.parts.query.insert(key, value);
        self
    }

    /// Removes one query parameter. A silent no-op when the key is absent.
    pub fn remove_param(mut self, key: &str) -> Self {
        self.parts.query.remove(key);
        self
    }

    /// Builds an immutable [`Url`] from the current state.
    ///
    /// A pure function of the builder: it can be called any number of
    /// times, and every returned value is independent of the builder and
    /// of its siblings.
    pub fn build(&self) -> Url {
        Url::from_parts(self.parts.clone())
    }
}

impl From<&Url> for UrlBuilder {
    fn from(url: &Url) -> Self {
        url.to_builder()
    }
}
