//! The immutable URL value.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::builder::UrlBuilder;
use crate::error::ParseUrlError;
use crate::query::{ParamValue, QueryMap};

/// The stored components a [`UrlBuilder`] hands to [`Url::from_parts`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Parts {
    pub(crate) protocol: String,
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) hostname: String,
    pub(crate) port: Option<u32>,
    pub(crate) pathname: String,
    pub(crate) hash: String,
    pub(crate) query: QueryMap,
}

/// An immutable URL value.
///
/// A `Url` is produced by [`UrlBuilder::build`] (or by parsing, via
/// [`FromStr`]) and never changes afterwards; its derived fields are
/// computed once at construction and stay consistent with the stored
/// components. To "change" a URL, seed a new builder from it with
/// [`Url::to_builder`].
///
/// # Example
///
/// ```
/// use weburl::Url;
///
/// let url: Url = "https://deno.land:8080/x?y=1#top".parse()?;
/// assert_eq!(url.origin(), "https://deno.land:8080");
/// assert_eq!(url.path(), "/x?y=1");
/// assert_eq!(url.hash(), "top");
/// # Ok::<(), weburl::ParseUrlError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    parts: Parts,
    auth: String,
    host: String,
    origin: String,
    search: String,
    path: String,
    href: String,
}

impl Url {
    /// Computes every derived field from the stored components.
    ///
    /// The order matters: `auth` and `host` first, `origin` from `host`,
    /// then the serialized query, then `path` and `href` from all of the
    /// above.
    pub(crate) fn from_parts(parts: Parts) -> Self {
        let auth = if parts.username.is_empty() {
            String::new()
        } else if parts.password.is_empty() {
            parts.username.clone()
        } else {
            format!("{}:{}", parts.username, parts.password)
        };

        let host = match parts.port {
            Some(port) => format!("{}:{}", parts.hostname, port),
            None => parts.hostname.clone(),
        };

        let origin = format!("{}//{}", parts.protocol, host);

        let search = if parts.query.is_empty() {
            String::new()
        } else {
            format!("?{}", parts.query)
        };

        // the stored pathname keeps whatever the caller set; only the
        // derived fields gain the leading slash
        let pathname = normalize_pathname(&parts.pathname);
        let path = format!("{pathname}{search}");

        let mut href = String::new();
        if !parts.protocol.is_empty() {
            href.push_str(&parts.protocol);
            href.push_str("//");
        }
        if !parts.username.is_empty() {
            href.push_str(&auth);
            href.push('@');
        }
        href.push_str(&parts.hostname);
        if let Some(port) = parts.port {
            href.push(':');
            href.push_str(&port.to_string());
        }
        href.push_str(&pathname);
        href.push_str(&search);
        if !parts.hash.is_empty() {
            href.push('#');
            href.push_str(&parts.hash);
        }

        Self {
            parts,
            auth,
            host,
            origin,
            search,
            path,
            href,
        }
    }

    /// The scheme with its trailing colon (`"https:"`), or the empty string.
    #[inline]
    pub fn protocol(&self) -> &str {
        &self.parts.protocol
    }

    /// The username, or the empty string.
    #[inline]
    pub fn username(&self) -> &str {
        &self.parts.username
    }

    /// The password, or the empty string.
    #[inline]
    pub fn password(&self) -> &str {
        &self.parts.password
    }

    /// The hostname, or the empty string.
    #[inline]
    pub fn hostname(&self) -> &str {
        &self.parts.hostname
    }

    /// The explicit port, if one was set.
    #[inline]
    pub fn port(&self) -> Option<u32> {
        self.parts.port
    }

    /// The pathname exactly as stored, without the leading-slash
    /// normalization applied to [`path`](Url::path) and [`href`](Url::href).
    #[inline]
    pub fn pathname(&self) -> &str {
        &self.parts.pathname
    }

    /// The fragment identifier without its leading `#`.
    #[inline]
    pub fn hash(&self) -> &str {
        &self.parts.hash
    }

    /// The query parameters in insertion order.
    #[inline]
    pub fn query(&self) -> &QueryMap {
        &self.parts.query
    }

    /// `username[:password]`, or the empty string if there is no username.
    #[inline]
    pub fn auth(&self) -> &str {
        &self.auth
    }

    /// `hostname[:port]`.
    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// `protocol//host`.
    #[inline]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// `?` plus the serialized query, or the empty string if there are no
    /// parameters.
    #[inline]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// The normalized pathname followed by [`search`](Url::search).
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The full canonical URL string.
    #[inline]
    pub fn href(&self) -> &str {
        &self.href
    }

    /// Returns the query parameter stored for `key`.
    ///
    /// `None` means the key is absent; `Some(&ParamValue::Null)` means the
    /// key is present with a null value. The two are never conflated.
    #[inline]
    pub fn get_param(&self, key: &str) -> Option<&ParamValue> {
        self.parts.query.get(key)
    }

    /// Creates a builder seeded with this URL's components.
    ///
    /// The builder owns its own copy of every component, including the
    /// query map, so mutating it never affects this value.
    pub fn to_builder(&self) -> UrlBuilder {
        UrlBuilder::from_parts(self.parts.clone())
    }
}

/// Prefixes `/` when the pathname is non-empty and lacks one.
fn normalize_pathname(pathname: &str) -> String {
    if !pathname.is_empty() && !pathname.starts_with('/') {
        format!("/{pathname}")
    } else {
        pathname.to_string()
    }
}

impl Display for Url {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href)
    }
}

impl FromStr for Url {
    type Err = ParseUrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(UrlBuilder::parse(s)?.build())
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
impl serde::Serialize for Url {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.href)
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
impl<'de> serde::Deserialize<'de> for Url {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let href = String::deserialize(deserializer)?;
        href.parse().map_err(serde::de::Error::custom)
    }
}
