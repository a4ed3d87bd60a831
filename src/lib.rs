//! `weburl` is a URL value object with an immutable-construction builder.
//!
//! A [`UrlBuilder`] is created empty, from an existing [`Url`], or by
//! parsing a URL string; its components are then mutated through chained
//! setters, and [`build`](UrlBuilder::build) finalizes them into an
//! immutable [`Url`] whose derived fields (origin, auth, host, search,
//! path, href) are computed once and never change. Query parameters keep
//! their insertion order and their types (string, integer, boolean, null,
//! nested URL) until serialization.
//!
//! # Example
//!
//! ```
//! use weburl::{ParamValue, Url, UrlBuilder};
//!
//! let url = UrlBuilder::new()
//!     .protocol("https:")
//!     .hostname("deno.land")
//!     .port(8080u16)
//!     .pathname("path/to/file")
//!     .param("x", "hello_world")
//!     .param("y", 2)
//!     .build();
//! assert_eq!(
//!     url.href(),
//!     "https://deno.land:8080/path/to/file?x=hello_world&y=2"
//! );
//!
//! // a value can seed a new builder
//! let next = url.to_builder().remove_param("y").build();
//! assert_eq!(next.search(), "?x=hello_world");
//!
//! // parsed query values are never re-typed
//! let parsed: Url = "https://deno.land?y=2".parse()?;
//! assert_eq!(parsed.get_param("y"), Some(&ParamValue::Str("2".into())));
//! # Ok::<(), weburl::ParseUrlError>(())
//! ```
//!
//! # Features
//!
//! To avoid compiling unused dependencies, integrations are gated and
//! disabled by default:
//!
//! |Feature           |Description                                    |
//! |------------------|-----------------------------------------------|
//! |serde             | Serialize a [`Url`] as its href string        |

#![forbid(unsafe_code)]
#![deny(unreachable_pub)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

pub mod error;

mod builder;
mod parse;
mod query;
mod url;

pub use builder::{PortValue, UrlBuilder};
pub use error::ParseUrlError;
pub use query::{ParamValue, QueryMap};
pub use url::Url;
