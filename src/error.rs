//! Some common error types.

/// A possible error value when parsing a URL string.
///
/// Parsing is all-or-nothing: when the input has no recognizable
/// scheme/host structure the whole parse fails and no partial result is
/// produced. Only string construction returns this error; component
/// setters on [`UrlBuilder`](crate::UrlBuilder) cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseUrlError {
    /// The input contains no `://`, so no scheme/host structure can be
    /// recognized.
    #[error("malformed URL: missing `://` scheme separator")]
    MissingSchemeSeparator,

    /// The scheme before `://` is empty or is not of the form
    /// `[A-Za-z][A-Za-z0-9+.-]*`.
    #[error("malformed URL: invalid scheme `{0}`")]
    InvalidScheme(String),

    /// The port after the host's `:` is not an unsigned number.
    #[error("malformed URL: invalid port `{0}`")]
    InvalidPort(String),
}
