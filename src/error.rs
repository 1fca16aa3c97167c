//! Error types for URI validation and encoding.

use std::fmt;

/// An error that occurred while validating, encoding or decoding a URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriError {
    /// The input that was rejected
    pub input: String,
    /// The stable failure kind
    pub kind: ErrorKind,
    /// Explanation naming the offending character or substring
    pub message: String,
}

/// Stable failure identifiers.
///
/// Callers match on these; [`ErrorKind::as_str`] gives the identifier
/// string (`INVALID_HOST`, `MAX_LENGTH_URL`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input is not text
    InvalidType,
    /// No scheme could be found
    MissingScheme,
    /// The scheme delimiter is present but the scheme is empty
    EmptyScheme,
    /// The path is absent
    MissingPath,
    /// The path conflicts with the presence or absence of an authority
    InvalidPath,
    /// The host is neither an IP literal nor a valid domain
    InvalidHost,
    /// The port is not an integer in `0..=65535`
    InvalidPort,
    /// The scheme is not allowed by the profile
    InvalidScheme,
    /// The scheme contains a disallowed character
    InvalidSchemeChar,
    /// The profile requires an authority and none was found
    MissingAuthority,
    /// A `%` is not followed by two uppercase hex digits
    InvalidPercentEncoding,
    /// A `&` does not start a known sitemap entity
    InvalidSitemapEncoding,
    /// The userinfo contains a disallowed character
    InvalidUserinfoChar,
    /// The path contains a disallowed character
    InvalidPathChar,
    /// The query contains a disallowed character
    InvalidQueryChar,
    /// The fragment contains a disallowed character
    InvalidFragmentChar,
    /// The component cannot be checked or transcoded character by character
    InvalidCheckingComponent,
    /// The canonical URL exceeds the profile's length limit
    MaxLengthUrl,
}

impl ErrorKind {
    /// Returns the stable identifier of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidType => "INVALID_TYPE",
            Self::MissingScheme => "MISSING_SCHEME",
            Self::EmptyScheme => "EMPTY_SCHEME",
            Self::MissingPath => "MISSING_PATH",
            Self::InvalidPath => "INVALID_PATH",
            Self::InvalidHost => "INVALID_HOST",
            Self::InvalidPort => "INVALID_PORT",
            Self::InvalidScheme => "INVALID_SCHEME",
            Self::InvalidSchemeChar => "INVALID_SCHEME_CHAR",
            Self::MissingAuthority => "MISSING_AUTHORITY",
            Self::InvalidPercentEncoding => "INVALID_PERCENT_ENCODING",
            Self::InvalidSitemapEncoding => "INVALID_SITEMAP_ENCODING",
            Self::InvalidUserinfoChar => "INVALID_USERINFO_CHAR",
            Self::InvalidPathChar => "INVALID_PATH_CHAR",
            Self::InvalidQueryChar => "INVALID_QUERY_CHAR",
            Self::InvalidFragmentChar => "INVALID_FRAGMENT_CHAR",
            Self::InvalidCheckingComponent => "INVALID_CHECKING_COMPONENT",
            Self::MaxLengthUrl => "MAX_LENGTH_URL",
        }
    }
}

impl UriError {
    /// Creates an error of `kind` for `input`.
    pub fn new(kind: ErrorKind, input: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for UriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in '{}': {}", self.kind, self.input, self.message)
    }
}

impl std::error::Error for UriError {}

#[cfg(feature = "serde")]
impl serde::Serialize for ErrorKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}
