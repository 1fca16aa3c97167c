//! Per-component character validation.

use std::fmt;

use crate::charset::char_set;
use crate::error::{ErrorKind, UriError};
use crate::escape::{check_percent_encoding, check_sitemap_encoding};
use crate::options::Mode;

/// A URI component.
///
/// Only [`Userinfo`](Self::Userinfo), [`Path`](Self::Path),
/// [`Query`](Self::Query) and [`Fragment`](Self::Fragment) can be checked
/// or transcoded character by character; schemes and domains have their
/// own validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// `scheme`
    Scheme,
    /// `userinfo`
    Userinfo,
    /// Domain label of a `host`
    Domain,
    /// `path`
    Path,
    /// `query`
    Query,
    /// `fragment`
    Fragment,
}

impl Component {
    /// Returns the lowercase component name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheme => "scheme",
            Self::Userinfo => "userinfo",
            Self::Domain => "domain",
            Self::Path => "path",
            Self::Query => "query",
            Self::Fragment => "fragment",
        }
    }

    /// Returns true if the component is checked character by character.
    #[must_use]
    pub const fn is_checkable(self) -> bool {
        matches!(self, Self::Userinfo | Self::Path | Self::Query | Self::Fragment)
    }

    /// Returns the error kind reported for a disallowed character.
    #[must_use]
    pub const fn invalid_char_kind(self) -> ErrorKind {
        match self {
            Self::Scheme => ErrorKind::InvalidSchemeChar,
            Self::Userinfo => ErrorKind::InvalidUserinfoChar,
            Self::Domain => ErrorKind::InvalidHost,
            Self::Path => ErrorKind::InvalidPathChar,
            Self::Query => ErrorKind::InvalidQueryChar,
            Self::Fragment => ErrorKind::InvalidFragmentChar,
        }
    }

    pub(crate) fn ensure_checkable(self, input: &str) -> Result<(), UriError> {
        if self.is_checkable() {
            Ok(())
        } else {
            Err(UriError::new(
                ErrorKind::InvalidCheckingComponent,
                input,
                format!("{self} cannot be checked character by character"),
            ))
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validates the characters of one component.
///
/// An absent component is valid except for the path; an empty path is
/// valid. Percent-encoded triplets, and in sitemap mode entity escapes,
/// are consumed as single units.
///
/// # Errors
///
/// - `INVALID_CHECKING_COMPONENT` for schemes and domains
/// - `MISSING_PATH` for an absent path
/// - `INVALID_<COMPONENT>_CHAR` on the first disallowed character
/// - `INVALID_PERCENT_ENCODING` / `INVALID_SITEMAP_ENCODING` on a broken escape
///
/// # Examples
///
/// ```
/// use strict_uri::{check_component, Component, ErrorKind, Mode};
///
/// assert!(check_component(Some("/a%20b"), Component::Path, Mode::Standard).is_ok());
/// assert!(check_component(None, Component::Query, Mode::Standard).is_ok());
///
/// let err = check_component(Some("/A"), Component::Path, Mode::Sitemap).unwrap_err();
/// assert_eq!(err.kind, ErrorKind::InvalidPathChar);
/// ```
pub fn check_component(value: Option<&str>, component: Component, mode: Mode) -> Result<(), UriError> {
    component.ensure_checkable(value.unwrap_or_default())?;

    let Some(s) = value else {
        if component == Component::Path {
            return Err(UriError::new(ErrorKind::MissingPath, "", "path is absent"));
        }
        return Ok(());
    };

    let set = char_set(component, mode);
    let mut i = 0;
    while let Some(c) = s[i..].chars().next() {
        if !set.contains(c) {
            return Err(UriError::new(
                component.invalid_char_kind(),
                s,
                format!("invalid {component} character '{c}' at position {i}"),
            ));
        }

        let mut skip = check_percent_encoding(s, i)?;
        if mode == Mode::Sitemap {
            skip += check_sitemap_encoding(s, i)?;
        }
        i += c.len_utf8() + skip;
    }

    Ok(())
}
