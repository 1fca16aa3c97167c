//! Lookahead scanners for escape sequences.
//!
//! Both scanners look at the character under a cursor and report how many
//! *further* bytes belong to the escape starting there, so the caller's
//! loop can step over the whole sequence at once. They never decode.

use crate::charset::is_percent_encoding_char;
use crate::error::{ErrorKind, UriError};

/// Sitemap entity escapes, in matching order.
pub const SITEMAP_ENTITIES: [(char, &str); 2] = [('&', "&amp;"), ('\'', "&apos;")];

/// Percent triplets substituted while decoding sitemap strings.
pub const SITEMAP_PERCENT_ESCAPES: [(char, &str); 1] = [('*', "%2A")];

/// Returns the entity escape for `c`, if the sitemap dialect has one.
#[must_use]
pub fn sitemap_entity(c: char) -> Option<&'static str> {
    SITEMAP_ENTITIES
        .iter()
        .find(|(ch, _)| *ch == c)
        .map(|(_, code)| *code)
}

/// Checks the percent-encoded triplet at byte offset `i` of `s`.
///
/// Returns `Ok(0)` if `s[i]` is not `%`, and `Ok(2)` if it starts a valid
/// triplet `%XX` with uppercase hex digits.
///
/// # Errors
///
/// Returns `INVALID_PERCENT_ENCODING` if the `%` is not followed by two
/// hex digits.
///
/// # Examples
///
/// ```
/// use strict_uri::check_percent_encoding;
///
/// assert_eq!(check_percent_encoding("a%20b", 1).unwrap(), 2);
/// assert_eq!(check_percent_encoding("a%20b", 0).unwrap(), 0);
/// assert!(check_percent_encoding("a%2", 1).is_err());
/// ```
pub fn check_percent_encoding(s: &str, i: usize) -> Result<usize, UriError> {
    let bytes = s.as_bytes();
    if bytes.get(i) != Some(&b'%') {
        return Ok(0);
    }

    match (bytes.get(i + 1), bytes.get(i + 2)) {
        (Some(&hi), Some(&lo))
            if is_percent_encoding_char(char::from(hi)) && is_percent_encoding_char(char::from(lo)) =>
        {
            Ok(2)
        }
        _ => {
            let end = (i + 3).min(bytes.len());
            let seq = s.get(i..end).unwrap_or(&s[i..]);
            Err(UriError::new(
                ErrorKind::InvalidPercentEncoding,
                s,
                format!("'{seq}' at position {i} is not a valid percent-encoded octet"),
            ))
        }
    }
}

/// Checks the sitemap entity escape at byte offset `i` of `s`.
///
/// Returns `Ok(0)` if `s[i]` is not `&`, otherwise the number of bytes
/// following the `&` that belong to the matched entity.
///
/// # Errors
///
/// Returns `INVALID_SITEMAP_ENCODING` if the `&` starts no known entity.
///
/// # Examples
///
/// ```
/// use strict_uri::check_sitemap_encoding;
///
/// assert_eq!(check_sitemap_encoding("a=1&amp;b=2", 3).unwrap(), 4);
/// assert_eq!(check_sitemap_encoding("&apos;", 0).unwrap(), 5);
/// assert!(check_sitemap_encoding("a=1&b=2", 3).is_err());
/// ```
pub fn check_sitemap_encoding(s: &str, i: usize) -> Result<usize, UriError> {
    if s.as_bytes().get(i) != Some(&b'&') {
        return Ok(0);
    }

    let rest = &s[i..];
    for (_, code) in SITEMAP_ENTITIES {
        if rest.starts_with(code) {
            return Ok(code.len() - 1);
        }
    }

    Err(UriError::new(
        ErrorKind::InvalidSitemapEncoding,
        s,
        format!("'&' at position {i} does not start '&amp;' or '&apos;'"),
    ))
}
