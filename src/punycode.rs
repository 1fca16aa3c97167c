//! Unicode/ASCII domain transcoding (IDNA `ToASCII` / `ToUnicode`).
//!
//! Thin adapter over the `idna` crate. Failures collapse to an empty
//! string, which callers treat as "invalid domain". Domains containing a
//! forbidden host code point (WHATWG URL) fail before reaching `idna`.

/// Converts a domain to its ASCII (punycode) form.
///
/// Returns an empty string if the domain cannot be transcoded.
///
/// # Examples
///
/// ```
/// use strict_uri::punycode::to_ascii;
///
/// assert_eq!(to_ascii("中文.com"), "xn--fiq228c.com");
/// assert_eq!(to_ascii("exa mple.com"), "");
/// ```
#[must_use]
pub fn to_ascii(domain: &str) -> String {
    if has_forbidden_code_point(domain) {
        return String::new();
    }
    idna::domain_to_ascii(domain).unwrap_or_default()
}

/// Converts a domain to its Unicode form.
///
/// Returns an empty string if the domain cannot be transcoded.
///
/// # Examples
///
/// ```
/// use strict_uri::punycode::to_unicode;
///
/// assert_eq!(to_unicode("xn--fiq228c.com"), "中文.com");
/// ```
#[must_use]
pub fn to_unicode(domain: &str) -> String {
    match to_unicode_lossy(domain) {
        (unicode, true) => unicode,
        (_, false) => String::new(),
    }
}

/// Converts a domain to its Unicode form, keeping the best-effort result
/// even when transcoding reports errors.
///
/// The flag is false if any label failed to transcode.
pub(crate) fn to_unicode_lossy(domain: &str) -> (String, bool) {
    let (unicode, result) = idna::domain_to_unicode(domain);
    let ok = result.is_ok() && !has_forbidden_code_point(domain);
    (unicode, ok)
}

fn has_forbidden_code_point(domain: &str) -> bool {
    domain.chars().any(|c| {
        c.is_ascii_control()
            || matches!(
                c,
                ' ' | '#' | '%' | '/' | ':' | '<' | '>' | '?' | '@' | '[' | '\\' | ']' | '^' | '|'
            )
    })
}
