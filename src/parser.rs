//! Grammar decomposition of URI strings and its inverse.
//!
//! # Grammar Reference
//!
//! ```abnf
//! URI       = scheme ":" hier-part [ "?" query ] [ "#" fragment ]
//! hier-part = "//" authority path-abempty / path-absolute / path-rootless / path-empty
//! authority = [ userinfo "@" ] host [ ":" port ]
//! ```
//!
//! Parsing never fails: a string without a plausible scheme yields an
//! all-absent [`ParsedUri`], and a broken host leaves the ASCII fields
//! absent while the Unicode fields keep what was found.

use std::fmt;

use crate::cast::to_int;
use crate::constants::{MAX_PORT, MIN_HOST_LENGTH, MIN_PORT};
use crate::ip::is_ipv6;
use crate::punycode;

/// The port of an authority.
///
/// Ports that do not cast to an integer in `0..=65535` are kept verbatim so
/// validators can report why they are invalid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Port {
    /// A port number
    Number(u16),
    /// A port that is not a valid number
    Raw(String),
}

impl Port {
    /// Casts `raw` to a port number, keeping the raw text on failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use strict_uri::Port;
    ///
    /// assert_eq!(Port::parse("8080"), Port::Number(8080));
    /// assert_eq!(Port::parse("80a"), Port::Raw("80a".to_string()));
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        to_int(raw, Some(MIN_PORT..=MAX_PORT))
            .and_then(|n| u16::try_from(n).ok())
            .map_or_else(|| Self::Raw(raw.to_string()), Self::Number)
    }

    /// Returns the port number, if the port is valid.
    #[must_use]
    pub const fn number(&self) -> Option<u16> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Raw(_) => None,
        }
    }
}

impl From<u16> for Port {
    fn from(port: u16) -> Self {
        Self::Number(port)
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Raw(s) => f.write_str(s),
        }
    }
}

/// A URI decomposed into its components.
///
/// Produced by [`parse_uri`]; never validated. Use the `check_*` functions
/// for a [`ValidatedUri`](crate::ValidatedUri).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ParsedUri {
    scheme: Option<String>,
    authority: Option<String>,
    authority_unicode: Option<String>,
    userinfo: Option<String>,
    host: Option<String>,
    host_unicode: Option<String>,
    port: Option<Port>,
    path: Option<String>,
    path_with_query_fragment: Option<String>,
    query: Option<String>,
    fragment: Option<String>,
    canonical_form: String,
}

impl ParsedUri {
    /// Returns the lowercased scheme.
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Returns the authority in ASCII form; absent if the host is invalid.
    #[must_use]
    pub fn authority(&self) -> Option<&str> {
        self.authority.as_deref()
    }

    /// Returns the authority in Unicode form, present whenever the URI had
    /// an authority segment.
    #[must_use]
    pub fn authority_unicode(&self) -> Option<&str> {
        self.authority_unicode.as_deref()
    }

    /// Returns the userinfo.
    #[must_use]
    pub fn userinfo(&self) -> Option<&str> {
        self.userinfo.as_deref()
    }

    /// Returns the ASCII host; absent if the host did not transcode.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Returns the Unicode host, present whenever the URI had a host
    /// segment, even an invalid one.
    #[must_use]
    pub fn host_unicode(&self) -> Option<&str> {
        self.host_unicode.as_deref()
    }

    /// Returns the port.
    #[must_use]
    pub const fn port(&self) -> Option<&Port> {
        self.port.as_ref()
    }

    /// Returns the path; present whenever the scheme is.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Returns the raw text after the authority.
    #[must_use]
    pub fn path_with_query_fragment(&self) -> Option<&str> {
        self.path_with_query_fragment.as_deref()
    }

    /// Returns the query, without the leading `?`.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Returns the fragment, without the leading `#`.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Returns the recomposed URI, or an empty string if the components
    /// cannot be recomposed.
    #[must_use]
    pub fn canonical_form(&self) -> &str {
        &self.canonical_form
    }

    /// Returns true if the URI had an authority segment whose host did not
    /// survive transcoding.
    #[must_use]
    pub const fn has_invalid_host(&self) -> bool {
        self.host.is_none() && self.host_unicode.is_some()
    }

    /// Returns the components for [`recompose`], using the ASCII host.
    #[must_use]
    pub fn to_parts(&self) -> UriParts<'_> {
        UriParts {
            scheme: self.scheme(),
            userinfo: self.userinfo(),
            host: self.host(),
            port: self.port(),
            path: self.path(),
            query: self.query(),
            fragment: self.fragment(),
        }
    }
}

/// Components to recompose into a URI string.
///
/// # Examples
///
/// ```
/// use strict_uri::{recompose, Port, UriParts};
///
/// let port = Port::from(8080);
/// let parts = UriParts::new()
///     .scheme("http")
///     .host("example.com")
///     .port(&port)
///     .path("/a")
///     .query("b=1");
/// assert_eq!(recompose(&parts), "http://example.com:8080/a?b=1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UriParts<'a> {
    /// Scheme, without `:`
    pub scheme: Option<&'a str>,
    /// Userinfo, without `@`
    pub userinfo: Option<&'a str>,
    /// Host, unbracketed
    pub host: Option<&'a str>,
    /// Port
    pub port: Option<&'a Port>,
    /// Path
    pub path: Option<&'a str>,
    /// Query, without `?`
    pub query: Option<&'a str>,
    /// Fragment, without `#`
    pub fragment: Option<&'a str>,
}

impl<'a> UriParts<'a> {
    /// Creates an empty set of components.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scheme: None,
            userinfo: None,
            host: None,
            port: None,
            path: None,
            query: None,
            fragment: None,
        }
    }

    /// Sets the scheme.
    #[must_use]
    pub const fn scheme(mut self, scheme: &'a str) -> Self {
        self.scheme = Some(scheme);
        self
    }

    /// Sets the userinfo.
    #[must_use]
    pub const fn userinfo(mut self, userinfo: &'a str) -> Self {
        self.userinfo = Some(userinfo);
        self
    }

    /// Sets the host.
    #[must_use]
    pub const fn host(mut self, host: &'a str) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the port.
    #[must_use]
    pub const fn port(mut self, port: &'a Port) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the path.
    #[must_use]
    pub const fn path(mut self, path: &'a str) -> Self {
        self.path = Some(path);
        self
    }

    /// Sets the query.
    #[must_use]
    pub const fn query(mut self, query: &'a str) -> Self {
        self.query = Some(query);
        self
    }

    /// Sets the fragment.
    #[must_use]
    pub const fn fragment(mut self, fragment: &'a str) -> Self {
        self.fragment = Some(fragment);
        self
    }
}

/// Decomposes `input` into its components.
///
/// Never fails. The scheme and host are lowercased, the host is
/// transcoded with IDNA, and the canonical form is recomposed from the
/// result.
///
/// # Examples
///
/// ```
/// use strict_uri::parse_uri;
///
/// let uri = parse_uri("HTTP://user@exèmple.com:8080/a?b#c");
/// assert_eq!(uri.scheme(), Some("http"));
/// assert_eq!(uri.host(), Some("xn--exmple-4ua.com"));
/// assert_eq!(uri.host_unicode(), Some("exèmple.com"));
/// assert_eq!(uri.canonical_form(), "http://user@xn--exmple-4ua.com:8080/a?b#c");
///
/// assert_eq!(parse_uri("no scheme here").scheme(), None);
/// ```
#[must_use]
pub fn parse_uri(input: &str) -> ParsedUri {
    let Some((scheme, rest)) = split_scheme(input) else {
        return ParsedUri::default();
    };

    let mut uri = ParsedUri {
        scheme: Some(scheme.to_lowercase()),
        ..ParsedUri::default()
    };

    let tail = match rest.strip_prefix("//") {
        Some(after) => {
            let end = after.find(['/', '?', '#']).unwrap_or(after.len());
            uri.apply_authority(&after[..end]);
            &after[end..]
        }
        None => rest,
    };
    uri.path_with_query_fragment = Some(tail.to_string());

    let (before_fragment, fragment) = match tail.split_once('#') {
        Some((head, fragment)) => (head, Some(fragment)),
        None => (tail, None),
    };
    let (path, query) = match before_fragment.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (before_fragment, None),
    };
    uri.path = Some(path.to_string());
    uri.query = query.map(str::to_string);
    uri.fragment = fragment.map(str::to_string);

    uri.canonical_form = recompose(&uri.to_parts());
    uri
}

/// Recomposes a URI string from its components.
///
/// Returns an empty string when the components cannot form a URI: the
/// scheme must be non-empty and the path present; with a host, the path
/// must be empty or start with `/` and the host must be at least three
/// characters; without one, the path must not start with `//`. Userinfo,
/// query and fragment are only written when non-empty, the port only
/// when it is a valid number. IPv6 hosts are bracketed.
#[must_use]
pub fn recompose(parts: &UriParts<'_>) -> String {
    let Some(scheme) = parts.scheme.filter(|s| !s.is_empty()) else {
        return String::new();
    };
    let Some(path) = parts.path else {
        return String::new();
    };

    let mut out = String::with_capacity(scheme.len() + path.len() + 16);
    out.push_str(scheme);
    out.push(':');

    if let Some(host) = parts.host {
        if !(path.is_empty() || path.starts_with('/')) || host.chars().count() < MIN_HOST_LENGTH {
            return String::new();
        }
        out.push_str("//");
        if let Some(userinfo) = parts.userinfo.filter(|u| !u.is_empty()) {
            out.push_str(userinfo);
            out.push('@');
        }
        push_host(&mut out, host);
        if let Some(port) = parts.port.and_then(Port::number) {
            out.push(':');
            out.push_str(&port.to_string());
        }
    } else if path.starts_with("//") {
        return String::new();
    }

    out.push_str(path);
    if let Some(query) = parts.query.filter(|q| !q.is_empty()) {
        out.push('?');
        out.push_str(query);
    }
    if let Some(fragment) = parts.fragment.filter(|f| !f.is_empty()) {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

/// Splits `scheme ":" rest`; the scheme runs up to the first `:` and may not
/// contain `/`, `?` or `#`.
fn split_scheme(input: &str) -> Option<(&str, &str)> {
    let end = input.find([':', '/', '?', '#'])?;
    if end == 0 || input.as_bytes()[end] != b':' {
        return None;
    }
    Some((&input[..end], &input[end + 1..]))
}

fn push_host(out: &mut String, host: &str) {
    if host.contains(':') {
        out.push('[');
        out.push_str(host);
        out.push(']');
    } else {
        out.push_str(host);
    }
}

impl ParsedUri {
    fn apply_authority(&mut self, authority: &str) {
        let (userinfo, host_port) = match authority.rsplit_once('@') {
            Some((userinfo, host_port)) => (Some(userinfo), host_port),
            None => (None, authority),
        };

        let (raw_host, raw_port, bracketed) = split_host_port(host_port);
        let lower = raw_host.to_lowercase();
        // Brackets hold IPv6 literals only.
        let (host, host_unicode) = if bracketed {
            (is_ipv6(&lower).then(|| lower.clone()), lower)
        } else {
            transcode_host(lower)
        };

        self.userinfo = userinfo.map(str::to_string);
        self.port = raw_port.filter(|p| !p.is_empty()).map(Port::parse);

        self.authority = host
            .as_deref()
            .map(|h| build_authority(userinfo, h, self.port.as_ref()));
        self.authority_unicode = Some(build_authority(userinfo, &host_unicode, self.port.as_ref()));
        self.host = host;
        self.host_unicode = Some(host_unicode);
    }
}

/// Splits `host [":" port]`, recognizing bracketed IPv6 literals.
fn split_host_port(host_port: &str) -> (&str, Option<&str>, bool) {
    if let Some(inner) = host_port.strip_prefix('[') {
        if let Some((host, after)) = inner.split_once(']') {
            if after.is_empty() {
                return (host, None, true);
            }
            if let Some(port) = after.strip_prefix(':') {
                return (host, Some(port), true);
            }
        }
    }

    match host_port.split_once(':') {
        Some((host, port)) => (host, Some(port), false),
        None => (host_port, None, false),
    }
}

/// Computes the ASCII and Unicode forms of a lowercased host.
///
/// The ASCII form is absent when either transcoding fails.
fn transcode_host(lower: String) -> (Option<String>, String) {
    let ascii = punycode::to_ascii(&lower);
    let (unicode, unicode_ok) = punycode::to_unicode_lossy(&lower);
    let valid = !ascii.is_empty() && unicode_ok && !unicode.is_empty();

    let (host, host_unicode) = if lower != ascii {
        log::trace!("host {lower:?} is Unicode; ASCII form {ascii:?}");
        (ascii, lower)
    } else if lower != unicode {
        log::trace!("host {lower:?} is punycoded; Unicode form {unicode:?}");
        (lower, unicode)
    } else {
        (lower.clone(), lower)
    };

    (valid.then_some(host), host_unicode)
}

fn build_authority(userinfo: Option<&str>, host: &str, port: Option<&Port>) -> String {
    let mut out = String::with_capacity(host.len() + 16);
    if let Some(userinfo) = userinfo {
        out.push_str(userinfo);
        out.push('@');
    }
    push_host(&mut out, host);
    if let Some(port) = port {
        out.push(':');
        out.push_str(&port.to_string());
    }
    out
}
