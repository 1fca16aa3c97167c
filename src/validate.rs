//! Validators composing the parser with the component, domain and IP checks.
//!
//! Every validator either returns a fully checked [`ValidatedUri`] or the
//! first violation found. Profiles:
//!
//! | Function | Schemes | Authority | Characters | Length |
//! |----------|---------|-----------|------------|--------|
//! | [`check_uri_syntax`] | any | optional | unchecked | unlimited |
//! | [`check_uri`] | any | optional | standard | unlimited |
//! | [`check_http_url`] | `http`/`https` per flags | required | per `sitemap` flag | 2048 |

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use crate::charset::is_scheme_char;
use crate::component::{Component, check_component};
use crate::constants::{HTTP_SCHEMES, MAX_URL_LENGTH, MIN_HOST_LENGTH};
use crate::domain::is_domain;
use crate::error::{ErrorKind, UriError};
use crate::ip::is_ip;
use crate::options::{Mode, Options};
use crate::parser::{ParsedUri, Port, parse_uri};

/// A URI that passed validation.
///
/// Dereferences to the [`ParsedUri`] it was built from. `Display` and
/// `AsRef<str>` give the canonical form.
///
/// # Examples
///
/// ```
/// use strict_uri::ValidatedUri;
///
/// let uri: ValidatedUri = "HTTP://Example.com/a".parse().unwrap();
/// assert_eq!(uri.host(), Some("example.com"));
/// assert_eq!(uri.to_string(), "http://example.com/a");
///
/// assert!(ValidatedUri::from_bytes(b"\xff").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUri(ParsedUri);

impl ValidatedUri {
    /// Validates UTF-8 bytes with [`check_uri`].
    ///
    /// # Errors
    ///
    /// Returns `INVALID_TYPE` if the bytes are not UTF-8, otherwise any
    /// error of [`check_uri`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, UriError> {
        let input = std::str::from_utf8(bytes).map_err(|e| {
            rejected(UriError::new(
                ErrorKind::InvalidType,
                String::from_utf8_lossy(bytes),
                format!("input is not text: {e}"),
            ))
        })?;
        check_uri(input)
    }

    /// Returns the parsed record.
    #[must_use]
    pub const fn as_parsed(&self) -> &ParsedUri {
        &self.0
    }

    /// Consumes the wrapper, returning the parsed record.
    #[must_use]
    pub fn into_parsed(self) -> ParsedUri {
        self.0
    }
}

impl Deref for ValidatedUri {
    type Target = ParsedUri;

    fn deref(&self) -> &ParsedUri {
        &self.0
    }
}

impl AsRef<str> for ValidatedUri {
    fn as_ref(&self) -> &str {
        self.0.canonical_form()
    }
}

impl fmt::Display for ValidatedUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.canonical_form())
    }
}

impl FromStr for ValidatedUri {
    type Err = UriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_uri(s)
    }
}

impl TryFrom<&str> for ValidatedUri {
    type Error = UriError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        check_uri(s)
    }
}

impl TryFrom<&[u8]> for ValidatedUri {
    type Error = UriError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ValidatedUri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(serde::Serialize)]
        struct Record<'a> {
            #[serde(flatten)]
            uri: &'a ParsedUri,
            valid: bool,
        }

        Record {
            uri: &self.0,
            valid: true,
        }
        .serialize(serializer)
    }
}

/// Checks the structure of a URI without looking at its characters.
///
/// Requires a scheme and a path, a path consistent with the presence of an
/// authority, and a host that survived transcoding.
///
/// # Errors
///
/// - `EMPTY_SCHEME` / `MISSING_SCHEME` if no scheme was found
/// - `MISSING_PATH` if the path is absent
/// - `INVALID_PATH` if the path is not empty and lacks a leading `/` after an
///   authority, or starts with `//` without one
/// - `INVALID_HOST` if the host is shorter than three characters or did not
///   transcode
///
/// # Examples
///
/// ```
/// use strict_uri::{check_uri_syntax, ErrorKind};
///
/// assert!(check_uri_syntax("urn:isbn:0451450523").is_ok());
/// assert_eq!(check_uri_syntax("http:////path").unwrap_err().kind, ErrorKind::InvalidPath);
/// assert_eq!(check_uri_syntax("http://").unwrap_err().kind, ErrorKind::InvalidHost);
/// ```
pub fn check_uri_syntax(input: &str) -> Result<ValidatedUri, UriError> {
    let uri = parse_uri(input);
    check_syntax(input, &uri).map_err(rejected)?;
    Ok(ValidatedUri(uri))
}

/// Checks a generic URI with standard character sets.
///
/// Adds to [`check_uri_syntax`]: scheme characters, userinfo characters,
/// a host that is an IP literal or a domain, an integer port, and path,
/// query and fragment characters.
///
/// # Errors
///
/// Any error of [`check_uri_syntax`], plus `INVALID_SCHEME_CHAR`,
/// `INVALID_HOST`, `INVALID_PORT`, `INVALID_<COMPONENT>_CHAR` and
/// `INVALID_PERCENT_ENCODING`.
///
/// # Examples
///
/// ```
/// use strict_uri::{check_uri, ErrorKind};
///
/// let uri = check_uri("foo://user@example.com:8042/over/there?name=ferret#nose").unwrap();
/// assert_eq!(uri.port().and_then(|p| p.number()), Some(8042));
///
/// assert_eq!(check_uri("foo://example.com:80a").unwrap_err().kind, ErrorKind::InvalidPort);
/// assert_eq!(check_uri("f_o://example.com").unwrap_err().kind, ErrorKind::InvalidSchemeChar);
/// ```
pub fn check_uri(input: &str) -> Result<ValidatedUri, UriError> {
    check_uri_with_mode(input, Mode::Standard)
}

/// Checks a generic URI with the character sets of `mode`.
///
/// # Errors
///
/// See [`check_uri`]; in [`Mode::Sitemap`] also `INVALID_SITEMAP_ENCODING`.
pub fn check_uri_with_mode(input: &str, mode: Mode) -> Result<ValidatedUri, UriError> {
    let uri = parse_uri(input);
    check_parsed(input, &uri, mode).map_err(rejected)?;
    Ok(ValidatedUri(uri))
}

/// Checks an HTTP(S) URL.
///
/// Reads `https` (only `https` allowed), `web` (`http` or `https`) and
/// `sitemap` (sitemap character sets). Without `https` or `web` only `http`
/// is allowed.
///
/// # Errors
///
/// Any error of [`check_uri_with_mode`], plus `INVALID_SCHEME`,
/// `MISSING_AUTHORITY` and `MAX_LENGTH_URL`.
///
/// # Examples
///
/// ```
/// use strict_uri::{check_http_url, ErrorKind, Options};
///
/// assert!(check_http_url("http://example.com/", Options::new()).is_ok());
/// let err = check_http_url("https://example.com/", Options::new()).unwrap_err();
/// assert_eq!(err.kind, ErrorKind::InvalidScheme);
/// assert!(check_http_url("https://example.com/", Options::web()).is_ok());
/// ```
pub fn check_http_url(input: &str, opts: Options) -> Result<ValidatedUri, UriError> {
    let uri = parse_uri(input);
    check_http_parsed(input, &uri, opts).map_err(rejected)?;
    Ok(ValidatedUri(uri))
}

/// Checks an `https` URL.
///
/// # Errors
///
/// See [`check_http_url`].
pub fn check_https_url(input: &str) -> Result<ValidatedUri, UriError> {
    check_http_url(input, Options::https())
}

/// Checks an `http` URL with sitemap character sets.
///
/// # Errors
///
/// See [`check_http_url`].
pub fn check_http_sitemap_url(input: &str) -> Result<ValidatedUri, UriError> {
    check_http_url(input, Options::new().with_sitemap(true))
}

/// Checks an `https` URL with sitemap character sets.
///
/// # Errors
///
/// See [`check_http_url`].
pub fn check_https_sitemap_url(input: &str) -> Result<ValidatedUri, UriError> {
    check_http_url(input, Options::https().with_sitemap(true))
}

/// Checks an `http` or `https` URL.
///
/// # Errors
///
/// See [`check_http_url`].
pub fn check_web_url(input: &str) -> Result<ValidatedUri, UriError> {
    check_http_url(input, Options::web())
}

/// Checks an `http` or `https` URL with sitemap character sets.
///
/// # Errors
///
/// See [`check_http_url`].
///
/// # Examples
///
/// ```
/// use strict_uri::{check_sitemap_url, ErrorKind};
///
/// assert!(check_sitemap_url("https://example.com/there?a=5&amp;b=11").is_ok());
/// let err = check_sitemap_url("https://example.com/there?a=5&b=11").unwrap_err();
/// assert_eq!(err.kind, ErrorKind::InvalidSitemapEncoding);
/// ```
pub fn check_sitemap_url(input: &str) -> Result<ValidatedUri, UriError> {
    check_http_url(input, Options::sitemap())
}

pub(crate) fn rejected(err: UriError) -> UriError {
    log::debug!("rejected {:?}: {} ({})", err.input, err.kind, err.message);
    err
}

pub(crate) fn check_syntax(input: &str, uri: &ParsedUri) -> Result<(), UriError> {
    if uri.scheme().is_none() {
        return Err(if input.starts_with(':') {
            UriError::new(ErrorKind::EmptyScheme, input, "scheme before ':' is empty")
        } else {
            UriError::new(ErrorKind::MissingScheme, input, "no scheme found")
        });
    }

    let Some(path) = uri.path() else {
        return Err(UriError::new(ErrorKind::MissingPath, input, "path is absent"));
    };

    if let Some(host) = uri.host() {
        if !path.is_empty() && !path.starts_with('/') {
            return Err(UriError::new(
                ErrorKind::InvalidPath,
                input,
                format!("path '{path}' must be empty or start with '/' after an authority"),
            ));
        }
        if host.chars().count() < MIN_HOST_LENGTH {
            return Err(UriError::new(
                ErrorKind::InvalidHost,
                input,
                format!("host '{host}' is shorter than {MIN_HOST_LENGTH} characters"),
            ));
        }
    } else if path.starts_with("//") {
        return Err(UriError::new(
            ErrorKind::InvalidPath,
            input,
            format!("path '{path}' cannot start with '//' without an authority"),
        ));
    } else if let Some(host) = uri.host_unicode() {
        return Err(UriError::new(
            ErrorKind::InvalidHost,
            input,
            format!("host '{host}' is not a valid domain name"),
        ));
    }

    Ok(())
}

pub(crate) fn check_scheme_chars(input: &str, scheme: &str) -> Result<(), UriError> {
    match scheme
        .chars()
        .enumerate()
        .find(|&(i, c)| !is_scheme_char(c, i == 0))
    {
        Some((i, c)) => Err(UriError::new(
            ErrorKind::InvalidSchemeChar,
            input,
            format!("invalid scheme character '{c}' at position {i}"),
        )),
        None => Ok(()),
    }
}

/// Checks the scheme against the profile flags.
pub(crate) fn check_http_scheme(input: &str, scheme: &str, opts: Options) -> Result<(), UriError> {
    let allowed: &[&str] = if opts.https {
        &HTTP_SCHEMES[1..]
    } else if opts.web {
        &HTTP_SCHEMES
    } else {
        &HTTP_SCHEMES[..1]
    };

    if allowed.contains(&scheme) {
        Ok(())
    } else {
        Err(UriError::new(
            ErrorKind::InvalidScheme,
            input,
            format!("scheme '{scheme}' is not one of {}", allowed.join(", ")),
        ))
    }
}

pub(crate) fn check_host_and_port(input: &str, uri: &ParsedUri) -> Result<(), UriError> {
    let Some(host) = uri.host() else {
        return Ok(());
    };

    if !is_ip(host) && !is_domain(host) {
        let shown = uri.host_unicode().unwrap_or(host);
        return Err(UriError::new(
            ErrorKind::InvalidHost,
            input,
            format!("host '{shown}' is neither an IP address nor a domain name"),
        ));
    }

    if let Some(Port::Raw(port)) = uri.port() {
        return Err(UriError::new(
            ErrorKind::InvalidPort,
            input,
            format!("port '{port}' is not an integer between 0 and 65535"),
        ));
    }

    Ok(())
}

fn check_parsed(input: &str, uri: &ParsedUri, mode: Mode) -> Result<(), UriError> {
    check_syntax(input, uri)?;
    if let Some(scheme) = uri.scheme() {
        check_scheme_chars(input, scheme)?;
    }

    if uri.host().is_some() {
        check_component(uri.userinfo(), Component::Userinfo, mode)?;
        check_host_and_port(input, uri)?;
    }

    check_component(uri.path(), Component::Path, mode)?;
    check_component(uri.query(), Component::Query, mode)?;
    check_component(uri.fragment(), Component::Fragment, mode)?;
    Ok(())
}

fn check_http_parsed(input: &str, uri: &ParsedUri, opts: Options) -> Result<(), UriError> {
    check_parsed(input, uri, opts.mode())?;
    check_http_scheme(input, uri.scheme().unwrap_or_default(), opts)?;

    if uri.authority().is_none() {
        return Err(UriError::new(ErrorKind::MissingAuthority, input, "URL has no authority"));
    }

    check_length(input, uri.canonical_form())
}

pub(crate) fn check_length(input: &str, url: &str) -> Result<(), UriError> {
    let len = url.chars().count();
    if len > MAX_URL_LENGTH {
        return Err(UriError::new(
            ErrorKind::MaxLengthUrl,
            input,
            format!("URL is {len} characters long, the limit is {MAX_URL_LENGTH}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(result: Result<ValidatedUri, UriError>) -> Option<ErrorKind> {
        result.err().map(|e| e.kind)
    }

    #[test]
    fn syntax_scheme_errors() {
        assert_eq!(kind(check_uri_syntax("example.com")), Some(ErrorKind::MissingScheme));
        assert_eq!(kind(check_uri_syntax("")), Some(ErrorKind::MissingScheme));
        assert_eq!(kind(check_uri_syntax(":foo")), Some(ErrorKind::EmptyScheme));
    }

    #[test]
    fn syntax_path_errors() {
        assert_eq!(kind(check_uri_syntax("http:////path")), Some(ErrorKind::InvalidPath));
        assert_eq!(kind(check_uri_syntax("http:////")), Some(ErrorKind::InvalidPath));
    }

    #[test]
    fn syntax_host_errors() {
        assert_eq!(kind(check_uri_syntax("http://")), Some(ErrorKind::InvalidHost));
        assert_eq!(kind(check_uri_syntax("http://ab/")), Some(ErrorKind::InvalidHost));
        assert_eq!(kind(check_uri_syntax("http://exa mple.com")), Some(ErrorKind::InvalidHost));
    }

    #[test]
    fn syntax_ignores_characters() {
        assert!(check_uri_syntax("http://example.com/a b").is_ok());
        assert!(check_uri_syntax("foo:bar baz").is_ok());
    }

    #[test]
    fn uri_accepts_rfc_examples() {
        for input in [
            "ftp://ftp.is.co.za/rfc/rfc1808.txt",
            "http://www.ietf.org/rfc/rfc2396.txt",
            "ldap://[2001:db8::7]/c=GB?objectClass?one",
            "mailto:John.Doe@example.com",
            "news:comp.infosystems.www.servers.unix",
            "tel:+1-816-555-1212",
            "telnet://192.0.2.16:80/",
            "urn:oasis:names:specification:docbook:dtd:xml:4.1.2",
            "foo://localhost:8080/",
        ] {
            assert!(check_uri(input).is_ok(), "{input}");
        }
    }

    #[test]
    fn uri_scheme_chars() {
        assert_eq!(kind(check_uri("1http://example.com")), Some(ErrorKind::InvalidSchemeChar));
        assert_eq!(kind(check_uri("ht_tp://example.com")), Some(ErrorKind::InvalidSchemeChar));
        assert!(check_uri("svn+ssh://example.com/").is_ok());
    }

    #[test]
    fn uri_host_must_be_ip_or_domain() {
        assert_eq!(kind(check_uri("http://com/")), Some(ErrorKind::InvalidHost));
        assert_eq!(kind(check_uri("http://www.www.com/")), Some(ErrorKind::InvalidHost));
        assert!(check_uri("http://127.0.0.1/").is_ok());
        assert!(check_uri("http://[::1]:8080/").is_ok());
        assert!(check_uri("http://中文.com/").is_ok());
    }

    #[test]
    fn brackets_only_hold_ipv6_literals() {
        assert_eq!(kind(check_uri("http://[example.com]/")), Some(ErrorKind::InvalidHost));
        assert_eq!(kind(check_uri_syntax("http://[127.0.0.1]/")), Some(ErrorKind::InvalidHost));
        assert!(check_uri("http://[fe80::1%25en1]/").is_ok());
    }

    #[test]
    fn uri_port_range() {
        assert!(check_uri("http://example.com:0/").is_ok());
        assert!(check_uri("http://example.com:65535/").is_ok());
        assert_eq!(kind(check_uri("http://example.com:65536/")), Some(ErrorKind::InvalidPort));
        assert_eq!(kind(check_uri("http://example.com:-1/")), Some(ErrorKind::InvalidPort));
    }

    #[test]
    fn uri_component_chars() {
        assert_eq!(kind(check_uri("http://us er@example.com/")), Some(ErrorKind::InvalidUserinfoChar));
        assert_eq!(kind(check_uri("http://example.com/a b")), Some(ErrorKind::InvalidPathChar));
        assert_eq!(kind(check_uri("http://example.com/?a<b")), Some(ErrorKind::InvalidQueryChar));
        assert_eq!(kind(check_uri("http://example.com/#a\"b")), Some(ErrorKind::InvalidFragmentChar));
        assert_eq!(kind(check_uri("http://example.com/%zz")), Some(ErrorKind::InvalidPercentEncoding));
    }

    #[test]
    fn http_scheme_flags() {
        let http = "http://example.com/";
        let https = "https://example.com/";

        assert!(check_http_url(http, Options::new()).is_ok());
        assert_eq!(kind(check_http_url(https, Options::new())), Some(ErrorKind::InvalidScheme));

        assert!(check_https_url(https).is_ok());
        assert_eq!(kind(check_https_url(http)), Some(ErrorKind::InvalidScheme));

        assert!(check_web_url(http).is_ok());
        assert!(check_web_url(https).is_ok());
        assert_eq!(kind(check_web_url("ftp://example.com/")), Some(ErrorKind::InvalidScheme));

        assert!(check_sitemap_url(http).is_ok());
        assert!(check_sitemap_url(https).is_ok());
        assert!(check_http_sitemap_url(http).is_ok());
        assert_eq!(kind(check_http_sitemap_url(https)), Some(ErrorKind::InvalidScheme));
        assert!(check_https_sitemap_url(https).is_ok());
        assert_eq!(kind(check_https_sitemap_url(http)), Some(ErrorKind::InvalidScheme));
    }

    #[test]
    fn http_requires_authority() {
        assert_eq!(kind(check_web_url("http:/path")), Some(ErrorKind::MissingAuthority));
        assert_eq!(kind(check_web_url("http:example.com")), Some(ErrorKind::MissingAuthority));
    }

    #[test]
    fn http_length_limit() {
        let base = "http://example.com/";
        let at_limit = format!("{base}{}", "a".repeat(MAX_URL_LENGTH - base.len()));
        assert!(check_web_url(&at_limit).is_ok());

        let over = format!("{at_limit}a");
        assert_eq!(kind(check_web_url(&over)), Some(ErrorKind::MaxLengthUrl));
        assert!(check_uri(&over).is_ok());
    }

    #[test]
    fn sitemap_profile_rejects_unescaped_characters() {
        assert_eq!(kind(check_sitemap_url("http://example.com/Page")), Some(ErrorKind::InvalidPathChar));
        assert_eq!(kind(check_sitemap_url("http://example.com/it's")), Some(ErrorKind::InvalidPathChar));
        assert_eq!(kind(check_sitemap_url("http://example.com/?a*b")), Some(ErrorKind::InvalidQueryChar));
        assert!(check_web_url("http://example.com/Page").is_ok());
    }

    #[test]
    fn validated_uri_traits() {
        let uri = ValidatedUri::try_from("HTTP://EXAMPLE.com/x").unwrap();
        assert_eq!(uri.as_ref(), "http://example.com/x");
        assert_eq!(uri.scheme(), Some("http"));
        assert_eq!(uri.as_parsed().path(), Some("/x"));

        let from_bytes = ValidatedUri::try_from(&b"http://example.com/x"[..]).unwrap();
        assert_eq!(from_bytes.into_parsed().canonical_form(), "http://example.com/x");
    }

    #[test]
    fn non_utf8_input_is_invalid_type() {
        let err = ValidatedUri::from_bytes(&[b'h', 0xff, 0xfe]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidType);
    }

    #[test]
    fn error_carries_input() {
        let err = check_uri("http://example.com:99999/").unwrap_err();
        assert_eq!(err.input, "http://example.com:99999/");
        assert!(err.message.contains("99999"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_record_with_valid_flag() {
        let uri = check_uri("http://user@example.com:8080/a?b#c").unwrap();
        let json = serde_json::to_value(&uri).unwrap();
        assert_eq!(json["valid"], true);
        assert_eq!(json["host"], "example.com");
        assert_eq!(json["port"], 8080);
        assert_eq!(json["canonicalForm"], "http://user@example.com:8080/a?b#c");
    }
}
