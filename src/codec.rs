//! Percent and sitemap-entity transcoding of components and whole URIs.
//!
//! Encoding fails fast like the validators. Decoding does not: after the
//! structural checks pass, a userinfo, path, query or fragment that cannot
//! be decoded is replaced with an empty string and the call still
//! succeeds. Callers that cannot tolerate silent loss of a component should
//! run [`check_uri`](crate::check_uri) on the input first.

use crate::charset::char_set;
use crate::component::Component;
use crate::error::{ErrorKind, UriError};
use crate::escape::{
    SITEMAP_ENTITIES, SITEMAP_PERCENT_ESCAPES, check_percent_encoding, check_sitemap_encoding,
    sitemap_entity,
};
use crate::options::{Mode, Options};
use crate::parser::{ParsedUri, UriParts, parse_uri, recompose};
use crate::validate::{
    check_host_and_port, check_http_scheme, check_length, check_scheme_chars, check_syntax,
    rejected,
};

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Encodes one component.
///
/// In sitemap mode `&` and `'` become entity escapes. Characters allowed
/// unescaped in the component are copied; everything else, `%` included, is
/// percent-encoded as UTF-8 with uppercase hex digits.
///
/// # Errors
///
/// Returns `INVALID_CHECKING_COMPONENT` for schemes and domains.
///
/// # Examples
///
/// ```
/// use strict_uri::{encode_uri_component_string, Component, Mode};
///
/// assert_eq!(encode_uri_component_string("é", Component::Path, Mode::Standard).unwrap(), "%C3%A9");
/// assert_eq!(encode_uri_component_string("<>", Component::Query, Mode::Standard).unwrap(), "%3C%3E");
/// assert_eq!(encode_uri_component_string("a&b", Component::Query, Mode::Sitemap).unwrap(), "a&amp;b");
/// assert_eq!(encode_uri_component_string("A*", Component::Path, Mode::Sitemap).unwrap(), "%41%2A");
/// ```
pub fn encode_uri_component_string(s: &str, component: Component, mode: Mode) -> Result<String, UriError> {
    component.ensure_checkable(s)?;

    let set = char_set(component, mode);
    let mut out = String::with_capacity(s.len());
    let mut buf = [0u8; 4];
    for c in s.chars() {
        if mode == Mode::Sitemap {
            if let Some(entity) = sitemap_entity(c) {
                out.push_str(entity);
                continue;
            }
        }

        if set.allows_encoded(c) {
            out.push(c);
        } else {
            for b in c.encode_utf8(&mut buf).bytes() {
                out.push('%');
                out.push(char::from(HEX_DIGITS[usize::from(b >> 4)]));
                out.push(char::from(HEX_DIGITS[usize::from(b & 0x0F)]));
            }
        }
    }
    Ok(out)
}

/// Decodes one component.
///
/// Percent-encoded triplets become their bytes, and in sitemap mode entity
/// escapes become their characters. Other characters are copied.
///
/// # Errors
///
/// - `INVALID_CHECKING_COMPONENT` for schemes and domains
/// - `INVALID_PERCENT_ENCODING` on a malformed triplet or if the decoded
///   bytes are not UTF-8
/// - `INVALID_SITEMAP_ENCODING` on an unknown entity in sitemap mode
///
/// # Examples
///
/// ```
/// use strict_uri::{decode_uri_component_string, Component, Mode};
///
/// assert_eq!(decode_uri_component_string("%C3%A9", Component::Path, Mode::Standard).unwrap(), "é");
/// assert_eq!(decode_uri_component_string("a&amp;b", Component::Query, Mode::Sitemap).unwrap(), "a&b");
/// assert!(decode_uri_component_string("over%there", Component::Path, Mode::Standard).is_err());
/// ```
pub fn decode_uri_component_string(s: &str, component: Component, mode: Mode) -> Result<String, UriError> {
    component.ensure_checkable(s)?;

    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                check_percent_encoding(s, i)?;
                match sitemap_percent_escape(&s[i..], mode) {
                    Some(c) => push_char(&mut out, c),
                    None => out.push((hex_value(bytes[i + 1]) << 4) | hex_value(bytes[i + 2])),
                }
                i += 3;
            }
            b'&' if mode == Mode::Sitemap => {
                let len = check_sitemap_encoding(s, i)? + 1;
                let code = &s[i..i + len];
                if let Some((c, _)) = SITEMAP_ENTITIES.iter().find(|(_, e)| *e == code) {
                    push_char(&mut out, *c);
                }
                i += len;
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }

    String::from_utf8(out).map_err(|e| {
        UriError::new(
            ErrorKind::InvalidPercentEncoding,
            s,
            format!("decoded bytes are not UTF-8: {e}"),
        )
    })
}

/// Encodes a human-readable URI into its transmissible form.
///
/// Runs the structural checks of the profile selected by `opts`, encodes
/// userinfo, path, query and fragment, converts the host to punycode and
/// recomposes. `sitemap` selects sitemap escaping; `web`, `sitemap` and
/// `https` select the HTTP profile and its 2048-character limit;
/// `lowercase` lowercases the input first.
///
/// # Errors
///
/// - structural errors as in [`check_uri_syntax`](crate::check_uri_syntax)
/// - `INVALID_SCHEME_CHAR`, or `INVALID_SCHEME` and `MISSING_AUTHORITY` in the
///   HTTP profile
/// - `INVALID_HOST`, `INVALID_PORT`
/// - `MAX_LENGTH_URL` in the HTTP profile
///
/// # Examples
///
/// ```
/// use strict_uri::{encode_uri_string, Options};
///
/// let encoded = encode_uri_string("foo://usèr@exèmple.com/pâth?q=<1>", Options::new()).unwrap();
/// assert_eq!(encoded, "foo://us%C3%A8r@xn--exmple-4ua.com/p%C3%A2th?q=%3C1%3E");
/// ```
pub fn encode_uri_string(input: &str, opts: Options) -> Result<String, UriError> {
    encode(input, opts).map_err(rejected)
}

/// Decodes a transmissible URI into its human-readable form.
///
/// Mirrors [`encode_uri_string`], using the Unicode host. Structural,
/// scheme, host and port problems fail the call. A userinfo, path, query or
/// fragment that cannot be decoded is dropped instead; an empty path after
/// an authority becomes `/`. Decoded components that no longer form a URI,
/// such as a path decoding to `//x` without an authority, give an empty
/// string. `lowercase` lowercases the output.
///
/// # Errors
///
/// As [`encode_uri_string`], except that no component character errors
/// are reported.
///
/// # Examples
///
/// ```
/// use strict_uri::{decode_uri_string, ErrorKind, Options};
///
/// let decoded = decode_uri_string("http://user%pass@example.com:8080/over%there", Options::new());
/// assert_eq!(decoded.unwrap(), "http://example.com:8080/");
///
/// let err = decode_uri_string("http://exa mple.com", Options::new()).unwrap_err();
/// assert_eq!(err.kind, ErrorKind::InvalidHost);
/// ```
pub fn decode_uri_string(input: &str, opts: Options) -> Result<String, UriError> {
    decode(input, opts).map_err(rejected)
}

/// Encodes an `http` or `https` URL.
///
/// # Errors
///
/// See [`encode_uri_string`].
pub fn encode_web_url(input: &str) -> Result<String, UriError> {
    encode_uri_string(input, Options::web())
}

/// Encodes an `http` or `https` URL with sitemap escaping.
///
/// # Errors
///
/// See [`encode_uri_string`].
///
/// # Examples
///
/// ```
/// use strict_uri::encode_sitemap_url;
///
/// assert_eq!(
///     encode_sitemap_url("http://example.com/there?a=5&b=11").unwrap(),
///     "http://example.com/there?a=5&amp;b=11"
/// );
/// ```
pub fn encode_sitemap_url(input: &str) -> Result<String, UriError> {
    encode_uri_string(input, Options::sitemap())
}

/// Decodes an `http` or `https` URL.
///
/// # Errors
///
/// See [`decode_uri_string`].
pub fn decode_web_url(input: &str) -> Result<String, UriError> {
    decode_uri_string(input, Options::web())
}

/// Decodes an `http` or `https` URL with sitemap escaping.
///
/// # Errors
///
/// See [`decode_uri_string`].
///
/// # Examples
///
/// ```
/// use strict_uri::decode_sitemap_url;
///
/// assert_eq!(
///     decode_sitemap_url("http://example.com/there?a=5&amp;b=11").unwrap(),
///     "http://example.com/there?a=5&b=11"
/// );
/// ```
pub fn decode_sitemap_url(input: &str) -> Result<String, UriError> {
    decode_uri_string(input, Options::sitemap())
}

fn encode(input: &str, opts: Options) -> Result<String, UriError> {
    let source = if opts.lowercase {
        input.to_lowercase()
    } else {
        input.to_string()
    };
    let uri = parse_uri(&source);
    check_structure(&source, &uri, opts)?;

    let mode = opts.mode();
    let encode_part = |value: Option<&str>, component| {
        value
            .map(|v| encode_uri_component_string(v, component, mode))
            .transpose()
    };
    let userinfo = encode_part(uri.userinfo(), Component::Userinfo)?;
    let path = encode_part(uri.path(), Component::Path)?;
    let query = encode_part(uri.query(), Component::Query)?;
    let fragment = encode_part(uri.fragment(), Component::Fragment)?;

    let parts = Transcoded { userinfo, path, query, fragment };
    let out = finish(&source, &uri, uri.host(), &parts, opts)?;
    if out.is_empty() {
        return Err(UriError::new(
            ErrorKind::InvalidPath,
            &source,
            "components do not recompose into a URI",
        ));
    }
    Ok(out)
}

fn decode(input: &str, opts: Options) -> Result<String, UriError> {
    let uri = parse_uri(input);
    check_structure(input, &uri, opts)?;

    let mode = opts.mode();
    let decode_part = |value: Option<&str>, component| {
        value.map(|v| {
            decode_uri_component_string(v, component, mode).unwrap_or_else(|e| {
                log::debug!("dropping undecodable {component} of {input:?}: {}", e.message);
                String::new()
            })
        })
    };
    let parts = Transcoded {
        userinfo: decode_part(uri.userinfo(), Component::Userinfo),
        path: decode_part(uri.path(), Component::Path),
        query: decode_part(uri.query(), Component::Query),
        fragment: decode_part(uri.fragment(), Component::Fragment),
    };

    let out = finish(input, &uri, uri.host_unicode(), &parts, opts)?;
    if out.is_empty() {
        log::debug!("decoded components of {input:?} do not recompose into a URI");
    }
    Ok(if opts.lowercase { out.to_lowercase() } else { out })
}

/// Transcoded components awaiting recomposition.
struct Transcoded {
    userinfo: Option<String>,
    path: Option<String>,
    query: Option<String>,
    fragment: Option<String>,
}

fn finish(
    input: &str,
    uri: &ParsedUri,
    host: Option<&str>,
    parts: &Transcoded,
    opts: Options,
) -> Result<String, UriError> {
    let path = match parts.path.as_deref() {
        Some("") if host.is_some() => Some("/"),
        path => path,
    };

    let out = recompose(&UriParts {
        scheme: uri.scheme(),
        userinfo: parts.userinfo.as_deref(),
        host,
        port: uri.port(),
        path,
        query: parts.query.as_deref(),
        fragment: parts.fragment.as_deref(),
    });

    if opts.is_http_profile() {
        check_length(input, &out)?;
    }
    Ok(out)
}

fn check_structure(input: &str, uri: &ParsedUri, opts: Options) -> Result<(), UriError> {
    check_syntax(input, uri)?;
    let scheme = uri.scheme().unwrap_or_default();

    if opts.is_http_profile() {
        check_http_scheme(input, scheme, opts)?;
        if uri.authority().is_none() {
            return Err(UriError::new(ErrorKind::MissingAuthority, input, "URL has no authority"));
        }
    } else {
        check_scheme_chars(input, scheme)?;
    }

    check_host_and_port(input, uri)
}

fn sitemap_percent_escape(rest: &str, mode: Mode) -> Option<char> {
    if mode != Mode::Sitemap {
        return None;
    }
    SITEMAP_PERCENT_ESCAPES
        .iter()
        .find(|(_, code)| rest.starts_with(code))
        .map(|(c, _)| *c)
}

const fn hex_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'A'..=b'F' => b - b'A' + 10,
        _ => 0,
    }
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}
