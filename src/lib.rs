//! Strict RFC 3986 URI parser, validator and encoder/decoder.
//!
//! This crate decomposes URI strings, validates them against generic URI,
//! HTTP(S) URL and XML-sitemap URL profiles, and transcodes them between
//! their human-readable and transmissible forms.
//!
//! # Overview
//!
//! ```text
//! scheme ":" [ "//" [ userinfo "@" ] host [ ":" port ] ] path [ "?" query ] [ "#" fragment ]
//! ```
//!
//! Data flows one way: a raw string is parsed into a [`ParsedUri`] (never
//! fails), validated into a [`ValidatedUri`] (or a [`UriError`] naming the
//! first violation), and encoded or decoded into a string.
//!
//! # Quick Start
//!
//! ```rust
//! use strict_uri::{check_uri, check_sitemap_url, decode_uri_string, encode_uri_string, Options};
//!
//! // Validate a URI
//! let uri = check_uri("foo://user@exèmple.com:8042/over/there?name=ferret#nose").unwrap();
//! assert_eq!(uri.host(), Some("xn--exmple-4ua.com"));
//! assert_eq!(uri.host_unicode(), Some("exèmple.com"));
//!
//! // Sitemap URLs must escape '&'
//! assert!(check_sitemap_url("http://example.com/?a=1&b=2").is_err());
//! assert!(check_sitemap_url("http://example.com/?a=1&amp;b=2").is_ok());
//!
//! // Transcode
//! let encoded = encode_uri_string("http://exèmple.com/pâth", Options::new()).unwrap();
//! assert_eq!(encoded, "http://xn--exmple-4ua.com/p%C3%A2th");
//! assert_eq!(decode_uri_string(&encoded, Options::new()).unwrap(), "http://exèmple.com/pâth");
//! ```
//!
//! # Profiles
//!
//! | Profile | Schemes | Authority | Characters | Max Length |
//! |---------|---------|-----------|------------|------------|
//! | generic URI | any | optional | standard | none |
//! | HTTP URL | `http` | required | standard | 2048 chars |
//! | HTTPS URL | `https` | required | standard | 2048 chars |
//! | web URL | `http`, `https` | required | standard | 2048 chars |
//! | sitemap URL | `http`, `https` | required | sitemap | 2048 chars |
//!
//! # Length Constraints
//!
//! | Component | Limit |
//! |-----------|-------|
//! | HTTP(S) URL | 2048 chars |
//! | Domain (punycode) | 255 chars |
//! | Domain label | 63 chars |
//! | Host | at least 3 chars |
//! | Port | 0 to 65535 |
//!
//! # Decoding Policy
//!
//! [`decode_uri_string`] fails on scheme, host, port and authority
//! problems, but replaces a userinfo, path, query or fragment that cannot
//! be decoded with an empty string. A `debug` log record is emitted for
//! every dropped component.
//!
//! # Logging
//!
//! Rejections and dropped components are reported through the [`log`]
//! facade; install any logger to see them.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cast;
pub mod charset;
mod codec;
mod component;
mod constants;
mod domain;
mod error;
mod escape;
mod ip;
mod options;
mod parser;
pub mod prelude;
pub mod punycode;
mod validate;

pub use charset::{
    is_domain_char, is_path_char, is_percent_encoding_char, is_query_or_fragment_char,
    is_scheme_char, is_userinfo_char,
};
pub use codec::{
    decode_sitemap_url, decode_uri_component_string, decode_uri_string, decode_web_url,
    encode_sitemap_url, encode_uri_component_string, encode_uri_string, encode_web_url,
};
pub use component::{Component, check_component};
pub use constants::{
    ACE_PREFIX, HTTP_SCHEMES, MAX_DNS_LABEL_LENGTH, MAX_DOMAIN_LENGTH, MAX_PORT, MAX_URL_LENGTH,
    MIN_HOST_LENGTH, MIN_PORT,
};
pub use domain::{is_domain, is_domain_label};
pub use error::{ErrorKind, UriError};
pub use escape::{check_percent_encoding, check_sitemap_encoding};
pub use ip::{is_ip, is_ipv4, is_ipv6};
pub use options::{Mode, Options};
pub use parser::{ParsedUri, Port, UriParts, parse_uri, recompose};
pub use punycode::{to_ascii as punycode, to_unicode as punydecode};
pub use validate::{
    ValidatedUri, check_http_sitemap_url, check_http_url, check_https_sitemap_url,
    check_https_url, check_sitemap_url, check_uri, check_uri_syntax, check_uri_with_mode,
    check_web_url,
};
