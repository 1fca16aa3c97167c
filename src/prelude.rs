//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use strict_uri::prelude::*;
//!
//! let uri = check_web_url("https://example.com/a?b=1").unwrap();
//! assert_eq!(uri.scheme(), Some("https"));
//! ```
//!
//! The character predicates, escape scanners and length constants are left
//! out; import them from the crate root.

pub use crate::{
    // Core types
    Component, Mode, Options, ParsedUri, Port, UriParts, ValidatedUri,
    // Errors
    ErrorKind, UriError,
    // Parsing and validation
    check_component, check_http_url, check_sitemap_url, check_uri, check_uri_syntax,
    check_web_url, is_domain, is_ip, parse_uri, recompose,
    // Codecs
    decode_uri_component_string, decode_uri_string, encode_uri_component_string,
    encode_uri_string,
};
