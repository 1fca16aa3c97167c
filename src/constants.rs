//! Constants for URI validation.

/// Maximum canonical URL length in characters for the web and sitemap profiles.
pub const MAX_URL_LENGTH: usize = 2048;

/// Lowest valid port number.
pub const MIN_PORT: i64 = 0;

/// Highest valid port number.
pub const MAX_PORT: i64 = 65535;

/// Maximum length of a punycode-normalized domain name.
pub const MAX_DOMAIN_LENGTH: usize = 255;

/// DNS label maximum length.
pub const MAX_DNS_LABEL_LENGTH: usize = 63;

/// Shortest host a recomposed URI may carry.
pub const MIN_HOST_LENGTH: usize = 3;

/// Schemes accepted by the web and sitemap profiles.
pub const HTTP_SCHEMES: [&str; 2] = ["http", "https"];

/// Prefix marking a punycoded (ACE) domain label.
pub const ACE_PREFIX: &str = "xn--";
