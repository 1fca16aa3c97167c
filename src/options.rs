//! Profile options shared by the validators and codecs.

/// Character-set mode.
///
/// Sitemap sets are strict subsets of the standard sets: they reject
/// uppercase letters, `'` and `*`, which must be escaped instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    /// Plain RFC 3986 character sets
    #[default]
    Standard,
    /// XML-sitemap character sets
    Sitemap,
}

/// Options recognized by the validators and codecs.
///
/// Each function documents which flags it reads; the rest are ignored.
///
/// # Examples
///
/// ```
/// use strict_uri::{Mode, Options};
///
/// let opts = Options::web().with_lowercase(true);
/// assert!(opts.web && opts.lowercase);
/// assert_eq!(Options::sitemap().mode(), Mode::Sitemap);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Options {
    /// Use sitemap character sets and entity escapes
    pub sitemap: bool,
    /// Restrict to `http`/`https` URLs with an authority and a length limit
    pub web: bool,
    /// Restrict the HTTP profile to `https`
    pub https: bool,
    /// Lowercase the text handled by the URI-string codecs
    pub lowercase: bool,
}

impl Options {
    /// Generic URI profile with no flags set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sitemap: false,
            web: false,
            https: false,
            lowercase: false,
        }
    }

    /// Web profile: `http` or `https`.
    #[must_use]
    pub const fn web() -> Self {
        Self::new().with_web(true)
    }

    /// Sitemap profile: `http` or `https` with sitemap escaping.
    #[must_use]
    pub const fn sitemap() -> Self {
        Self::new().with_web(true).with_sitemap(true)
    }

    /// HTTPS-only profile.
    #[must_use]
    pub const fn https() -> Self {
        Self::new().with_https(true)
    }

    /// Sets the `sitemap` flag.
    #[must_use]
    pub const fn with_sitemap(mut self, sitemap: bool) -> Self {
        self.sitemap = sitemap;
        self
    }

    /// Sets the `web` flag.
    #[must_use]
    pub const fn with_web(mut self, web: bool) -> Self {
        self.web = web;
        self
    }

    /// Sets the `https` flag.
    #[must_use]
    pub const fn with_https(mut self, https: bool) -> Self {
        self.https = https;
        self
    }

    /// Sets the `lowercase` flag.
    #[must_use]
    pub const fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Returns the character-set mode selected by the `sitemap` flag.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        if self.sitemap {
            Mode::Sitemap
        } else {
            Mode::Standard
        }
    }

    /// Returns true if the profile is limited to `http`/`https` URLs.
    #[must_use]
    pub const fn is_http_profile(&self) -> bool {
        self.web || self.sitemap || self.https
    }
}
