//! Character classes for each URI component (RFC 3986 §3.1-3.5, RFC 1034).
//!
//! | Component      | Standard                                      | Sitemap excludes   |
//! |----------------|-----------------------------------------------|--------------------|
//! | scheme         | first `a-z`; rest `a-z 0-9 + - .`             | n/a                |
//! | userinfo       | `a-z A-Z 0-9 ! $ & ' ( ) * + , - . : ; = _ ~ %` | `A-Z ' *`          |
//! | domain label   | `a-z 0-9 -` (`-` not first or last)           | n/a                |
//! | path           | `a-z A-Z 0-9 ! $ % & ' ( ) * + , - . / : ; = @ _ ~` | `A-Z ' *`    |
//! | query/fragment | path set and `?`                              | `A-Z ' *`          |
//!
//! `%` is never allowed unescaped when encoding: any literal `%` forces
//! percent-encoding.

use crate::component::Component;
use crate::options::Mode;

/// A set of allowed ASCII characters, stored as a 128-bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharSet(u64, u64);

impl CharSet {
    /// Creates a set holding exactly the given ASCII bytes.
    ///
    /// # Panics
    ///
    /// Panics (at compile time for `const` tables) on a non-ASCII byte.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new(mut bytes: &[u8]) -> Self {
        let mut mask = 0u128;
        while let [cur, rem @ ..] = bytes {
            assert!(cur.is_ascii(), "character sets only hold ASCII");
            mask |= 1u128 << *cur;
            bytes = rem;
        }
        Self(mask as u64, (mask >> 64) as u64)
    }

    /// Returns the union of two sets.
    #[must_use]
    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0, self.1 | other.1)
    }

    /// Returns the characters of `self` that are not in `other`.
    #[must_use]
    pub const fn sub(self, other: Self) -> Self {
        Self(self.0 & !other.0, self.1 & !other.1)
    }

    /// Returns true if every character of `self` is also in `other`.
    #[must_use]
    pub const fn is_subset(self, other: Self) -> bool {
        self.0 & other.0 == self.0 && self.1 & other.1 == self.1
    }

    /// Returns true if `c` is in the set.
    #[must_use]
    pub const fn contains(self, c: char) -> bool {
        let x = c as u32;
        if x < 64 {
            self.0 & (1 << x) != 0
        } else if x < 128 {
            self.1 & (1 << (x - 64)) != 0
        } else {
            false
        }
    }

    /// Returns true if `c` may appear unescaped in encoder output.
    #[must_use]
    pub const fn allows_encoded(self, c: char) -> bool {
        c != '%' && self.contains(c)
    }
}

const fn new(bytes: &[u8]) -> CharSet {
    CharSet::new(bytes)
}

/// `a-z`
pub const LOWER: CharSet = new(b"abcdefghijklmnopqrstuvwxyz");
/// `A-Z`
pub const UPPER: CharSet = new(b"ABCDEFGHIJKLMNOPQRSTUVWXYZ");
/// `0-9`
pub const DIGIT: CharSet = new(b"0123456789");
/// `0-9 A-F`
pub const HEXDIG: CharSet = DIGIT.or(new(b"ABCDEF"));

/// First character of a scheme.
pub const SCHEME_FIRST: CharSet = LOWER;
/// Remaining characters of a scheme.
pub const SCHEME: CharSet = LOWER.or(DIGIT).or(new(b"+-."));
/// Userinfo characters.
pub const USERINFO: CharSet = LOWER.or(UPPER).or(DIGIT).or(new(b"!$&'()*+,-.:;=_~%"));
/// Domain label characters.
pub const DOMAIN: CharSet = LOWER.or(DIGIT).or(new(b"-"));
/// Path characters.
pub const PATH: CharSet = LOWER.or(UPPER).or(DIGIT).or(new(b"!$%&'()*+,-./:;=@_~"));
/// Query and fragment characters.
pub const QUERY_FRAGMENT: CharSet = PATH.or(new(b"?"));

/// Characters the sitemap dialect requires to be escaped.
pub const SITEMAP_EXCLUDED: CharSet = UPPER.or(new(b"'*"));

/// Allowed characters per component, standard then sitemap.
///
/// Indexed by [`Component`] and [`Mode`] discriminants.
static TABLES: [[CharSet; 2]; 6] = [
    [SCHEME, SCHEME],
    [USERINFO, USERINFO.sub(SITEMAP_EXCLUDED)],
    [DOMAIN, DOMAIN],
    [PATH, PATH.sub(SITEMAP_EXCLUDED)],
    [QUERY_FRAGMENT, QUERY_FRAGMENT.sub(SITEMAP_EXCLUDED)],
    [QUERY_FRAGMENT, QUERY_FRAGMENT.sub(SITEMAP_EXCLUDED)],
];

/// Returns the allowed character set for a component in a mode.
#[must_use]
pub fn char_set(component: Component, mode: Mode) -> CharSet {
    TABLES[component as usize][mode as usize]
}

/// Returns true if `c` may appear in a scheme at the given position.
#[must_use]
pub const fn is_scheme_char(c: char, first: bool) -> bool {
    if first {
        SCHEME_FIRST.contains(c)
    } else {
        SCHEME.contains(c)
    }
}

/// Returns true if `c` may appear in a domain label at the given position.
#[must_use]
pub const fn is_domain_char(c: char, first: bool, last: bool) -> bool {
    if c == '-' && (first || last) {
        return false;
    }
    DOMAIN.contains(c)
}

/// Returns true if `c` may appear in a userinfo.
///
/// With `encoding` set, `%` is rejected so that it gets escaped.
#[must_use]
pub fn is_userinfo_char(c: char, mode: Mode, encoding: bool) -> bool {
    allows(Component::Userinfo, c, mode, encoding)
}

/// Returns true if `c` may appear in a path.
#[must_use]
pub fn is_path_char(c: char, mode: Mode, encoding: bool) -> bool {
    allows(Component::Path, c, mode, encoding)
}

/// Returns true if `c` may appear in a query or fragment.
#[must_use]
pub fn is_query_or_fragment_char(c: char, mode: Mode, encoding: bool) -> bool {
    allows(Component::Query, c, mode, encoding)
}

/// Returns true if `c` is a hex digit of a percent-encoded triplet.
#[must_use]
pub const fn is_percent_encoding_char(c: char) -> bool {
    HEXDIG.contains(c)
}

fn allows(component: Component, c: char, mode: Mode, encoding: bool) -> bool {
    let set = char_set(component, mode);
    if encoding {
        set.allows_encoded(c)
    } else {
        set.contains(c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sitemap_sets_are_strict_subsets() {
        for component in [Component::Userinfo, Component::Path, Component::Query] {
            let standard = char_set(component, Mode::Standard);
            let sitemap = char_set(component, Mode::Sitemap);
            assert!(sitemap.is_subset(standard));
            assert_ne!(sitemap, standard);
        }
    }

    #[test]
    fn sitemap_rejects_uppercase_apostrophe_asterisk() {
        for c in ['A', 'Z', '\'', '*'] {
            assert!(is_path_char(c, Mode::Standard, false));
            assert!(!is_path_char(c, Mode::Sitemap, false));
            assert!(!is_userinfo_char(c, Mode::Sitemap, false));
            assert!(!is_query_or_fragment_char(c, Mode::Sitemap, false));
        }
    }

    #[test]
    fn percent_is_never_allowed_when_encoding() {
        assert!(is_path_char('%', Mode::Standard, false));
        assert!(!is_path_char('%', Mode::Standard, true));
        assert!(is_userinfo_char('%', Mode::Sitemap, false));
        assert!(!is_userinfo_char('%', Mode::Sitemap, true));
    }

    #[test]
    fn query_adds_question_mark() {
        assert!(!is_path_char('?', Mode::Standard, false));
        assert!(is_query_or_fragment_char('?', Mode::Standard, false));
    }

    #[test]
    fn userinfo_excludes_slash_and_at() {
        assert!(!is_userinfo_char('/', Mode::Standard, false));
        assert!(!is_userinfo_char('@', Mode::Standard, false));
        assert!(is_path_char('@', Mode::Standard, false));
    }

    #[test]
    fn scheme_positions() {
        assert!(is_scheme_char('h', true));
        assert!(!is_scheme_char('1', true));
        assert!(is_scheme_char('1', false));
        assert!(is_scheme_char('+', false));
        assert!(!is_scheme_char('H', false));
    }

    #[test]
    fn domain_hyphen_positions() {
        assert!(!is_domain_char('-', true, false));
        assert!(!is_domain_char('-', false, true));
        assert!(is_domain_char('-', false, false));
        assert!(!is_domain_char('A', false, false));
    }

    #[test]
    fn non_ascii_is_never_allowed() {
        assert!(!is_path_char('é', Mode::Standard, false));
        assert!(!PATH.contains('\u{80}'));
    }

    #[test]
    fn hex_digits_are_uppercase() {
        assert!(is_percent_encoding_char('A'));
        assert!(is_percent_encoding_char('9'));
        assert!(!is_percent_encoding_char('a'));
        assert!(!is_percent_encoding_char('G'));
    }
}
