//! Domain name validation (RFC 1034 labels, IDNA-aware).

use std::collections::HashMap;

use crate::charset::is_domain_char;
use crate::constants::{ACE_PREFIX, MAX_DNS_LABEL_LENGTH, MAX_DOMAIN_LENGTH};
use crate::punycode;

/// Returns true if `label` is a valid RFC 1034 label.
///
/// A label is 1-63 characters of `a-z`, `0-9` and `-`, neither starting nor
/// ending with `-` and never holding two consecutive `-`.
///
/// # Examples
///
/// ```
/// use strict_uri::is_domain_label;
///
/// assert!(is_domain_label("example"));
/// assert!(is_domain_label(&"a".repeat(63)));
/// assert!(!is_domain_label(&"a".repeat(64)));
/// assert!(!is_domain_label("a--b"));
/// ```
#[must_use]
pub fn is_domain_label(label: &str) -> bool {
    if label.is_empty() || label.len() > MAX_DNS_LABEL_LENGTH || label.contains("--") {
        return false;
    }

    let last = label.len() - 1;
    label
        .chars()
        .enumerate()
        .all(|(i, c)| is_domain_char(c, i == 0, i == last))
}

/// Returns true if `domain` is a valid fully qualified domain name.
///
/// The domain is first converted to punycode, so Unicode and `xn--` forms
/// are both accepted. `localhost` is always valid. Otherwise the domain
/// needs at least two labels, every label (after its `xn--` prefix) must
/// pass [`is_domain_label`], and no label may repeat. A trailing empty
/// root label is allowed.
///
/// # Examples
///
/// ```
/// use strict_uri::is_domain;
///
/// assert!(is_domain("example.com"));
/// assert!(is_domain("中文.com"));
/// assert!(is_domain("xn--fiq228c.com"));
/// assert!(!is_domain("com"));
/// assert!(!is_domain("a..com"));
/// ```
#[must_use]
pub fn is_domain(domain: &str) -> bool {
    let ascii = punycode::to_ascii(domain);
    if ascii == "localhost" {
        return true;
    }
    if ascii.is_empty() || ascii.len() > MAX_DOMAIN_LENGTH {
        return false;
    }

    let labels: Vec<&str> = ascii.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let last = labels.len() - 1;
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(labels.len());
    for (i, label) in labels.iter().copied().enumerate() {
        if i == last && label.is_empty() {
            continue;
        }

        let bare = label.strip_prefix(ACE_PREFIX).unwrap_or(label);
        if !is_domain_label(bare) {
            log::trace!("domain {domain:?}: invalid label {label:?}");
            return false;
        }

        let count = seen.entry(label).or_insert(0);
        *count += 1;
        if *count > 1 {
            log::trace!("domain {domain:?}: repeated label {label:?}");
            return false;
        }
    }

    true
}
