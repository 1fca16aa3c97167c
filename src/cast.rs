//! Integer casting for port numbers.

use std::ops::RangeInclusive;

/// Casts `value` to an integer, optionally bounded by an inclusive range.
///
/// Only ASCII digits with an optional leading `-` are accepted; anything
/// else, or a value outside `bounds`, yields `None`.
///
/// # Examples
///
/// ```
/// use strict_uri::cast::to_int;
///
/// assert_eq!(to_int("8080", Some(0..=65535)), Some(8080));
/// assert_eq!(to_int("70000", Some(0..=65535)), None);
/// assert_eq!(to_int("-3", None), Some(-3));
/// assert_eq!(to_int("8o", None), None);
/// ```
#[must_use]
pub fn to_int(value: &str, bounds: Option<RangeInclusive<i64>>) -> Option<i64> {
    let digits = value.strip_prefix('-').unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let n: i64 = value.parse().ok()?;
    match bounds {
        Some(range) if !range.contains(&n) => None,
        _ => Some(n),
    }
}
