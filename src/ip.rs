//! IP literal grammar (RFC 3986 §3.2.2, RFC 6874 zone identifiers).
//!
//! Pure grammar matching; nothing here touches the network.

use std::net::{Ipv4Addr, Ipv6Addr};

use crate::escape::check_percent_encoding;

/// Returns true if `s` is an IPv4 address in dotted-decimal form.
///
/// Octets follow the `dec-octet` rule, so leading zeros are rejected.
///
/// # Examples
///
/// ```
/// use strict_uri::is_ipv4;
///
/// assert!(is_ipv4("192.168.0.1"));
/// assert!(!is_ipv4("192.168.0.256"));
/// assert!(!is_ipv4("192.168.0.01"));
/// ```
#[must_use]
pub fn is_ipv4(s: &str) -> bool {
    parse_v4(s).is_some()
}

/// Returns true if `s` is an IPv6 address, optionally followed by a
/// `%zone-id`.
///
/// # Examples
///
/// ```
/// use strict_uri::is_ipv6;
///
/// assert!(is_ipv6("::1"));
/// assert!(is_ipv6("2001:db8::192.0.2.33"));
/// assert!(is_ipv6("fe80::1%eth0"));
/// assert!(!is_ipv6("1::2::3"));
/// ```
#[must_use]
pub fn is_ipv6(s: &str) -> bool {
    let (addr, zone) = match s.split_once('%') {
        Some((addr, zone)) => (addr, Some(zone)),
        None => (s, None),
    };

    if let Some(zone) = zone {
        if !is_zone_id(zone) {
            return false;
        }
    }

    parse_v6(addr).is_some()
}

/// Returns true if `s` is an IPv4 or IPv6 address.
#[must_use]
pub fn is_ip(s: &str) -> bool {
    is_ipv4(s) || is_ipv6(s)
}

// dec-octet = DIGIT / %x31-39 DIGIT / "1" 2DIGIT / "2" %x30-34 DIGIT / "25" %x30-35
fn parse_dec_octet(s: &str) -> Option<u8> {
    let bytes = s.as_bytes();
    match bytes {
        [] => None,
        [b'0'] => Some(0),
        [b'0', ..] => None,
        _ if bytes.len() > 3 || !bytes.iter().all(u8::is_ascii_digit) => None,
        _ => s.parse().ok(),
    }
}

pub(crate) fn parse_v4(s: &str) -> Option<Ipv4Addr> {
    let mut octets = [0u8; 4];
    let mut parts = s.split('.');
    for octet in &mut octets {
        *octet = parse_dec_octet(parts.next()?)?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(Ipv4Addr::from(octets))
}

// h16 = 1*4HEXDIG
fn parse_h16(s: &str) -> Option<u16> {
    if s.is_empty() || s.len() > 4 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(s, 16).ok()
}

/// Parses a run of colon-separated groups, with an optional dotted IPv4
/// tail standing for the last two groups.
fn parse_groups(s: &str, groups: &mut Vec<u16>) -> Option<()> {
    if s.is_empty() {
        return Some(());
    }

    let mut pieces = s.split(':').peekable();
    while let Some(piece) = pieces.next() {
        if pieces.peek().is_none() && piece.contains('.') {
            let [a, b, c, d] = parse_v4(piece)?.octets();
            groups.push(u16::from_be_bytes([a, b]));
            groups.push(u16::from_be_bytes([c, d]));
        } else {
            groups.push(parse_h16(piece)?);
        }
    }
    Some(())
}

pub(crate) fn parse_v6(s: &str) -> Option<Ipv6Addr> {
    let mut segs = [0u16; 8];

    match s.split_once("::") {
        None => {
            let mut groups = Vec::with_capacity(8);
            parse_groups(s, &mut groups)?;
            if groups.len() != 8 {
                return None;
            }
            segs.copy_from_slice(&groups);
        }
        Some((head, tail)) => {
            if tail.contains("::") {
                return None;
            }

            let mut leading = Vec::with_capacity(7);
            if head.contains('.') {
                return None;
            }
            parse_groups(head, &mut leading)?;

            let mut trailing = Vec::with_capacity(7);
            parse_groups(tail, &mut trailing)?;

            // "::" stands for at least one group
            if leading.len() + trailing.len() > 7 {
                return None;
            }
            segs[..leading.len()].copy_from_slice(&leading);
            segs[8 - trailing.len()..].copy_from_slice(&trailing);
        }
    }

    Some(Ipv6Addr::from(segs))
}

// ZoneID = 1*( unreserved / pct-encoded )
fn is_zone_id(zone: &str) -> bool {
    if zone.is_empty() {
        return false;
    }

    let bytes = zone.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if b == b'%' {
            match check_percent_encoding(zone, i) {
                Ok(skip) => i += 1 + skip,
                Err(_) => return false,
            }
        } else if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~') {
            i += 1;
        } else {
            return false;
        }
    }
    true
}
