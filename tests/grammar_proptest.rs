//! Property-based tests validating the parser and validators against the
//! RFC 3986 grammar.
//!
//! These tests generate random valid inputs according to grammar constraints
//! and verify they are accepted, and generate arbitrary text to verify the
//! codecs round-trip and never panic.

use proptest::prelude::*;

use strict_uri::{
    Component, MAX_DNS_LABEL_LENGTH, MAX_DOMAIN_LENGTH, Mode, Options, check_component,
    check_uri, check_web_url, decode_uri_component_string, decode_uri_string, decode_web_url,
    encode_uri_component_string, encode_uri_string, encode_web_url, is_domain, is_domain_label,
    is_ipv4, is_ipv6, parse_uri, recompose,
};

/// Strategies for generating valid grammar-conformant inputs.
mod strategies {
    use super::*;

    /// Valid alphanumeric characters for DNS labels
    const ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

    /// Valid characters for DNS labels (alphanumeric + hyphen)
    const DNS_LABEL_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789-";

    /// Unreserved characters, safe in every path segment
    const SEGMENT_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-._~";

    /// Generate a valid DNS label (1-20 chars, alphanumeric + single hyphens)
    pub fn dns_label() -> impl Strategy<Value = String> {
        (1..=20usize).prop_flat_map(|len| {
            if len == 1 {
                prop::sample::select(ALPHANUMERIC.to_vec())
                    .prop_map(|c| (c as char).to_string())
                    .boxed()
            } else {
                let first = prop::sample::select(ALPHANUMERIC.to_vec());
                let middle_len = len.saturating_sub(2);
                let middle = prop::collection::vec(
                    prop::sample::select(DNS_LABEL_CHARS.to_vec()),
                    middle_len..=middle_len,
                );
                let last = prop::sample::select(ALPHANUMERIC.to_vec());

                (first, middle, last)
                    .prop_map(|(f, m, l)| {
                        let mut s = String::with_capacity(2 + m.len());
                        s.push(f as char);
                        for c in m {
                            s.push(c as char);
                        }
                        s.push(l as char);
                        s
                    })
                    .prop_filter("consecutive hyphens", |s| !s.contains("--"))
                    .boxed()
            }
        })
    }

    /// Generate a valid domain name (2-4 distinct labels)
    pub fn domain() -> impl Strategy<Value = String> {
        prop::collection::hash_set(dns_label(), 2..=4).prop_map(|labels| {
            labels.into_iter().collect::<Vec<_>>().join(".")
        })
    }

    /// Generate a valid IPv4 address
    pub fn ipv4() -> impl Strategy<Value = String> {
        (0u8..=255, 0u8..=255, 0u8..=255, 0u8..=255)
            .prop_map(|(a, b, c, d)| format!("{a}.{b}.{c}.{d}"))
    }

    /// Generate a valid IPv6 address in full form
    pub fn ipv6_full() -> impl Strategy<Value = String> {
        prop::collection::vec(0u16..=0xffff, 8).prop_map(|groups| {
            groups
                .iter()
                .map(|g| format!("{g:x}"))
                .collect::<Vec<_>>()
                .join(":")
        })
    }

    /// Generate a valid IPv6 address in the shortest form `std` prints,
    /// which covers `::` elision and embedded IPv4 tails
    pub fn ipv6_compressed() -> impl Strategy<Value = String> {
        any::<[u16; 8]>().prop_map(|segs| std::net::Ipv6Addr::from(segs).to_string())
    }

    /// Generate a host (domain, IPv4, or bracketed IPv6)
    pub fn host() -> impl Strategy<Value = String> {
        prop_oneof![
            domain(),
            ipv4(),
            ipv6_full().prop_map(|ip| format!("[{ip}]")),
        ]
    }

    /// Generate an absolute path of unreserved segments
    pub fn path() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop::collection::vec(prop::sample::select(SEGMENT_CHARS.to_vec()), 0..=12),
            0..=5,
        )
        .prop_map(|segments| {
            segments
                .into_iter()
                .map(|seg| format!("/{}", String::from_utf8_lossy(&seg)))
                .collect()
        })
    }

    /// Generate a web URL with lowercase scheme and host
    pub fn web_url() -> impl Strategy<Value = String> {
        (
            prop::sample::select(vec!["http", "https"]),
            host(),
            prop::option::of(0u16..=65535),
            path(),
        )
            .prop_map(|(scheme, host, port, path)| match port {
                Some(p) => format!("{scheme}://{host}:{p}{path}"),
                None => format!("{scheme}://{host}{path}"),
            })
    }

    /// Generate printable Unicode text without URI delimiters
    pub fn component_text() -> impl Strategy<Value = String> {
        "\\PC{0,40}".prop_map(|s| s.replace(['?', '#'], ""))
    }
}

mod domain_tests {
    use super::strategies::*;
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn valid_labels_accepted(label in dns_label()) {
            prop_assert!(is_domain_label(&label), "Rejected label: {}", label);
            prop_assert!(label.len() <= MAX_DNS_LABEL_LENGTH);
        }

        #[test]
        fn valid_domains_accepted(d in domain()) {
            prop_assert!(is_domain(&d), "Rejected domain: {}", d);
            prop_assert!(d.len() <= MAX_DOMAIN_LENGTH);
        }

        #[test]
        fn uppercase_domains_accepted(d in domain()) {
            prop_assert!(is_domain(&d.to_uppercase()), "Rejected domain: {}", d);
        }

        #[test]
        fn single_labels_rejected(label in dns_label()) {
            prop_assume!(label != "localhost");
            prop_assert!(!is_domain(&label));
        }

        #[test]
        fn repeated_labels_rejected(label in dns_label(), d in domain()) {
            let repeated = format!("{label}.{label}.{d}");
            prop_assert!(!is_domain(&repeated));
        }
    }
}

mod ip_tests {
    use super::strategies::*;
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn valid_ipv4_accepted(ip in ipv4()) {
            prop_assert!(is_ipv4(&ip), "Rejected IPv4: {}", ip);
            prop_assert!(!is_ipv6(&ip));
        }

        #[test]
        fn valid_ipv6_full_accepted(ip in ipv6_full()) {
            prop_assert!(is_ipv6(&ip), "Rejected IPv6: {}", ip);
            prop_assert!(!is_ipv4(&ip));
        }

        #[test]
        fn valid_ipv6_compressed_accepted(ip in ipv6_compressed()) {
            prop_assert!(is_ipv6(&ip), "Rejected IPv6: {}", ip);
        }

        #[test]
        fn ipv6_zone_accepted(ip in ipv6_compressed(), zone in "[a-z0-9]{1,8}") {
            let zoned = format!("{ip}%{zone}");
            prop_assert!(is_ipv6(&zoned), "Rejected IPv6: {}", zoned);
        }
    }
}

mod url_tests {
    use super::strategies::*;
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn valid_web_urls_accepted(url in web_url()) {
            let result = check_web_url(&url);
            prop_assert!(result.is_ok(), "Rejected URL: {} ({:?})", url, result.err());
        }

        #[test]
        fn canonical_form_is_identity_on_canonical_input(url in web_url()) {
            let parsed = parse_uri(&url);
            prop_assert_eq!(parsed.canonical_form(), url.as_str());
        }

        #[test]
        fn recompose_inverts_parse(url in web_url()) {
            let parsed = parse_uri(&url);
            prop_assert_eq!(recompose(&parsed.to_parts()), parsed.canonical_form());
        }

        #[test]
        fn web_url_roundtrips_unicode_path(d in domain(), text in component_text()) {
            let url = format!("http://{d}/{text}");
            let encoded = encode_web_url(&url).unwrap();
            prop_assert!(check_web_url(&encoded).is_ok(), "Encoded URL invalid: {}", encoded);
            prop_assert_eq!(decode_web_url(&encoded).unwrap(), url);
        }
    }
}

mod codec_tests {
    use super::strategies::*;
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn component_roundtrip(
            text in "\\PC{0,40}",
            component in prop::sample::select(vec![
                Component::Userinfo, Component::Path, Component::Query, Component::Fragment,
            ]),
            mode in prop::sample::select(vec![Mode::Standard, Mode::Sitemap]),
        ) {
            let encoded = encode_uri_component_string(&text, component, mode).unwrap();
            prop_assert!(check_component(Some(&encoded), component, mode).is_ok(), "Encoded {} invalid: {}", component, encoded);
            prop_assert_eq!(decode_uri_component_string(&encoded, component, mode).unwrap(), text);
        }

        #[test]
        fn encoded_output_is_ascii(text in component_text()) {
            let encoded = encode_uri_component_string(&text, Component::Path, Mode::Standard).unwrap();
            prop_assert!(encoded.is_ascii());
        }
    }
}

mod robustness_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(2000))]

        #[test]
        fn parse_never_panics(input in any::<String>()) {
            let parsed = parse_uri(&input);
            if parsed.scheme().is_some() {
                prop_assert!(parsed.path().is_some());
            }
        }

        #[test]
        fn validators_and_codecs_never_panic(input in "[a-z]{1,5}:(//)?\\PC{0,40}") {
            let _ = check_uri(&input);
            let _ = encode_uri_string(&input, Options::new());
            let _ = decode_uri_string(&input, Options::sitemap());
        }

        #[test]
        fn decoding_never_panics(input in any::<String>()) {
            let _ = decode_uri_component_string(&input, Component::Query, Mode::Sitemap);
            let _ = decode_uri_component_string(&input, Component::Path, Mode::Standard);
        }
    }
}
