use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HOST_RE: Regex =
        Regex::new(r"(?i)^([a-z0-9_.\-]+|\[[0-9a-f:]+\])$").expect("valid host pattern");
    static ref IPV4_RE: Regex = Regex::new(
        r"^(25[0-5]|2[0-4][0-9]|1?[0-9]?[0-9])(\.(25[0-5]|2[0-4][0-9]|1?[0-9]?[0-9])){3}$"
    )
    .expect("valid ipv4 pattern");
}

const WILDCARD_HOSTS: [&str; 3] = ["*", "0.0.0.0", "::"];

const ADDRESS_ROLE_KEYS: [&str; 4] = ["reachable_on", "listen_ip", "listen_on", "remote"];

/// Parses a config number: trimmed, non-empty and finite.
///
/// Only decimal notation is accepted (`f64::from_str`), so hex literals such
/// as `0x10` are not numbers.
pub(crate) fn parse_number(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

pub(crate) fn is_integer(value: f64) -> bool {
    value.fract() == 0.0
}

/// Hostname, bracketed IPv6 literal, dotted IPv4 or a wildcard bind address.
pub(crate) fn is_likely_host(value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return false;
    }
    WILDCARD_HOSTS.contains(&value) || HOST_RE.is_match(value) || IPV4_RE.is_match(value)
}

pub(crate) fn is_valid_port(value: &str) -> bool {
    parse_number(value).is_some_and(|port| is_integer(port) && (1.0..=65535.0).contains(&port))
}

/// Identity hashes are written as non-empty, even-length hex.
pub(crate) fn is_hex_identity(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value.len() % 2 == 0 && value.chars().all(|c| c.is_ascii_hexdigit())
}

/// Keys (already lowercased) whose values name a host or address.
pub(crate) fn is_address_key(key: &str) -> bool {
    key.ends_with("_host") || key.ends_with("_ip") || ADDRESS_ROLE_KEYS.contains(&key)
}
