//! Stateless format checkers
//!
//! Each checker is a plain `fn(&str) -> bool`, which is also the signature accepted by
//! [`StringAction::format`](crate::actions::StringAction::format) for plugging in
//! checkers that live outside this crate.

use base64::Engine;
use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::net::{Ipv4Addr, Ipv6Addr};
use uuid::Uuid;

// ASCII-only, TLD required, no leading/trailing dots in either part
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9]([a-zA-Z0-9._%+-]*[a-zA-Z0-9])?@[a-zA-Z0-9]([a-zA-Z0-9.-]*[a-zA-Z0-9])?\.[a-zA-Z]{2,}$",
    )
    .expect("email pattern is valid")
});

static HEX_COLOR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .expect("hex color pattern is valid")
});

static HEXADECIMAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(0[xX])?[0-9a-fA-F]+$").expect("hexadecimal pattern is valid")
});

static DECIMAL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[-+]?([0-9]+(\.[0-9]*)?|\.[0-9]+)$").expect("decimal pattern is valid")
});

static PATH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._\-/\\:]+$").expect("path pattern is valid")
});

static RGB_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(rgba?)\(\s*(\d{1,3}%?)\s*,\s*(\d{1,3}%?)\s*,\s*(\d{1,3}%?)\s*(?:,\s*([0-9]*\.?[0-9]+%?)\s*)?\)$",
    )
    .expect("rgb pattern is valid")
});

static HSL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^hsl\(\s*(\d{1,3})\s*,\s*(\d{1,3})%\s*,\s*(\d{1,3})%\s*\)$")
        .expect("hsl pattern is valid")
});

// Crockford base32; a leading digit above 7 would overflow 128 bits
static ULID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-7][0-9A-HJKMNP-TV-Z]{25}$").expect("ulid pattern is valid")
});

pub fn is_email(value: &str) -> bool {
    if value.matches('@').count() != 1 {
        return false;
    }
    if value.contains("..") {
        return false;
    }
    EMAIL_REGEX.is_match(value)
}

/// Absolute URL with a scheme and a host
pub fn is_url(value: &str) -> bool {
    match url::Url::parse(value) {
        Ok(url) => url.has_host(),
        Err(_) => false,
    }
}

pub fn is_uuid(value: &str) -> bool {
    Uuid::parse_str(value).is_ok()
}

fn is_uuid_version(value: &str, version: usize) -> bool {
    match Uuid::parse_str(value) {
        Ok(uuid) => uuid.get_version_num() == version,
        Err(_) => false,
    }
}

pub fn is_uuid_v1(value: &str) -> bool {
    is_uuid_version(value, 1)
}

pub fn is_uuid_v3(value: &str) -> bool {
    is_uuid_version(value, 3)
}

pub fn is_uuid_v4(value: &str) -> bool {
    is_uuid_version(value, 4)
}

pub fn is_uuid_v5(value: &str) -> bool {
    is_uuid_version(value, 5)
}

pub fn is_ipv4(value: &str) -> bool {
    value.parse::<Ipv4Addr>().is_ok()
}

pub fn is_ipv6(value: &str) -> bool {
    value.parse::<Ipv6Addr>().is_ok()
}

pub fn is_json(value: &str) -> bool {
    serde_json::from_str::<serde::de::IgnoredAny>(value).is_ok()
}

/// Standard alphabet with padding
pub fn is_base64(value: &str) -> bool {
    !value.is_empty() && base64::engine::general_purpose::STANDARD.decode(value).is_ok()
}

/// Hex digits with an optional `0x` prefix
pub fn is_hexadecimal(value: &str) -> bool {
    HEXADECIMAL_REGEX.is_match(value)
}

/// `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`
pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR_REGEX.is_match(value)
}

pub fn is_alpha(value: &str) -> bool {
    !value.is_empty() && value.chars().all(char::is_alphabetic)
}

pub fn is_alphanumeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(char::is_alphanumeric)
}

pub fn is_ascii(value: &str) -> bool {
    value.is_ascii()
}

pub fn is_decimal(value: &str) -> bool {
    DECIMAL_REGEX.is_match(value)
}

/// Port number in `0..=65535`
pub fn is_port(value: &str) -> bool {
    !value.starts_with('+') && value.parse::<u16>().is_ok()
}

pub fn is_rfc3339(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
}

/// Relative or absolute path made of alphanumerics, `.`, `_`, `-`, `:` and either separator
pub fn is_path(value: &str) -> bool {
    PATH_REGEX.is_match(value)
}

/// `rgb(r, g, b)` or `rgba(r, g, b, a)`.
///
/// Channels are all integers in `0..=255` or all percentages in `0..=100`. The alpha
/// channel is a number in `0..=1` or a percentage.
pub fn is_rgb(value: &str) -> bool {
    let Some(caps) = RGB_REGEX.captures(value) else {
        return false;
    };

    let has_alpha = caps.get(5).is_some();
    if (&caps[1] == "rgba") != has_alpha {
        return false;
    }

    let channels = [&caps[2], &caps[3], &caps[4]];
    let percent = channels[0].ends_with('%');
    let channels_valid = channels.iter().all(|channel| {
        match (channel.strip_suffix('%'), percent) {
            (Some(number), true) => number.parse::<u16>().map_or(false, |n| n <= 100),
            (None, false) => channel.parse::<u16>().map_or(false, |n| n <= 255),
            _ => false,
        }
    });

    let alpha_valid = match caps.get(5).map(|alpha| alpha.as_str()) {
        None => true,
        Some(alpha) => match alpha.strip_suffix('%') {
            Some(number) => number.parse::<f64>().map_or(false, |n| (0.0..=100.0).contains(&n)),
            None => alpha.parse::<f64>().map_or(false, |n| (0.0..=1.0).contains(&n)),
        },
    };

    channels_valid && alpha_valid
}

/// `hsl(h, s%, l%)` with hue in `0..=360`
pub fn is_hsl(value: &str) -> bool {
    let Some(caps) = HSL_REGEX.captures(value) else {
        return false;
    };

    let within = |index: usize, max: u16| caps[index].parse::<u16>().map_or(false, |n| n <= max);
    within(1, 360) && within(2, 100) && within(3, 100)
}

pub fn is_ulid(value: &str) -> bool {
    ULID_REGEX.is_match(value)
}

/// Card number passing the Luhn checksum. Spaces and hyphens are ignored.
pub fn is_credit_card(value: &str) -> bool {
    let digits: Vec<u32> = value
        .chars()
        .filter(|c| *c != ' ' && *c != '-')
        .map(|c| c.to_digit(10))
        .collect::<Option<_>>()
        .unwrap_or_default();

    if !(13..=19).contains(&digits.len()) {
        return false;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == 1 {
                let doubled = digit * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                digit
            }
        })
        .sum();

    sum % 10 == 0
}

/// Calendar date in `YYYY-MM-DD` form
pub fn is_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(is_email("user@example.com"));
        assert!(is_email("first.last+tag@sub.example.org"));
        assert!(!is_email(""));
        assert!(!is_email("nazmul"));
        assert!(!is_email("a@@example.com"));
        assert!(!is_email("a..b@example.com"));
        assert!(!is_email("user@localhost"));
    }

    #[test]
    fn test_url() {
        assert!(is_url("https://example.com/path?q=1"));
        assert!(!is_url("example.com"));
        assert!(!is_url("not a url"));
    }

    #[test]
    fn test_uuid_versions() {
        let v4 = "67e55044-10b1-426f-9247-bb680e5fe0c8";
        assert!(is_uuid(v4));
        assert!(is_uuid_v4(v4));
        assert!(!is_uuid_v1(v4));
        assert!(!is_uuid("67e55044"));
    }

    #[test]
    fn test_ip_addresses() {
        assert!(is_ipv4("192.168.0.1"));
        assert!(!is_ipv4("256.0.0.1"));
        assert!(is_ipv6("::1"));
        assert!(!is_ipv6("192.168.0.1"));
    }

    #[test]
    fn test_encodings() {
        assert!(is_json(r#"{"a": [1, 2]}"#));
        assert!(!is_json("{a: 1}"));
        assert!(is_base64("aGVsbG8="));
        assert!(!is_base64("not base64!"));
        assert!(!is_base64(""));
        assert!(is_hexadecimal("0x1F"));
        assert!(is_hexadecimal("deadBEEF"));
        assert!(!is_hexadecimal("xyz"));
    }

    #[test]
    fn test_character_classes() {
        assert!(is_alpha("abcXYZ"));
        assert!(!is_alpha("abc1"));
        assert!(is_alphanumeric("abc123"));
        assert!(!is_alphanumeric("abc 123"));
        assert!(is_ascii("plain"));
        assert!(!is_ascii("naïve"));
    }

    #[test]
    fn test_numeric_shapes() {
        assert!(is_decimal("-12.5"));
        assert!(is_decimal(".5"));
        assert!(!is_decimal("1.2.3"));
        assert!(is_port("8080"));
        assert!(is_port("0"));
        assert!(!is_port("65536"));
        assert!(!is_port("+80"));
    }

    #[test]
    fn test_colors_and_dates() {
        assert!(is_hex_color("#fff"));
        assert!(is_hex_color("#A1B2C3"));
        assert!(!is_hex_color("fff"));
        assert!(is_rfc3339("2024-01-15T10:30:00Z"));
        assert!(!is_rfc3339("2024-01-15"));
        assert!(is_date("2024-02-29"));
        assert!(!is_date("2023-02-29"));
    }

    #[test]
    fn test_rgb_and_hsl() {
        assert!(is_rgb("rgb(255, 100, 50)"));
        assert!(is_rgb("rgb(0,0,0)"));
        assert!(!is_rgb("rgb(256, 100, 50)"));
        assert!(is_rgb("rgba(255, 100, 50, 0.5)"));
        assert!(is_rgb("rgba(100%, 50%, 0%, 50%)"));
        assert!(!is_rgb("rgba(255, 100, 50, 2.3)"));
        assert!(!is_rgb("rgba(255, 100, 50)"));
        assert!(!is_rgb("rgb(255, 100, 50, 1)"));
        assert!(!is_rgb("rgb(100%, 50, 0)"));

        assert!(is_hsl("hsl(200, 50%, 50%)"));
        assert!(!is_hsl("hsl(361, 50%, 50%)"));
        assert!(!is_hsl("hsl(200, 50, 50%)"));
    }

    #[test]
    fn test_paths() {
        assert!(is_path("/usr/local/bin"));
        assert!(is_path("C:\\Users\\me\\file.txt"));
        assert!(is_path("./src/lib.rs"));
        assert!(!is_path("bad|path"));
        assert!(!is_path(""));
    }

    #[test]
    fn test_identifiers_and_cards() {
        assert!(is_ulid("01ARZ3NDEKTSV4RRFFQ69G5FAV"));
        assert!(!is_ulid("01ARZ3NDEKTSV4RRFFQ69G5FA"));
        assert!(!is_ulid("81ARZ3NDEKTSV4RRFFQ69G5FAV"));

        assert!(is_credit_card("4111 1111 1111 1111"));
        assert!(is_credit_card("5500-0000-0000-0004"));
        assert!(!is_credit_card("4111 1111 1111 1112"));
        assert!(!is_credit_card("4111"));
        assert!(!is_credit_card("4111 1111 1111 111a"));
    }
}
