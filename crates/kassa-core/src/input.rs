//! # Count Input Parsing
//!
//! Turns whatever the user typed into a count field into an integer.
//!
//! ## Rules
//! ```text
//! "12"      → 12
//! "  7 "    → 7
//! "3st"     → 3        (leading digits win, trailing text ignored)
//! "-4"      → -4       (set_count floors this to 0 afterwards)
//! ""        → 0
//! "abc"     → 0
//! "9999…9"  → i64::MAX (saturates)
//! ```
//!
//! Never fails: a count field that cannot be read is simply zero.

/// Parses free text into a count.
///
/// ## Example
/// ```rust
/// use kassa_core::input::parse_count;
///
/// assert_eq!(parse_count("3 st"), 3);
/// assert_eq!(parse_count("tre"), 0);
/// ```
pub fn parse_count(text: &str) -> i64 {
    let trimmed = text.trim();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    for digit in rest.bytes().take_while(u8::is_ascii_digit) {
        let digit = i64::from(digit - b'0');
        value = value
            .saturating_mul(10)
            .saturating_add(if negative { -digit } else { digit });
    }

    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(parse_count("0"), 0);
        assert_eq!(parse_count("12"), 12);
        assert_eq!(parse_count("+8"), 8);
    }

    #[test]
    fn test_whitespace_and_trailing_text() {
        assert_eq!(parse_count("  7 "), 7);
        assert_eq!(parse_count("3st"), 3);
        assert_eq!(parse_count("4.9"), 4);
    }

    #[test]
    fn test_non_numeric_is_zero() {
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("abc"), 0);
        assert_eq!(parse_count("-"), 0);
        assert_eq!(parse_count("x12"), 0);
    }

    #[test]
    fn test_negative_is_kept_for_clamping_later() {
        assert_eq!(parse_count("-4"), -4);
    }

    #[test]
    fn test_saturates() {
        assert_eq!(parse_count("99999999999999999999999"), i64::MAX);
        assert_eq!(parse_count("-99999999999999999999999"), i64::MIN);
    }
}
