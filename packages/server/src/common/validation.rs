//! Input validation shared by the house actions.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Anchored variant of the usual simplified RFC 5322 pattern.
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9-]+(\.[A-Z0-9-]+)*\.[A-Z]{2,}$"
    ).unwrap();
}

/// Returns true if `email` is a syntactically valid address.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email.trim())
}

/// Returns true if the value is absent or only whitespace.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Length in characters, not bytes (matches Postgres `char_length`).
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_addresses() {
        assert!(is_valid_email("b@x.com"));
        assert!(is_valid_email("first.last+house@student.example.nl"));
        assert!(is_valid_email("  padded@example.org "));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("missing-tld@example"));
        assert!(!is_valid_email("trailing@example.com extra"));
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(char_len("Zoë"), 3);
        assert!(is_blank("   "));
        assert!(!is_blank(" a "));
    }
}
