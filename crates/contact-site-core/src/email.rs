//! Email validation functions

use once_cell::sync::Lazy;
use regex::Regex;

/// `local@domain.tld` where no part contains whitespace or a second '@'.
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Validates basic email format
///
/// Deliberately permissive, this is a syntactic check only:
/// - exactly one '@' with content on both sides
/// - no whitespace anywhere
/// - at least one '.' in the domain followed by at least one character
///
/// Consecutive dots and unknown TLDs are accepted.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("test.user@example.co.uk"));
        assert!(is_valid_email("user+tag@example.com"));
        // permissive on purpose
        assert!(is_valid_email("user@example..com"));
        assert!(is_valid_email("user@.com.x"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("@"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("user@exa mple.com"));
        assert!(!is_valid_email("user@example."));
    }
}
