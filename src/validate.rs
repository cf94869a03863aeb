use regex::Regex;
use std::sync::LazyLock;

// local@domain.tld shape; intentionally loose beyond requiring a dotted
// domain and no whitespace.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Basic email format check.
pub fn is_valid_email(address: &str) -> bool {
    EMAIL_RE.is_match(address)
}

/// A request field counts as missing when it is absent or empty.
pub fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().is_none_or(str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@mail.example.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing-tld@domain"));
        assert!(!is_valid_email("two@@signs.com"));
        assert!(!is_valid_email("spaced out@domain.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn blank_detection() {
        assert!(is_blank(&None));
        assert!(is_blank(&Some(String::new())));
        assert!(!is_blank(&Some("x".to_string())));
    }
}
