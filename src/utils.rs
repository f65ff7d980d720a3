use std::sync::LazyLock;

use regex::Regex;

const SNIPPET_LEN: usize = 200;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9](?:[a-z0-9-]*[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]*[a-z0-9])?)*\.[a-z]{2,}$")
        .expect("Failed to compile email regex")
});

/// Whether the argument looks like an email address rather than a GitHub login.
/// This is a syntactic guess; an email-shaped login is classified as an email.
pub fn is_email(s: &str) -> bool {
    EMAIL_REGEX.is_match(s)
}

/// Shorten a response body for an error message
pub fn snippet(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(SNIPPET_LEN) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_email() {
        assert!(is_email("user@example.com"));
        assert!(is_email("First.Last+course@Sub.Example.ORG"));
        assert!(!is_email("octocat"));
        assert!(!is_email("some-login"));
        assert!(!is_email("user@localhost"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("user@example.com trailing"));
    }

    #[test]
    fn test_snippet_truncates_long_bodies() {
        let long = "x".repeat(500);
        let s = snippet(&long);
        assert_eq!(s.len(), SNIPPET_LEN + 3);
        assert!(s.ends_with("..."));
        assert_eq!(snippet(" short \n"), "short");
    }

    #[test]
    fn test_snippet_respects_char_boundaries() {
        let long = "é".repeat(300);
        let s = snippet(&long);
        assert_eq!(s.chars().count(), SNIPPET_LEN + 3);
    }
}
