//! Identifier helpers: UUID generation and URI shape checks.

/// Generate a random (v4) UUID string, used for dialog event ids.
pub fn new_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Check that `s` looks like an absolute URI: `scheme:rest` with an RFC 3986
/// scheme, a non-empty remainder and no whitespace.
pub fn is_uri(s: &str) -> bool {
    let Some((scheme, rest)) = s.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    let scheme_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));

    scheme_ok && !rest.is_empty() && !s.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uuid_is_unique_v4() {
        let a = new_uuid();
        let b = new_uuid();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
        assert_eq!(a.chars().nth(14), Some('4'));
    }

    #[test]
    fn test_is_uri() {
        assert!(is_uri("tag:example.com,2025:agent-1"));
        assert!(is_uri("https://agents.example.com/weather"));
        assert!(is_uri("urn:uuid:1234"));
        assert!(!is_uri("agent-1"));
        assert!(!is_uri(":missing-scheme"));
        assert!(!is_uri("1http://x"));
        assert!(!is_uri("tag:"));
        assert!(!is_uri("tag:has space"));
    }
}
