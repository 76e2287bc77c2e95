//! Reserved `@`-prefixed reason tokens.
//!
//! An event's `reason` is either free text or one of these tokens.

pub const TIMED_OUT: &str = "@timedOut";
pub const COMPLETE: &str = "@complete";
pub const UNAVAILABLE: &str = "@unavailable";
pub const OUT_OF_SCOPE: &str = "@outOfScope";
pub const BROKEN_POLICY: &str = "@brokenPolicy";
pub const ERROR: &str = "@error";

pub const RESERVED: [&str; 6] = [TIMED_OUT, COMPLETE, UNAVAILABLE, OUT_OF_SCOPE, BROKEN_POLICY, ERROR];

/// Whether `reason` is one of the reserved tokens.
pub fn is_reserved(reason: &str) -> bool {
    RESERVED.contains(&reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_tokens() {
        assert!(is_reserved("@timedOut"));
        assert!(is_reserved(COMPLETE));
        assert!(!is_reserved("@whatever"));
        assert!(!is_reserved("timed out"));
    }
}
