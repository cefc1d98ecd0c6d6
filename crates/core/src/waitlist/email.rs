use std::sync::LazyLock;

use regex::Regex;

use super::error::{EmailError, InvalidReason};

/// `local@domain.tld`, with no whitespace and exactly one `@`.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Produces the canonical comparison form of an email: trimmed, then lowercased.
///
/// Idempotent: `normalize_email(&normalize_email(e)) == normalize_email(e)`.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Checks an already normalized email against the `local@domain.tld` shape.
pub fn is_valid_email(normalized: &str) -> bool {
    EMAIL_PATTERN.is_match(normalized)
}

/// Turns raw client input into a canonical email ready for insertion.
///
/// `None` stands for a missing, empty, or non-string value.
pub fn parse_email(raw: Option<&str>) -> Result<String, EmailError> {
    let raw = raw.filter(|s| !s.is_empty()).ok_or(EmailError::Missing)?;
    let normalized = normalize_email(raw);
    if !is_valid_email(&normalized) {
        return Err(EmailError::InvalidFormat);
    }
    Ok(normalized)
}

/// Classifies a stored email, returning its canonical form or why it is unusable.
pub fn classify_stored_email(stored: &str) -> Result<String, InvalidReason> {
    let normalized = normalize_email(stored);
    if normalized.is_empty() {
        return Err(InvalidReason::Empty);
    }
    if !is_valid_email(&normalized) {
        return Err(InvalidReason::InvalidFormat);
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize_email("  A@B.com"), "a@b.com");
        assert_eq!(normalize_email("A@B.COM \t\n"), "a@b.com");
        assert_eq!(normalize_email("a@b.com"), "a@b.com");
    }

    /// Arbitrary strings mixed with email-shaped ones, so both the rejecting
    /// and the accepting paths of `parse_email` get exercised.
    fn raw_emails() -> impl Strategy<Value = String> {
        prop_oneof![
            any::<String>(),
            "[ \t]{0,2}[A-Za-z0-9._+-]{1,12}@[A-Za-z0-9-]{1,10}\\.[A-Za-zÀ-ÿ]{1,6}[ \t]{0,2}",
        ]
    }

    proptest! {
        #[test]
        fn test_normalize_is_idempotent(raw in any::<String>()) {
            let once = normalize_email(&raw);
            prop_assert_eq!(normalize_email(&once), once);
        }

        #[test]
        fn test_parsed_email_is_canonical_and_valid(raw in raw_emails()) {
            if let Ok(email) = parse_email(Some(&raw)) {
                prop_assert!(is_valid_email(&email));
                prop_assert_eq!(normalize_email(&email), email);
            }
        }
    }

    #[test]
    fn test_valid_emails() {
        for email in ["a@b.com", "first.last+tag@sub.example.co.uk", "x@y.z"] {
            assert!(is_valid_email(email), "{email} should be valid");
        }
    }

    #[test]
    fn test_invalid_emails() {
        for email in [
            "",
            "not-an-email",
            "a@b",
            "@b.com",
            "a@.com",
            "a b@c.com",
            "a@b@c.com",
            "a@b.",
        ] {
            assert!(!is_valid_email(email), "{email} should be invalid");
        }
    }

    #[test]
    fn test_parse_email_missing() {
        assert_eq!(parse_email(None), Err(EmailError::Missing));
        assert_eq!(parse_email(Some("")), Err(EmailError::Missing));
    }

    #[test]
    fn test_parse_email_whitespace_only_is_invalid_format() {
        assert_eq!(parse_email(Some("   ")), Err(EmailError::InvalidFormat));
    }

    #[test]
    fn test_parse_email_invalid_format() {
        assert_eq!(
            parse_email(Some("not-an-email")),
            Err(EmailError::InvalidFormat)
        );
    }

    #[test]
    fn test_parse_email_normalizes() {
        assert_eq!(parse_email(Some("  A@B.com")), Ok("a@b.com".to_string()));
        assert_eq!(parse_email(Some("a@b.com")), Ok("a@b.com".to_string()));
    }

    #[test]
    fn test_classify_stored_email() {
        assert_eq!(classify_stored_email("A@B.COM "), Ok("a@b.com".to_string()));
        assert_eq!(classify_stored_email(""), Err(InvalidReason::Empty));
        assert_eq!(classify_stored_email("  "), Err(InvalidReason::Empty));
        assert_eq!(
            classify_stored_email("not-an-email"),
            Err(InvalidReason::InvalidFormat)
        );
    }
}
