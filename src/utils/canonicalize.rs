//! URL and email canonicalization.
//!
//! Inputs are normalized before storage or comparison so that equivalent
//! spellings of the same target deduplicate.

use serde_json::{Value, json};
use validator::ValidateEmail;

use crate::error::AppError;

/// Errors that can occur during canonicalization.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CanonicalizeError {
    #[error("URL is not valid: {0}")]
    InvalidUrl(String),

    #[error("Email must be a string")]
    EmailNotString,

    #[error("Email is not valid")]
    InvalidEmail,
}

impl From<CanonicalizeError> for AppError {
    fn from(e: CanonicalizeError) -> Self {
        let details = json!({ "reason": e.to_string() });
        match e {
            CanonicalizeError::InvalidUrl(_) => AppError::invalid_url("URL is not valid", details),
            CanonicalizeError::EmailNotString | CanonicalizeError::InvalidEmail => {
                AppError::invalid_email("Email is not valid", details)
            }
        }
    }
}

/// Canonicalizes a URL.
///
/// # Rules
///
/// 1. All whitespace is removed
/// 2. Any remaining control character rejects the input
/// 3. `http://` is prepended unless the input starts with `http://` or `https://`
/// 4. Trailing `/` characters are removed
/// 5. The result must parse with a non-empty host
///
/// The output is a fixed point: canonicalizing it again returns it unchanged.
///
/// # Errors
///
/// Returns [`CanonicalizeError::InvalidUrl`] if no host can be parsed or the
/// input carries a control character.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(canonicalize_url("google.com/").unwrap(), "http://google.com");
/// ```
pub fn canonicalize_url(raw: &str) -> Result<String, CanonicalizeError> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    if compact.contains(char::is_control) {
        return Err(CanonicalizeError::InvalidUrl(
            "control characters are not allowed".to_string(),
        ));
    }

    let with_scheme = if has_http_scheme(&compact) {
        compact
    } else {
        format!("http://{compact}")
    };

    let canonical = with_scheme.trim_end_matches('/');

    let parsed =
        url::Url::parse(canonical).map_err(|e| CanonicalizeError::InvalidUrl(e.to_string()))?;

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(canonical.to_string()),
        _ => Err(CanonicalizeError::InvalidUrl("missing host".to_string())),
    }
}

fn has_http_scheme(s: &str) -> bool {
    let starts_with = |prefix: &str| {
        s.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    };
    starts_with("http://") || starts_with("https://")
}

/// Canonicalizes an email address.
///
/// Accepts either a bare address or a `Display Name <address>` mailbox and
/// returns the bare address with its case preserved.
///
/// # Errors
///
/// Returns [`CanonicalizeError::InvalidEmail`] if the input has no `@` or no
/// address can be extracted.
pub fn canonicalize_email(raw: &str) -> Result<String, CanonicalizeError> {
    if !raw.contains('@') {
        return Err(CanonicalizeError::InvalidEmail);
    }

    let address = extract_mailbox(raw)
        .ok_or(CanonicalizeError::InvalidEmail)?
        .to_string();

    if !address.validate_email() {
        return Err(CanonicalizeError::InvalidEmail);
    }

    Ok(address)
}

/// Canonicalizes an email received as an untyped JSON value.
pub fn canonicalize_email_value(raw: &Value) -> Result<String, CanonicalizeError> {
    match raw {
        Value::String(s) => canonicalize_email(s),
        _ => Err(CanonicalizeError::EmailNotString),
    }
}

/// Extracts the address part of an RFC 5322-style mailbox.
fn extract_mailbox(raw: &str) -> Option<&str> {
    let raw = raw.trim();

    let address = match (raw.rfind('<'), raw.rfind('>')) {
        (Some(open), Some(close)) if open < close => &raw[open + 1..close],
        (None, None) => raw,
        _ => return None,
    };

    let address = address.trim();
    if address.is_empty() || address.contains(['<', '>']) || address.contains(char::is_whitespace)
    {
        return None;
    }

    Some(address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_url_equivalent_spellings() {
        let expected = "http://google.com";

        assert_eq!(canonicalize_url("http://google.com").unwrap(), expected);
        assert_eq!(canonicalize_url("google.com").unwrap(), expected);
        assert_eq!(canonicalize_url("google.com/").unwrap(), expected);
    }

    #[test]
    fn test_canonicalize_url_keeps_https() {
        assert_eq!(
            canonicalize_url("https://example.com/path/").unwrap(),
            "https://example.com/path"
        );
    }

    #[test]
    fn test_canonicalize_url_strips_whitespace() {
        assert_eq!(
            canonicalize_url("  http://example.com/a b\t/c \n").unwrap(),
            "http://example.com/ab/c"
        );
    }

    #[test]
    fn test_canonicalize_url_preserves_query_and_case() {
        assert_eq!(
            canonicalize_url("https://Example.com/Path?q=Rust&x=1").unwrap(),
            "https://Example.com/Path?q=Rust&x=1"
        );
    }

    #[test]
    fn test_canonicalize_url_scheme_prefix_is_case_insensitive() {
        assert_eq!(
            canonicalize_url("HTTPS://example.com").unwrap(),
            "HTTPS://example.com"
        );
    }

    #[test]
    fn test_canonicalize_url_is_idempotent() {
        let inputs = [
            "google.com",
            "google.com/",
            "http://google.com//",
            "https://example.com/a/b/?x=1",
            " example.org / path ",
            "localhost:8080/api/",
        ];

        for input in inputs {
            let once = canonicalize_url(input).unwrap();
            let twice = canonicalize_url(&once).unwrap();
            assert_eq!(once, twice, "input: {input}");
        }
    }

    #[test]
    fn test_canonicalize_email_address_must_be_well_formed() {
        // The mailbox parse is permissive; the extracted address is not.
        assert!(canonicalize_email("a@@b").is_err());
        assert!(canonicalize_email("Jane <a@>").is_err());
    }

    #[test]
    fn test_canonicalize_url_empty_is_invalid() {
        assert!(matches!(
            canonicalize_url(""),
            Err(CanonicalizeError::InvalidUrl(_))
        ));
        assert!(canonicalize_url("   ").is_err());
        assert!(canonicalize_url("http://").is_err());
        assert!(canonicalize_url("https:///").is_err());
    }

    #[test]
    fn test_canonicalize_url_rejects_control_characters() {
        for input in ["http://example.com/a\u{1}b", "example.com/\u{7f}", "\u{0}example.com"] {
            assert!(
                matches!(canonicalize_url(input), Err(CanonicalizeError::InvalidUrl(_))),
                "{input:?}"
            );
        }
    }

    #[test]
    fn test_canonicalize_url_error_maps_to_invalid_url() {
        let err: AppError = canonicalize_url("").unwrap_err().into();
        assert!(matches!(err, AppError::InvalidUrl { .. }));
    }

    #[test]
    fn test_canonicalize_email_plain() {
        assert_eq!(
            canonicalize_email("test@email.com").unwrap(),
            "test@email.com"
        );
    }

    #[test]
    fn test_canonicalize_email_preserves_case() {
        assert_eq!(
            canonicalize_email("Test.User@Email.com").unwrap(),
            "Test.User@Email.com"
        );
    }

    #[test]
    fn test_canonicalize_email_display_name() {
        assert_eq!(
            canonicalize_email("Test User <test@email.com>").unwrap(),
            "test@email.com"
        );
    }

    #[test]
    fn test_canonicalize_email_invalid() {
        assert_eq!(
            canonicalize_email("123"),
            Err(CanonicalizeError::InvalidEmail)
        );
        assert_eq!(
            canonicalize_email("<<@>>"),
            Err(CanonicalizeError::InvalidEmail)
        );
        assert!(canonicalize_email("").is_err());
        assert!(canonicalize_email("name <test@email.com").is_err());
    }

    #[test]
    fn test_canonicalize_email_value_requires_string() {
        assert_eq!(
            canonicalize_email_value(&json!(123)),
            Err(CanonicalizeError::EmailNotString)
        );

        let err: AppError = canonicalize_email_value(&json!(null)).unwrap_err().into();
        assert!(matches!(err, AppError::InvalidEmail { .. }));
    }
}
