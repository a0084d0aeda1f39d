//! DTOs for user registration.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/user`.
///
/// `email` stays untyped: a number or object must fail as `InvalidEmail`,
/// not as a deserialization error.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: Value,
}

/// The issued key. It is shown exactly once.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub api_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_email_is_null() {
        let req: RegisterRequest = serde_json::from_str("{}").unwrap();
        assert!(req.email.is_null());
    }

    #[test]
    fn test_non_string_email_is_kept() {
        let req: RegisterRequest = serde_json::from_str(r#"{"email": 123}"#).unwrap();
        assert_eq!(req.email, serde_json::json!(123));
    }
}
