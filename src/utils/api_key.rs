//! API key issuance.
//!
//! A key is the hex-encoded SHA-512 digest of the email followed by 64 bytes
//! of fresh OS entropy. The salt is discarded, so keys cannot be re-derived:
//! the caller must persist the key it is given.

use serde_json::json;
use sha2::{Digest, Sha512};

use crate::error::AppError;

/// Number of random salt bytes drawn per issued key.
pub const SALT_LEN: usize = 64;

/// Length of an issued key (hex-encoded SHA-512).
pub const API_KEY_LEN: usize = 128;

/// Issues a new API key for `email`.
///
/// Two calls for the same email return different keys.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the system random number generator fails.
pub fn issue_api_key(email: &str) -> Result<String, AppError> {
    let mut salt = [0u8; SALT_LEN];

    getrandom::fill(&mut salt).map_err(|e| {
        tracing::error!("Failed to draw API key salt: {}", e);
        AppError::internal("Failed to generate API key", json!({}))
    })?;

    Ok(hash_with_salt(email, &salt))
}

/// Hex-encoded SHA-512 of `email || salt`.
pub fn hash_with_salt(email: &str, salt: &[u8]) -> String {
    let mut hasher = Sha512::new();
    hasher.update(email.as_bytes());
    hasher.update(salt);
    hex::encode(hasher.finalize())
}
