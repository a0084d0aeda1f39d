//! Short code generation.
//!
//! Codes are drawn uniformly from the 52 ASCII letters and checked against
//! the store until a free one is found (rejection sampling over 52^9 values).
//! The check is only a fast path: the store's unique constraint on `code` is
//! what guarantees uniqueness, and callers retry on a code collision at insert.

use rand::Rng;
use serde_json::json;

use crate::domain::entities::url::MAX_CODE_LEN;
use crate::domain::queries::UrlQuery;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Alphabet for generated codes: upper and lower case ASCII letters.
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Length of generated codes.
pub const CODE_LEN: usize = MAX_CODE_LEN;

/// Draws one random code candidate.
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..CODE_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CODE_ALPHABET.len());
            CODE_ALPHABET[idx] as char
        })
        .collect()
}

/// Draws candidates until one is not present in the store.
///
/// The loop is unbounded; among 52^9 codes a collision is rare.
///
/// # Errors
///
/// Returns store errors from the existence check.
pub async fn allocate_code<U>(repository: &U) -> Result<String, AppError>
where
    U: UrlRepository + ?Sized,
{
    loop {
        let code = generate_code();

        if repository
            .find_one_url(&UrlQuery::ByCode(code.clone()))
            .await?
            .is_none()
        {
            return Ok(code);
        }

        tracing::debug!(code = %code, "Generated code already taken, drawing again");
    }
}

/// Validates an owner-supplied code.
///
/// # Errors
///
/// Returns [`AppError::CodeTooLong`] if the code exceeds [`MAX_CODE_LEN`] characters.
pub fn validate_explicit_code(code: &str) -> Result<(), AppError> {
    let len = code.chars().count();
    if len > MAX_CODE_LEN {
        return Err(AppError::code_too_long(
            format!("Code param must have a max length of {MAX_CODE_LEN}"),
            json!({ "provided_length": len }),
        ));
    }

    Ok(())
}
