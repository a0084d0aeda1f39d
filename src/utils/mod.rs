//! Helper functions used across the service.
//!
//! - [`canonicalize`] - URL and email canonicalization
//! - [`code_generator`] - Short code generation and validation
//! - [`api_key`] - API key issuance

pub mod api_key;
pub mod canonicalize;
pub mod code_generator;
