//! Data Transfer Objects for API requests and responses.
//!
//! Query parameters are kept as raw strings so that a missing or malformed
//! value reaches the service and is reported with the proper error kind.

pub mod expand;
pub mod health;
pub mod short;
pub mod urls;
pub mod user;
