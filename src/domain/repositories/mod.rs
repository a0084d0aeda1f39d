//! Repository trait definitions for the domain layer.
//!
//! These traits are the only contract the service requires from its store:
//! typed lookups, owner pagination, inserts guarded by store-enforced unique
//! constraints, and an atomic append to a url's access log.
//!
//! # Implementations
//!
//! - `crate::infrastructure::persistence::PgUrlRepository` / `PgUserRepository` - PostgreSQL
//! - `crate::infrastructure::persistence::InMemoryStore` - process-local store
//! - Mock implementations are auto-generated via `mockall` for testing

pub mod url_repository;
pub mod user_repository;

pub use url_repository::{
    InsertResult, URLS_CODE_CONSTRAINT, URLS_OWNER_LONG_URL_CONSTRAINT, UrlRepository,
};
pub use user_repository::{USERS_API_KEY_CONSTRAINT, USERS_EMAIL_CONSTRAINT, UserRepository};

#[cfg(test)]
pub use url_repository::MockUrlRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
