//! Repository implementations.
//!
//! # Repositories
//!
//! - [`PgUrlRepository`] - Url storage, lookup and access logging on PostgreSQL
//! - [`PgUserRepository`] - User registration and API key lookup on PostgreSQL
//! - [`InMemoryStore`] - Both traits over a process-local table set

pub mod memory_store;
pub mod pg_url_repository;
pub mod pg_user_repository;

pub use memory_store::InMemoryStore;
pub use pg_url_repository::PgUrlRepository;
pub use pg_user_repository::PgUserRepository;
