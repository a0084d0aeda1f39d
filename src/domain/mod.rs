//! Domain layer containing business entities, typed queries and repository traits.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures ([`entities::Url`], [`entities::User`])
//! - [`queries`] - Closed set of typed store queries, identifiers and pagination
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependency on a concrete store. Implementations
//! live in [`crate::infrastructure::persistence`].

pub mod entities;
pub mod queries;
pub mod repositories;
