//! Core domain entities.
//!
//! - [`Url`] - A shortened URL owned by a user, with its access log
//! - [`User`] - An API consumer identified by email and API key
//!
//! Entities follow the "New Type" pattern with separate structs for creation
//! (`NewUrl`, `NewUser`): identifiers are assigned by the store on insert.

pub mod url;
pub mod user;

pub use url::{AccessRecord, NewUrl, Url, UrlSummary};
pub use user::{NewUser, User};
