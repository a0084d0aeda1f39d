//! Application layer services implementing the use cases.
//!
//! Services consume repository traits and expose one method per use case to
//! the HTTP handlers and the admin CLI. They never build transport responses.
//!
//! # Available Services
//!
//! - [`services::url_service::UrlService`] - Short url creation, expansion, listing, redirects
//! - [`services::user_service::UserService`] - User registration and API key authentication

pub mod services;
