//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod expand;
pub mod health;
pub mod redirect;
pub mod short;
pub mod urls;
pub mod user;

pub use expand::expand_handler;
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use short::short_handler;
pub use urls::{get_url_handler, list_urls_handler};
pub use user::register_handler;
