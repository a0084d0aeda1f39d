//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{UrlService, UserService};
use crate::domain::repositories::{UrlRepository, UserRepository};

/// Services and settings shared by every request.
///
/// Cloning is cheap: services are reference counted.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService<dyn UrlRepository>>,
    pub user_service: Arc<UserService<dyn UserRepository>>,
    /// Prefix of every short url, e.g. `https://sho.rt`.
    pub short_host: Arc<str>,
}

impl AppState {
    /// Builds the state over any pair of repository implementations.
    pub fn new(
        urls: Arc<dyn UrlRepository>,
        users: Arc<dyn UserRepository>,
        short_host: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            url_service: Arc::new(UrlService::new(urls)),
            user_service: Arc::new(UserService::new(users)),
            short_host: short_host.into(),
        }
    }
}
