//! Gateway trait for retrieving container pages and package bodies.

use async_trait::async_trait;
use url::Url;

use crate::domain::session::SessionHeader;
use crate::error::AppError;

/// A fetched container page: raw HTML plus the session credential the
/// response established.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub body: String,
    pub session: SessionHeader,
}

/// Retrieves the container page and auxiliary text resources.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::HttpPageFetcher`] - HTTP implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the container page and the session cookie it sets.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Http`] on transport failure or an error status,
    /// [`AppError::Validation`] when no usable session cookie is present.
    async fn fetch_page(&self, url: &Url) -> Result<FetchedPage, AppError>;

    /// Fetches an auxiliary text resource (the DLC package body).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Http`] on transport failure or an error status.
    async fn fetch_text(&self, url: &Url) -> Result<String, AppError>;
}
