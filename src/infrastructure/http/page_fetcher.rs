//! HTTP implementation of the container page fetcher.

use async_trait::async_trait;
use url::Url;

use super::HttpSettings;
use crate::domain::gateways::{FetchedPage, PageFetcher};
use crate::domain::session::SessionHeader;
use crate::error::AppError;

/// Fetches container pages and package bodies over HTTP.
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    /// Creates a fetcher with default redirect-following behavior.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Http`] when the underlying client cannot be built.
    pub fn new(settings: &HttpSettings) -> Result<Self, AppError> {
        Ok(Self {
            client: settings.build_client()?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self, url: &Url) -> Result<FetchedPage, AppError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AppError::http(format!("container page request failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::http(format!("container page error status: {e}")))?;

        let set_cookie = response
            .headers()
            .get(reqwest::header::SET_COOKIE)
            .ok_or_else(|| AppError::http("container page set no session cookie"))?;
        let set_cookie = set_cookie
            .to_str()
            .map_err(|e| AppError::http(format!("Set-Cookie header is not valid text: {e}")))?;
        let session = SessionHeader::from_set_cookie(set_cookie)?;

        let body = response
            .text()
            .await
            .map_err(|e| AppError::http(format!("container page body unreadable: {e}")))?;

        Ok(FetchedPage { body, session })
    }

    async fn fetch_text(&self, url: &Url) -> Result<String, AppError> {
        self.client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AppError::http(format!("request failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::http(format!("error status: {e}")))?
            .text()
            .await
            .map_err(|e| AppError::http(format!("body unreadable: {e}")))
    }
}
