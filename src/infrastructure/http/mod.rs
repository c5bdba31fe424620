//! HTTP gateway implementations backed by `reqwest`.
//!
//! Every outbound client is built from an explicit [`HttpSettings`] value.
//! Stage 2 of redirect resolution must observe the `Location` header itself,
//! so [`HttpLinkResolver`] always runs on the variant with redirect-following
//! disabled; the page fetcher uses the default-following variant.

pub mod key_client;
pub mod link_resolver;
pub mod page_fetcher;

pub use key_client::HttpKeyClient;
pub use link_resolver::HttpLinkResolver;
pub use page_fetcher::HttpPageFetcher;

use std::time::Duration;

use crate::error::AppError;

/// Connection settings for one outbound client.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub user_agent: String,
    pub timeout: Duration,
    pub follow_redirects: bool,
}

impl HttpSettings {
    /// Settings with reqwest's default redirect-following behavior.
    pub fn standard(user_agent: impl Into<String>, timeout: Duration) -> Self {
        Self {
            user_agent: user_agent.into(),
            timeout,
            follow_redirects: true,
        }
    }

    /// Settings that surface redirect responses instead of following them.
    pub fn no_redirect(user_agent: impl Into<String>, timeout: Duration) -> Self {
        Self {
            follow_redirects: false,
            ..Self::standard(user_agent, timeout)
        }
    }

    /// Builds a `reqwest` client from these settings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Http`] when the client cannot be constructed.
    pub fn build_client(&self) -> Result<reqwest::Client, AppError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .timeout(self.timeout);
        if !self.follow_redirects {
            builder = builder.redirect(reqwest::redirect::Policy::none());
        }
        builder
            .build()
            .map_err(|e| AppError::http(format!("failed to build HTTP client: {e}")))
    }
}
