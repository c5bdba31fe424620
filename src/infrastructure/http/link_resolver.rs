//! HTTP implementation of two-stage redirect resolution.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use super::HttpSettings;
use crate::domain::gateways::LinkResolver;
use crate::domain::session::SessionHeader;
use crate::error::AppError;

static HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"href='([^']*)'").expect("valid regex"));

/// Two-stage redirect resolver.
///
/// Stage 1 fetches the obfuscated row link and scrapes the embedded redirect
/// target; stage 2 fetches that target and reads the `Location` header off
/// the raw redirect response. Both stages attach the same session header.
pub struct HttpLinkResolver {
    client: reqwest::Client,
}

impl HttpLinkResolver {
    /// Creates a resolver. Redirect-following is force-disabled regardless of
    /// the passed settings: stage 2 has to observe `Location` itself.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Http`] when the underlying client cannot be built.
    pub fn new(settings: &HttpSettings) -> Result<Self, AppError> {
        let settings = HttpSettings {
            follow_redirects: false,
            ..settings.clone()
        };
        Ok(Self {
            client: settings.build_client()?,
        })
    }
}

#[async_trait]
impl LinkResolver for HttpLinkResolver {
    async fn resolve(&self, url: &str, session: &SessionHeader) -> Result<String, AppError> {
        tracing::debug!(%url, "resolving row link, stage 1");
        let response = self
            .client
            .get(url)
            .header(SessionHeader::NAME, session.value())
            .send()
            .await
            .map_err(|e| AppError::resolution(format!("stage 1 request failed: {e}")))?;
        if !response.status().is_success() {
            return Err(AppError::resolution(format!(
                "stage 1 returned status {}",
                response.status()
            )));
        }
        let body = response
            .text()
            .await
            .map_err(|e| AppError::resolution(format!("stage 1 body unreadable: {e}")))?;

        let target = scrape_redirect_target(&body)
            .ok_or_else(|| AppError::resolution("stage 1 body contains no redirect target"))?;
        if target.is_empty() {
            return Err(AppError::resolution("stage 1 redirect target is empty"));
        }
        let target = target.to_string();

        tracing::debug!(%target, "resolving row link, stage 2");
        let response = self
            .client
            .get(&target)
            .header(SessionHeader::NAME, session.value())
            .send()
            .await
            .map_err(|e| AppError::resolution(format!("stage 2 request failed: {e}")))?;

        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .ok_or_else(|| AppError::resolution("stage 2 response has no Location header"))?;
        let location = location
            .to_str()
            .map_err(|e| AppError::resolution(format!("Location header is not valid text: {e}")))?;

        Ok(location.to_string())
    }
}

/// Scrapes the single-quoted `href` value out of a stage-1 body.
pub(crate) fn scrape_redirect_target(body: &str) -> Option<&str> {
    HREF_RE
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
