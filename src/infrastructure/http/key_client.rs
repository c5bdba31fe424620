//! HTTP implementation of the key-derivation service client.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use super::HttpSettings;
use crate::domain::gateways::KeyClient;
use crate::error::AppError;

static RC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<rc>([^<]+)</rc>").expect("valid regex"));

/// Key-derivation service client.
///
/// The endpoint already carries the query string; the key fragment is
/// appended as the final query value. Requests are never retried here:
/// responses may be single-use on the service side.
pub struct HttpKeyClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpKeyClient {
    /// Creates a client for the given endpoint prefix.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Http`] when the underlying client cannot be built.
    pub fn new(settings: &HttpSettings, endpoint: impl Into<String>) -> Result<Self, AppError> {
        Ok(Self {
            client: settings.build_client()?,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl KeyClient for HttpKeyClient {
    async fn resolve_key(&self, fragment: &str) -> Result<String, AppError> {
        let url = format!("{}{}", self.endpoint, fragment);
        tracing::debug!("requesting key material from the key service");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::key_service(format!("request failed: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::key_service(format!("error status: {e}")))?;

        let body = response
            .text()
            .await
            .map_err(|e| AppError::key_service(format!("unreadable response body: {e}")))?;
        if body.is_empty() {
            return Err(AppError::key_service("empty response body"));
        }

        parse_key_response(&body)
    }
}

/// Extracts the key material from the service's `<rc>` tag.
pub(crate) fn parse_key_response(body: &str) -> Result<String, AppError> {
    RC_RE
        .captures(body)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| AppError::key_service(format!("unexpected response: {body}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_rc_tag() {
        let key = parse_key_response("<rc>a2V5bWF0ZXJpYWw=</rc>").unwrap();
        assert_eq!(key, "a2V5bWF0ZXJpYWw=");
    }

    #[test]
    fn test_rc_tag_inside_larger_body() {
        let key = parse_key_response("<resp><rc>S0VZ</rc></resp>").unwrap();
        assert_eq!(key, "S0VZ");
    }

    #[test]
    fn test_missing_tag_fails() {
        let result = parse_key_response("<error>quota exceeded</error>");
        assert!(matches!(result.unwrap_err(), AppError::KeyService { .. }));
    }

    #[test]
    fn test_empty_tag_fails() {
        let result = parse_key_response("<rc></rc>");
        assert!(matches!(result.unwrap_err(), AppError::KeyService { .. }));
    }

    #[test]
    fn test_error_mentions_connectivity() {
        let err = parse_key_response("nope").unwrap_err();
        assert!(err.to_string().contains("check your internet connection"));
    }
}
