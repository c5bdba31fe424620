//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before any request
//! is made.
//!
//! ## Variables
//!
//! All optional, with defaults matching the public site and key service:
//!
//! - `FILECRYPT_BASE_URL` - Site base URL (default: `https://filecrypt.co`)
//! - `FILECRYPT_LINK_ENDPOINT` - Row link path segment (default: `Link`)
//! - `KEY_SERVICE_URL` - Key-derivation endpoint prefix; the key fragment is
//!   appended as the last query value
//! - `HTTP_USER_AGENT` - User agent for every outbound request
//! - `HTTP_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `RESOLUTION_POLICY` - `fail_fast` or `skip_failed` (default: `fail_fast`)
//! - `RUST_LOG` - Log filter (default: `info`)

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::services::ResolutionPolicy;

pub const DEFAULT_BASE_URL: &str = "https://filecrypt.co";
pub const DEFAULT_LINK_ENDPOINT: &str = "Link";
pub const DEFAULT_KEY_SERVICE_URL: &str =
    "http://service.jdownloader.org/dlcrypt/service.php?srcType=dlc&destType=pylo&data=";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub link_endpoint: String,
    pub key_service_url: String,
    pub user_agent: String,
    pub http_timeout_secs: u64,
    pub resolution_policy: ResolutionPolicy,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when a set variable fails to parse.
    pub fn from_env() -> Result<Self> {
        let base_url =
            env::var("FILECRYPT_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let link_endpoint = env::var("FILECRYPT_LINK_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_LINK_ENDPOINT.to_string());
        let key_service_url =
            env::var("KEY_SERVICE_URL").unwrap_or_else(|_| DEFAULT_KEY_SERVICE_URL.to_string());
        let user_agent =
            env::var("HTTP_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());

        let http_timeout_secs = match env::var("HTTP_TIMEOUT_SECS") {
            Ok(value) => value
                .parse()
                .context("HTTP_TIMEOUT_SECS must be an integer")?,
            Err(_) => 30,
        };

        let resolution_policy = match env::var("RESOLUTION_POLICY") {
            Ok(value) => value.parse().context("RESOLUTION_POLICY is invalid")?,
            Err(_) => ResolutionPolicy::default(),
        };

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            base_url,
            link_endpoint,
            key_service_url,
            user_agent,
            http_timeout_secs,
            resolution_policy,
            log_level,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `base_url` or `key_service_url` is not an HTTP(S) URL
    /// - `link_endpoint` is empty or contains a slash
    /// - `http_timeout_secs` is zero
    pub fn validate(&self) -> Result<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            anyhow::bail!(
                "FILECRYPT_BASE_URL must start with 'http://' or 'https://', got '{}'",
                self.base_url
            );
        }

        if self.link_endpoint.is_empty() || self.link_endpoint.contains('/') {
            anyhow::bail!(
                "FILECRYPT_LINK_ENDPOINT must be a single non-empty path segment, got '{}'",
                self.link_endpoint
            );
        }

        if !self.key_service_url.starts_with("http://")
            && !self.key_service_url.starts_with("https://")
        {
            anyhow::bail!(
                "KEY_SERVICE_URL must start with 'http://' or 'https://', got '{}'",
                self.key_service_url
            );
        }

        if self.http_timeout_secs == 0 {
            anyhow::bail!("HTTP_TIMEOUT_SECS must be greater than 0");
        }

        Ok(())
    }

    /// Per-request timeout as a duration.
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Prints a configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!("  Link endpoint: {}", self.link_endpoint);
        tracing::info!("  Key service: {}", self.key_service_url);
        tracing::info!("  HTTP timeout: {}s", self.http_timeout_secs);
        tracing::info!("  Resolution policy: {:?}", self.resolution_policy);
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Note
///
/// Expects environment variables to be already loaded (e.g. via
/// `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
