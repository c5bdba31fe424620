//! Gateway trait for the remote key-derivation service.

use async_trait::async_trait;

use crate::error::AppError;

/// Client for the key-derivation service used by the DLC decryption path.
///
/// The visible package never carries a usable key; the real key material has
/// to be fetched from the service at decrypt time. Responses may be
/// single-use, so implementations must not retry internally.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::HttpKeyClient`] - HTTP implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyClient: Send + Sync {
    /// Exchanges an opaque key fragment for base64 key material.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::KeyService`] when the response body is empty,
    /// the expected tag is missing, or the request fails at the transport
    /// level.
    async fn resolve_key(&self, fragment: &str) -> Result<String, AppError>;
}
