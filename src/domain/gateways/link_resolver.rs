//! Gateway trait for two-stage redirect resolution.

use async_trait::async_trait;

use crate::domain::session::SessionHeader;
use crate::error::AppError;

/// Resolves a single obfuscated row link to its final URL.
///
/// Rows are independent; the container service fans calls out over
/// concurrent tasks and joins the results back into row order. The session
/// header is the only shared state and is read-only.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::HttpLinkResolver`] - HTTP implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkResolver: Send + Sync {
    /// Follows the two-stage redirect chain for one row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Resolution`] when the first stage carries no
    /// redirect target, the second stage has no `Location` header, or either
    /// request fails. The error is scoped to this row only.
    async fn resolve(&self, url: &str, session: &SessionHeader) -> Result<String, AppError>;
}
