//! Session credential required by the redirect-resolution endpoints.

use crate::error::AppError;

/// Cookie header carrying the container page's session id.
///
/// Extracted once from the container page response and re-attached verbatim
/// on every resolution request. Read-only after construction, so it is safe
/// to clone into concurrently running resolution tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHeader {
    value: String,
}

impl SessionHeader {
    /// Header name the credential is sent under.
    pub const NAME: &'static str = "Cookie";

    /// Builds the header from the first `Set-Cookie` value of the container
    /// page response, e.g. `PHPSESSID=abc123; path=/; HttpOnly`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the cookie has no `name=value`
    /// pair.
    pub fn from_set_cookie(set_cookie: &str) -> Result<Self, AppError> {
        let first = set_cookie.split(';').next().unwrap_or_default().trim();
        let (name, value) = first
            .split_once('=')
            .ok_or_else(|| AppError::validation("Set-Cookie header has no name=value pair"))?;
        Ok(Self {
            value: format!("{}={}", name.trim(), value.trim()),
        })
    }

    /// The `name=value` cookie pair to send.
    pub fn value(&self) -> &str {
        &self.value
    }
}
