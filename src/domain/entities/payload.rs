//! Encrypted payload value objects and the payload class selector.

use crate::error::AppError;

/// Inline ("Click'n'Load") payload embedded directly in the container page.
///
/// The hex key doubles as the cipher IV. The password is carried for forward
/// compatibility but unused by the current decryption path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CnlPayload {
    key_hex: String,
    encrypted_base64: String,
    password: Option<String>,
}

impl CnlPayload {
    /// Creates an inline payload.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when `key_hex` is empty or contains a
    /// non-hexadecimal character.
    pub fn new(
        encrypted_base64: impl Into<String>,
        key_hex: impl Into<String>,
        password: Option<String>,
    ) -> Result<Self, AppError> {
        let key_hex = key_hex.into();
        if key_hex.is_empty() || !key_hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AppError::validation(
                "payload key must be a non-empty hexadecimal string",
            ));
        }
        Ok(Self {
            key_hex,
            encrypted_base64: encrypted_base64.into(),
            password,
        })
    }

    pub fn key_hex(&self) -> &str {
        &self.key_hex
    }

    pub fn encrypted_base64(&self) -> &str {
        &self.encrypted_base64
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }
}

/// Number of trailing characters of a package that hold the key fragment.
pub const DLC_KEY_FRAGMENT_LEN: usize = 88;

/// Externally keyed ("DLC") package payload.
///
/// The trailing [`DLC_KEY_FRAGMENT_LEN`] characters are the key fragment sent
/// to the key-derivation service; everything before them is the encrypted
/// data fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DlcPayload {
    content: String,
}

impl DlcPayload {
    /// Creates a package payload.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the content is not ASCII (the
    /// format is base64-derived text, and the fragment split is positional)
    /// or not longer than the reserved key fragment.
    pub fn new(content: impl Into<String>) -> Result<Self, AppError> {
        let content = content.into();
        if !content.is_ascii() {
            return Err(AppError::validation(
                "package content must be ASCII text",
            ));
        }
        if content.len() <= DLC_KEY_FRAGMENT_LEN {
            return Err(AppError::validation(format!(
                "package content must be longer than {DLC_KEY_FRAGMENT_LEN} characters, got {}",
                content.len()
            )));
        }
        Ok(Self { content })
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// The trailing characters exchanged for the real key.
    pub fn key_fragment(&self) -> &str {
        &self.content[self.content.len() - DLC_KEY_FRAGMENT_LEN..]
    }

    /// Everything before the key fragment: the encrypted data.
    pub fn data_fragment(&self) -> &str {
        &self.content[..self.content.len() - DLC_KEY_FRAGMENT_LEN]
    }
}

/// Payload class present on a container page.
///
/// Decided once per build from the extracted metadata and dispatched through
/// a single match in the container service.
#[derive(Debug, Clone)]
pub enum PayloadSource {
    Inline(CnlPayload),
    Package(DlcPayload),
    None,
}
