//! Inline ("Click'n'Load") payload decryption.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::domain::entities::CnlPayload;
use crate::error::AppError;
use crate::utils::aes::{aes128_cbc_decrypt, BLOCK_SIZE};
use crate::utils::encoding::utf8_or_latin1;

/// Decrypts the inline payload embedded in a container page.
///
/// The payload is a single AES-128-CBC blob whose key doubles as the IV.
/// The recovered plaintext is noisy: header bytes before the first link and
/// NUL padding after the last one are both expected and stripped here.
#[derive(Debug, Default)]
pub struct CnlDecryptor;

impl CnlDecryptor {
    pub fn new() -> Self {
        Self
    }

    /// Recovers the link list from an inline payload, in plaintext order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Decryption`] on malformed hex, malformed base64 or
    /// misaligned ciphertext. Callers treat any failure here as "payload
    /// absent", not as a fatal build error.
    pub fn decrypt(&self, payload: &CnlPayload) -> Result<Vec<String>, AppError> {
        let key = hex::decode(payload.key_hex())
            .map_err(|e| AppError::decryption(format!("payload key is not valid hex: {e}")))?;
        if key.len() != BLOCK_SIZE {
            return Err(AppError::decryption(format!(
                "payload key must be {BLOCK_SIZE} bytes, got {}",
                key.len()
            )));
        }

        let ciphertext = BASE64
            .decode(payload.encrypted_base64())
            .map_err(|e| AppError::decryption(format!("payload blob is not valid base64: {e}")))?;

        // the key doubles as the IV in this format
        let plaintext = aes128_cbc_decrypt(&ciphertext, &key, &key)?;

        let text = utf8_or_latin1(&plaintext);
        let text = text.trim_matches('\0');

        Ok(extract_links(text))
    }
}

/// Cuts the leading noise before the first `http` (case-insensitive) and
/// splits the remainder into one link per line.
fn extract_links(raw: &str) -> Vec<String> {
    let trimmed = match find_http(raw) {
        Some(start) => &raw[start..],
        None => raw,
    };

    trimmed
        .trim()
        .split(['\r', '\n'])
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}

fn find_http(raw: &str) -> Option<usize> {
    // matches start on an ASCII byte, so the offset is a char boundary
    raw.as_bytes()
        .windows(4)
        .position(|window| window.eq_ignore_ascii_case(b"http"))
}
