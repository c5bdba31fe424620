//! DLC package decryption: external key fetch plus a double AES pass.

use std::sync::{Arc, LazyLock};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use regex::Regex;

use crate::domain::entities::DlcPayload;
use crate::domain::gateways::KeyClient;
use crate::error::AppError;
use crate::utils::aes::{aes128_cbc_decrypt, BLOCK_SIZE};

// Fixed parameters of the DLC format used to unwrap the service-issued key.
// They are public format constants, not secrets, and invariant across inputs.
const DLC_KEY: &[u8; 16] = b"cb99b5cbc24db398";
const DLC_IV: &[u8; 16] = b"9bc24cb995cb8db3";

static FILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<file>(.*?)</file>").expect("valid regex"));
static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<url>\s*([^<]*?)\s*</url>").expect("valid regex"));

/// Decrypts an externally keyed package payload.
///
/// The package never carries a usable key: the trailing fragment is exchanged
/// with the key service for the real key material, whose decryption under the
/// fixed format constants yields the IV for the data pass. The data pass uses
/// that IV as both key and IV, mirroring the key pass's parameterization.
pub struct DlcDecryptor<K: KeyClient> {
    key_client: Arc<K>,
}

impl<K: KeyClient> DlcDecryptor<K> {
    pub fn new(key_client: Arc<K>) -> Self {
        Self { key_client }
    }

    /// Recovers the link list from a package payload, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Decryption`] for every failure in the chain; a
    /// key-service failure is preserved as the error's source. Callers treat
    /// any failure here as "payload absent".
    pub async fn decrypt(&self, payload: &DlcPayload) -> Result<Vec<String>, AppError> {
        let key_material = self
            .key_client
            .resolve_key(payload.key_fragment())
            .await
            .map_err(|e| AppError::decryption_caused_by("could not obtain the package key", e))?;

        let real_key = BASE64.decode(key_material.as_bytes()).map_err(|e| {
            AppError::decryption(format!("key service returned invalid base64: {e}"))
        })?;

        // the real IV is itself ciphertext under the fixed format constants
        let real_iv = aes128_cbc_decrypt(&real_key, DLC_KEY, DLC_IV)?;
        if real_iv.len() != BLOCK_SIZE {
            return Err(AppError::decryption(format!(
                "derived iv must be {BLOCK_SIZE} bytes, got {}",
                real_iv.len()
            )));
        }

        let data = BASE64.decode(payload.data_fragment()).map_err(|e| {
            AppError::decryption(format!("package data is not valid base64: {e}"))
        })?;
        let decrypted = aes128_cbc_decrypt(&data, &real_iv, &real_iv)?;

        // the decrypted text is NUL-padded base64 wrapping the document
        let text = String::from_utf8_lossy(&decrypted);
        let document = BASE64.decode(text.trim_end_matches('\0')).map_err(|e| {
            AppError::decryption(format!("decrypted package is not valid base64: {e}"))
        })?;
        let document = String::from_utf8_lossy(&document);

        tracing::debug!(bytes = document.len(), "decoded package document");
        extract_urls(&document)
    }
}

/// Pulls each `file/url` element's base64 text out of the package document
/// and decodes it. Elements with empty text are skipped.
fn extract_urls(document: &str) -> Result<Vec<String>, AppError> {
    let mut urls = Vec::new();
    let mut file_count = 0usize;

    for file in FILE_RE.captures_iter(document) {
        file_count += 1;
        for caps in URL_RE.captures_iter(&file[1]) {
            let encoded = caps[1].trim();
            if encoded.is_empty() {
                continue;
            }
            let decoded = BASE64.decode(encoded).map_err(|e| {
                AppError::decryption(format!("package url entry is not valid base64: {e}"))
            })?;
            urls.push(String::from_utf8_lossy(&decoded).into_owned());
        }
    }

    if file_count == 0 {
        return Err(AppError::decryption(
            "package document contains no file entries",
        ));
    }

    Ok(urls)
}
