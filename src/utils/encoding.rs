//! Byte-to-text decoding for decrypted payloads.

/// Decodes bytes as UTF-8, falling back to Latin-1 when invalid.
///
/// Latin-1 maps every byte to the code point of the same value, so the
/// fallback accepts any byte sequence and never fails.
pub fn utf8_or_latin1(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
