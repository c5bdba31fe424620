//! Raw AES-128-CBC decryption shared by both payload decryptors.

use aes::Aes128;
use aes::cipher::block_padding::NoPadding;
use aes::cipher::{BlockDecryptMut, KeyIvInit};

use crate::error::AppError;

type Aes128CbcDec = cbc::Decryptor<Aes128>;

/// AES block size in bytes; both formats use 128-bit keys and IVs too.
pub const BLOCK_SIZE: usize = 16;

/// Decrypts `data` with AES-128-CBC without removing any padding.
///
/// Both payload formats pad with NUL bytes and strip them as *text* after
/// decoding, so the cipher layer never unpads. The ciphertext must be a
/// multiple of the block size and key/IV must be exactly 16 bytes.
pub fn aes128_cbc_decrypt(data: &[u8], key: &[u8], iv: &[u8]) -> Result<Vec<u8>, AppError> {
    if key.len() != BLOCK_SIZE {
        return Err(AppError::decryption(format!(
            "cipher key must be {BLOCK_SIZE} bytes, got {}",
            key.len()
        )));
    }
    if iv.len() != BLOCK_SIZE {
        return Err(AppError::decryption(format!(
            "cipher iv must be {BLOCK_SIZE} bytes, got {}",
            iv.len()
        )));
    }
    if data.len() % BLOCK_SIZE != 0 {
        return Err(AppError::decryption(format!(
            "ciphertext length {} is not a multiple of the cipher block size",
            data.len()
        )));
    }

    let mut buf = data.to_vec();
    let decryptor = Aes128CbcDec::new_from_slices(key, iv)
        .map_err(|e| AppError::decryption(format!("invalid key or iv: {e}")))?;
    decryptor
        .decrypt_padded_mut::<NoPadding>(&mut buf)
        .map_err(|_| AppError::decryption("block decryption failed"))?;

    Ok(buf)
}
