//! Shared helpers for the decryption paths.
//!
//! - [`aes`] - raw AES-128-CBC block decryption
//! - [`encoding`] - byte-to-text decoding with Latin-1 fallback

pub mod aes;
pub mod encoding;
