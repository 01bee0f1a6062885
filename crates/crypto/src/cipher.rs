//! XChaCha20-Poly1305 envelope cipher.
//!
//! Encrypted blob layout: `[nonce: 24 bytes][ciphertext + Poly1305 tag: N + 16 bytes]`.

#[allow(deprecated)] // upstream generic-array 0.x deprecation
use chacha20poly1305::{
    XChaCha20Poly1305, XNonce,
    aead::{Aead, KeyInit},
};
use rand::RngCore;

use crate::error::CryptoError;

/// Required key length in bytes.
pub const KEY_LEN: usize = 32;

/// Nonce size for XChaCha20-Poly1305 (24 bytes).
const NONCE_LEN: usize = 24;

/// Poly1305 tag size.
const TAG_LEN: usize = 16;

/// Encrypt `plaintext` under `key`, prefixing a fresh random nonce.
///
/// A new nonce is drawn on every call; the same nonce is never reused under
/// a given key. Fails with [`CryptoError::InvalidKeySize`] unless the key is
/// exactly 32 bytes.
#[allow(deprecated)]
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let cipher = XChaCha20Poly1305::new_from_slice(key).map_err(|_| CryptoError::InvalidKeySize)?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    rand::rng().fill_bytes(&mut nonce_bytes);
    let nonce = XNonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| CryptoError::AuthenticationFailed)?;

    let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);
    Ok(blob)
}

/// Decrypt a blob previously produced by [`encrypt`].
///
/// Fails with [`CryptoError::AuthenticationFailed`] on any tag mismatch
/// (tampered nonce, tampered ciphertext, or wrong key) without releasing
/// partial plaintext.
#[allow(deprecated)]
pub fn decrypt(key: &[u8], blob: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if blob.len() < NONCE_LEN + TAG_LEN {
        return Err(CryptoError::BlobTooShort);
    }

    let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);
    let nonce = XNonce::from_slice(nonce_bytes);
    let cipher = XChaCha20Poly1305::new_from_slice(key).map_err(|_| CryptoError::InvalidKeySize)?;

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| CryptoError::AuthenticationFailed)
}
