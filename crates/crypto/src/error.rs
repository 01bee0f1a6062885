//! Crypto error types.
//!
//! Messages never include key material or plaintext.

/// Errors produced by key derivation and the envelope cipher.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    /// The salt is not valid base64.
    #[error("invalid salt encoding: {0}")]
    Salt(#[from] base64::DecodeError),

    /// Argon2 rejected its inputs or parameters.
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// The key does not match the cipher's required size.
    #[error("invalid key size")]
    InvalidKeySize,

    /// The blob is too short to contain a nonce and an authentication tag.
    #[error("encrypted blob too short")]
    BlobTooShort,

    /// AEAD tag check failed: tampered ciphertext, tampered nonce, or wrong key.
    #[error("authentication failed")]
    AuthenticationFailed,
}
