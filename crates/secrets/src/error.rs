//! Codec error types.

use lockbox_crypto::CryptoError;

/// Errors produced while sealing or opening a secret.
#[derive(Debug, thiserror::Error)]
pub enum SecretError {
    /// Envelope encryption or decryption failed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Decrypted bytes do not match the shape the type tag promises.
    #[error("malformed secret payload")]
    MalformedPayload,

    /// The type tag names no known secret variant.
    #[error("unknown secret type: {0}")]
    UnknownKind(String),
}
