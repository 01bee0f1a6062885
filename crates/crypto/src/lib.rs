//! Client-side envelope encryption for vault content.
//!
//! A 256-bit content key is derived from the user's master password and a
//! per-tenant random salt via Argon2id. Secrets are sealed with
//! XChaCha20-Poly1305 so the server only ever stores opaque authenticated
//! ciphertext. The key lives in client memory for one session and is never
//! persisted or transmitted.

pub mod cipher;
pub mod error;
pub mod kdf;

pub use {
    cipher::{KEY_LEN, decrypt, encrypt},
    error::CryptoError,
    kdf::{SALT_LEN, decode_salt, derive_key, generate_salt},
};
