//! Argon2id key derivation for master password → content key.

use {argon2::Argon2, zeroize::Zeroizing};

use crate::error::CryptoError;

/// Length of a generated salt in raw bytes (before base64 encoding).
pub const SALT_LEN: usize = 16;

// Fixed Argon2id cost parameters. Every client must use the same values or
// the same (password, salt) pair would derive different keys.
const M_COST: u32 = 65536; // 64 MiB
const T_COST: u32 = 3;
const P_COST: u32 = 1;

/// Derive the 256-bit content key from a master password and a
/// base64-encoded salt using Argon2id.
///
/// Deterministic: identical inputs always produce the identical key.
pub fn derive_key(password: &str, salt_b64: &str) -> Result<Zeroizing<[u8; 32]>, CryptoError> {
    let salt = decode_salt(salt_b64)?;

    let params = argon2::Params::new(M_COST, T_COST, P_COST, Some(32))
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;
    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let mut key = Zeroizing::new([0u8; 32]);
    argon2
        .hash_password_into(password.as_bytes(), &salt, key.as_mut())
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;

    Ok(key)
}

/// Generate a random 16-byte salt and return it base64-encoded.
///
/// The salt is not secret; it is issued to the client at registration and
/// echoed back at login as key-derivation input.
pub fn generate_salt() -> String {
    use {base64::Engine, rand::RngCore};

    let mut salt = [0u8; SALT_LEN];
    rand::rng().fill_bytes(&mut salt);
    base64::engine::general_purpose::STANDARD.encode(salt)
}

/// Decode a base64-encoded salt.
pub fn decode_salt(b64: &str) -> Result<Vec<u8>, CryptoError> {
    use base64::Engine;
    Ok(base64::engine::general_purpose::STANDARD.decode(b64)?)
}
