//! Wire types shared by the vault client and server.
//!
//! Secret content travels base64-encoded inside JSON bodies; the server
//! treats it as opaque bytes and the kind tag as an opaque string, so the
//! codec stays entirely client-side.

use {
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    uuid::Uuid,
};

/// Login/password pair for `register` and `login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub login: String,
    pub password: String,
}

/// Successful register/login response: the bearer token plus the tenant's
/// key-derivation salt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub salt: String,
}

/// Secret record metadata. Never carries content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretMeta {
    pub id: Uuid,
    pub name: String,
    pub kind: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Body for add/edit: display name, type tag, and encrypted content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretPayload {
    pub name: String,
    pub kind: String,
    /// Base64-encoded encrypted blob.
    pub content: String,
}

/// A full secret record: metadata plus encrypted content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretContent {
    #[serde(flatten)]
    pub meta: SecretMeta,
    /// Base64-encoded encrypted blob.
    pub content: String,
}

/// Error body returned by the server for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

/// Encode an encrypted blob for transport.
pub fn encode_content(blob: &[u8]) -> String {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode(blob)
}

/// Decode transported content back into blob bytes.
pub fn decode_content(b64: &str) -> Result<Vec<u8>, base64::DecodeError> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.decode(b64)
}
