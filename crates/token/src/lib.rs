//! Signed, expiring identity tokens.
//!
//! Tokens are stateless HS256 JWTs carrying a tenant id plus the usual
//! time-box claims. There is no server-side session store and no
//! revocation: once issued, a token is valid until its expiry, and expiry
//! is a hard boundary — re-login is the only renewal.
//!
//! The signing secret is injected at construction so verification stays
//! side-effect-free and testable in isolation.

use {
    chrono::{Duration, Utc},
    jsonwebtoken::{
        Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
        errors::ErrorKind,
    },
    serde::{Deserialize, Serialize},
    uuid::Uuid,
};

/// Token lifetime: three hours from issue.
const TOKEN_TTL_SECS: i64 = 3 * 60 * 60;

/// Errors produced while issuing or verifying tokens.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// The service was constructed without a signing secret.
    #[error("empty signing key")]
    EmptySigningKey,

    /// The token cannot be parsed as a JWT.
    #[error("malformed token")]
    Malformed,

    /// The signature does not match the signing secret.
    #[error("invalid token signature")]
    InvalidSignature,

    /// The token's expiry has passed (or its not-before has not arrived).
    #[error("token expired")]
    Expired,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Tenant id, as a UUID string.
    sub: String,
    iat: i64,
    nbf: i64,
    exp: i64,
}

/// Issues and verifies the signed identity tokens that gate every RPC.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    /// Create a service signing with `secret`.
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySigningKey);
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(TOKEN_TTL_SECS),
        })
    }

    /// Override the token lifetime. Tests use this to mint already-expired
    /// tokens; production code keeps the default.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Issue a token for `tenant_id`, valid from now until now + TTL.
    pub fn issue(&self, tenant_id: Uuid) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: tenant_id.to_string(),
            iat: now,
            nbf: now,
            exp: now + self.ttl.num_seconds(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| TokenError::Malformed)
    }

    /// Verify `token` and return the tenant id it was issued for.
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_nbf = true;

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature | ErrorKind::ImmatureSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            }
        })?;

        Uuid::parse_str(&data.claims.sub).map_err(|_| TokenError::Malformed)
    }
}
