//! Typed RPC client for the lockbox server.
//!
//! The client is transport-only: it ships encrypted blobs and metadata and
//! never derives keys or touches plaintext itself. Sealing and opening
//! happen in `lockbox-secrets` with a key the caller derives from the
//! user's master password — supplied by the real authentication flow, never
//! a constant.
//!
//! Calls carry a bounded timeout and are never retried automatically; a
//! timed-out call surfaces as an error for the caller to reissue.

pub mod settings;

use std::time::Duration;

use {
    lockbox_protocol::{
        AuthResponse, Credentials, ErrorBody, SecretContent, SecretMeta, SecretPayload,
        decode_content, encode_content,
    },
    reqwest::{StatusCode, Url},
    uuid::Uuid,
};

pub use settings::Settings;

/// Client-side error taxonomy, mapped from response status codes.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Missing, invalid, or expired token; or bad login credentials.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("not found")]
    NotFound,

    #[error("already exists")]
    AlreadyExists,

    /// The server rejected the request shape.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Any other server-side failure.
    #[error("server error: {0}")]
    Server(String),

    /// The response body was not what the protocol promises.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Connection failure or timeout.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// HTTP client for the vault RPC surface.
#[derive(Clone)]
pub struct VaultClient {
    base_url: Url,
    http: reqwest::Client,
    token: Option<String>,
    timeout: Duration,
}

impl VaultClient {
    /// Build a client against the given base URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url.as_ref())
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
            token: None,
            timeout: Duration::from_secs(10),
        })
    }

    /// Build a client from persisted settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, ClientError> {
        Ok(Self::new(settings.base_url())?.with_timeout(settings.timeout()))
    }

    /// Override the per-request timeout (default 10 seconds).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Attach a previously issued bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Register a new tenant. On success the issued token is attached to
    /// this client and the response (token + salt) is returned so the
    /// caller can derive its content key.
    pub async fn register(
        &mut self,
        login: &str,
        password: &str,
    ) -> Result<AuthResponse, ClientError> {
        self.authenticate("register", login, password).await
    }

    /// Log an existing tenant in. Same contract as [`register`](Self::register).
    pub async fn login(&mut self, login: &str, password: &str) -> Result<AuthResponse, ClientError> {
        self.authenticate("login", login, password).await
    }

    async fn authenticate(
        &mut self,
        method: &str,
        login: &str,
        password: &str,
    ) -> Result<AuthResponse, ClientError> {
        let url = self.endpoint(&format!("api/auth/{method}"))?;
        let response = self
            .http
            .post(url)
            .timeout(self.timeout)
            .json(&Credentials {
                login: login.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;
        let auth: AuthResponse = ensure_success(response).await?.json().await?;
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    /// Store a new encrypted secret; returns its metadata.
    pub async fn add_secret(
        &self,
        name: &str,
        kind: &str,
        blob: &[u8],
    ) -> Result<SecretMeta, ClientError> {
        let url = self.endpoint("api/secrets")?;
        let builder = self.http.post(url).timeout(self.timeout).json(&SecretPayload {
            name: name.to_string(),
            kind: kind.to_string(),
            content: encode_content(blob),
        });
        let response = ensure_success(self.apply_auth(builder).send().await?).await?;
        Ok(response.json().await?)
    }

    /// Fetch one secret: metadata plus the encrypted blob.
    pub async fn get_secret(&self, id: Uuid) -> Result<(SecretMeta, Vec<u8>), ClientError> {
        let url = self.endpoint(&format!("api/secrets/{id}"))?;
        let builder = self.http.get(url).timeout(self.timeout);
        let response = ensure_success(self.apply_auth(builder).send().await?).await?;
        let payload: SecretContent = response.json().await?;
        let blob = decode_content(&payload.content)
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        Ok((payload.meta, blob))
    }

    /// Delete one secret. Deleting it again is an error.
    pub async fn delete_secret(&self, id: Uuid) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("api/secrets/{id}"))?;
        let builder = self.http.delete(url).timeout(self.timeout);
        ensure_success(self.apply_auth(builder).send().await?).await?;
        Ok(())
    }

    /// List metadata for all of the tenant's secrets, ordered by name.
    /// Content is never included.
    pub async fn list_secrets(&self) -> Result<Vec<SecretMeta>, ClientError> {
        let url = self.endpoint("api/secrets")?;
        let builder = self.http.get(url).timeout(self.timeout);
        let response = ensure_success(self.apply_auth(builder).send().await?).await?;
        Ok(response.json().await?)
    }

    /// Replace a secret's name, kind, and encrypted content.
    pub async fn edit_secret(
        &self,
        id: Uuid,
        name: &str,
        kind: &str,
        blob: &[u8],
    ) -> Result<SecretMeta, ClientError> {
        let url = self.endpoint(&format!("api/secrets/{id}"))?;
        let builder = self.http.put(url).timeout(self.timeout).json(&SecretPayload {
            name: name.to_string(),
            kind: kind.to_string(),
            content: encode_content(blob),
        });
        let response = ensure_success(self.apply_auth(builder).send().await?).await?;
        Ok(response.json().await?)
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    fn apply_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.header("authorization", format!("bearer {token}")),
            None => builder,
        }
    }
}

/// Map a non-success response into the client error taxonomy.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .map(|body| body.message)
        .unwrap_or_else(|_| status.to_string());

    Err(match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthenticated(message),
        StatusCode::NOT_FOUND => ClientError::NotFound,
        StatusCode::CONFLICT => ClientError::AlreadyExists,
        StatusCode::BAD_REQUEST => ClientError::BadRequest(message),
        _ => ClientError::Server(message),
    })
}
