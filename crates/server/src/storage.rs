//! Storage collaborator interfaces.
//!
//! Tenant isolation is a storage contract: every secret query is scoped by
//! the owning tenant id inside the query itself. A record owned by another
//! tenant is indistinguishable from an absent one.

use {
    async_trait::async_trait,
    chrono::{DateTime, Utc},
    uuid::Uuid,
};

/// Distinguishable storage outcomes.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("already exists")]
    AlreadyExists,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("storage error: {0}")]
    Internal(String),
}

/// A registered user row.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    /// Base64-encoded key-derivation salt issued at registration.
    pub salt: String,
}

/// Secret record metadata — everything but the content blob.
#[derive(Debug, Clone)]
pub struct SecretMetaRecord {
    pub id: Uuid,
    pub name: String,
    pub kind: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// A full secret record.
#[derive(Debug, Clone)]
pub struct SecretRecord {
    pub meta: SecretMetaRecord,
    /// Encrypted content blob; opaque to the server.
    pub content: Vec<u8>,
}

/// Fields for a new or edited secret.
#[derive(Debug, Clone)]
pub struct NewSecret {
    pub name: String,
    pub kind: String,
    pub content: Vec<u8>,
}

/// User registration and login verification.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Add a user. `AlreadyExists` on a duplicate login.
    async fn register(
        &self,
        login: &str,
        password: &str,
        salt: &str,
    ) -> Result<Uuid, StorageError>;

    /// Look up a user by login and verify the password against the stored
    /// hash. `NotFound` covers both unknown login and wrong password.
    async fn verify_login(&self, login: &str, password: &str) -> Result<UserRecord, StorageError>;
}

/// Per-tenant secret record CRUD.
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// `AlreadyExists` when the tenant already has a secret with this name.
    async fn add(&self, tenant: Uuid, secret: NewSecret) -> Result<SecretMetaRecord, StorageError>;

    async fn get(&self, tenant: Uuid, id: Uuid) -> Result<SecretRecord, StorageError>;

    /// Deleting an absent record is `NotFound`, not a no-op.
    async fn delete(&self, tenant: Uuid, id: Uuid) -> Result<(), StorageError>;

    /// Metadata for all of the tenant's records, ordered by name.
    async fn list(&self, tenant: Uuid) -> Result<Vec<SecretMetaRecord>, StorageError>;

    async fn update(
        &self,
        tenant: Uuid,
        id: Uuid,
        secret: NewSecret,
    ) -> Result<SecretMetaRecord, StorageError>;
}
