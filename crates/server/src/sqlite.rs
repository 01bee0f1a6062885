//! SQLite-backed implementation of the storage collaborators.
//!
//! Tables are created on construction. Conflicting writes serialize through
//! SQLite's own transactional guarantees; nothing here takes extra locks.

use {
    argon2::{
        Argon2,
        password_hash::{
            PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
        },
    },
    async_trait::async_trait,
    chrono::{DateTime, Utc},
    sqlx::SqlitePool,
    uuid::Uuid,
};

use crate::storage::{
    NewSecret, SecretMetaRecord, SecretRecord, SecretStore, StorageError, UserRecord, UserStore,
};

/// User and secret stores over a shared SQLite pool.
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Create the storage and initialize tables.
    pub async fn new(pool: SqlitePool) -> Result<Self, StorageError> {
        let storage = Self { pool };
        storage.init().await?;
        Ok(storage)
    }

    async fn init(&self) -> Result<(), StorageError> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                login TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                salt TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS secrets (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id),
                name TEXT NOT NULL,
                kind TEXT NOT NULL,
                content BLOB NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE(user_id, name)
            )",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl UserStore for SqliteStorage {
    async fn register(
        &self,
        login: &str,
        password: &str,
        salt: &str,
    ) -> Result<Uuid, StorageError> {
        let id = Uuid::new_v4();
        let hash = hash_password(password)?;

        sqlx::query("INSERT INTO users (id, login, password_hash, salt, created_at) VALUES (?1, ?2, ?3, ?4, ?5)")
            .bind(id.to_string())
            .bind(login)
            .bind(hash)
            .bind(salt)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(map_unique_violation)?;

        Ok(id)
    }

    async fn verify_login(&self, login: &str, password: &str) -> Result<UserRecord, StorageError> {
        let row: Option<(String, String, String)> =
            sqlx::query_as("SELECT id, password_hash, salt FROM users WHERE login = ?1")
                .bind(login)
                .fetch_optional(&self.pool)
                .await?;

        let Some((id, hash, salt)) = row else {
            return Err(StorageError::NotFound);
        };
        if !verify_password(password, &hash) {
            return Err(StorageError::NotFound);
        }

        Ok(UserRecord {
            id: parse_uuid(&id)?,
            salt,
        })
    }
}

#[async_trait]
impl SecretStore for SqliteStorage {
    async fn add(&self, tenant: Uuid, secret: NewSecret) -> Result<SecretMetaRecord, StorageError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO secrets (id, user_id, name, kind, content, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .bind(id.to_string())
        .bind(tenant.to_string())
        .bind(&secret.name)
        .bind(&secret.kind)
        .bind(&secret.content)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(SecretMetaRecord {
            id,
            name: secret.name,
            kind: secret.kind,
            created: now,
            updated: now,
        })
    }

    async fn get(&self, tenant: Uuid, id: Uuid) -> Result<SecretRecord, StorageError> {
        let row: Option<(String, String, String, Vec<u8>, String, String)> = sqlx::query_as(
            "SELECT id, name, kind, content, created_at, updated_at FROM secrets
             WHERE id = ?1 AND user_id = ?2",
        )
        .bind(id.to_string())
        .bind(tenant.to_string())
        .fetch_optional(&self.pool)
        .await?;

        let Some((id, name, kind, content, created, updated)) = row else {
            return Err(StorageError::NotFound);
        };
        Ok(SecretRecord {
            meta: parse_meta(&id, name, kind, &created, &updated)?,
            content,
        })
    }

    async fn delete(&self, tenant: Uuid, id: Uuid) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM secrets WHERE id = ?1 AND user_id = ?2")
            .bind(id.to_string())
            .bind(tenant.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }

    async fn list(&self, tenant: Uuid) -> Result<Vec<SecretMetaRecord>, StorageError> {
        let rows: Vec<(String, String, String, String, String)> = sqlx::query_as(
            "SELECT id, name, kind, created_at, updated_at FROM secrets
             WHERE user_id = ?1 ORDER BY name",
        )
        .bind(tenant.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(id, name, kind, created, updated)| parse_meta(&id, name, kind, &created, &updated))
            .collect()
    }

    async fn update(
        &self,
        tenant: Uuid,
        id: Uuid,
        secret: NewSecret,
    ) -> Result<SecretMetaRecord, StorageError> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE secrets SET name = ?1, kind = ?2, content = ?3, updated_at = ?4
             WHERE id = ?5 AND user_id = ?6",
        )
        .bind(&secret.name)
        .bind(&secret.kind)
        .bind(&secret.content)
        .bind(now.to_rfc3339())
        .bind(id.to_string())
        .bind(tenant.to_string())
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        let record = self.get(tenant, id).await?;
        Ok(record.meta)
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn map_unique_violation(err: sqlx::Error) -> StorageError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StorageError::AlreadyExists,
        _ => StorageError::Database(err),
    }
}

fn hash_password(password: &str) -> Result<String, StorageError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| StorageError::Internal(format!("password hashing failed: {e}")))
}

fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

fn parse_uuid(s: &str) -> Result<Uuid, StorageError> {
    Uuid::parse_str(s).map_err(|e| StorageError::Internal(format!("invalid stored uuid: {e}")))
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::Internal(format!("invalid stored timestamp: {e}")))
}

fn parse_meta(
    id: &str,
    name: String,
    kind: String,
    created: &str,
    updated: &str,
) -> Result<SecretMetaRecord, StorageError> {
    Ok(SecretMetaRecord {
        id: parse_uuid(id)?,
        name,
        kind,
        created: parse_timestamp(created)?,
        updated: parse_timestamp(updated)?,
    })
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    async fn storage() -> SqliteStorage {
        // One connection: every pooled connection to `sqlite::memory:`
        // would otherwise open its own empty database.
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        SqliteStorage::new(pool).await.unwrap()
    }

    fn new_secret(name: &str) -> NewSecret {
        NewSecret {
            name: name.into(),
            kind: "text".into(),
            content: vec![1, 2, 3],
        }
    }

    #[tokio::test]
    async fn register_and_verify_login() {
        let storage = storage().await;
        let id = storage.register("alice", "pw1", "salt-a").await.unwrap();

        let user = storage.verify_login("alice", "pw1").await.unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.salt, "salt-a");
    }

    #[tokio::test]
    async fn wrong_password_is_not_found() {
        let storage = storage().await;
        storage.register("alice", "pw1", "salt-a").await.unwrap();

        let result = storage.verify_login("alice", "wrong").await;
        assert!(matches!(result, Err(StorageError::NotFound)));
    }

    #[tokio::test]
    async fn unknown_login_is_not_found() {
        let storage = storage().await;
        let result = storage.verify_login("nobody", "pw").await;
        assert!(matches!(result, Err(StorageError::NotFound)));
    }

    #[tokio::test]
    async fn duplicate_login_is_rejected() {
        let storage = storage().await;
        storage.register("alice", "pw1", "salt-a").await.unwrap();

        let result = storage.register("alice", "pw2", "salt-b").await;
        assert!(matches!(result, Err(StorageError::AlreadyExists)));
    }

    #[tokio::test]
    async fn add_get_round_trip() {
        let storage = storage().await;
        let tenant = storage.register("alice", "pw", "s").await.unwrap();

        let meta = storage.add(tenant, new_secret("email")).await.unwrap();
        let record = storage.get(tenant, meta.id).await.unwrap();

        assert_eq!(record.meta.name, "email");
        assert_eq!(record.meta.kind, "text");
        assert_eq!(record.content, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn duplicate_name_per_tenant_is_rejected() {
        let storage = storage().await;
        let tenant = storage.register("alice", "pw", "s").await.unwrap();

        storage.add(tenant, new_secret("email")).await.unwrap();
        let result = storage.add(tenant, new_secret("email")).await;
        assert!(matches!(result, Err(StorageError::AlreadyExists)));
    }

    #[tokio::test]
    async fn same_name_across_tenants_is_fine() {
        let storage = storage().await;
        let a = storage.register("alice", "pw", "s").await.unwrap();
        let b = storage.register("bob", "pw", "s").await.unwrap();

        storage.add(a, new_secret("email")).await.unwrap();
        storage.add(b, new_secret("email")).await.unwrap();
    }

    #[tokio::test]
    async fn cross_tenant_get_is_not_found() {
        let storage = storage().await;
        let a = storage.register("alice", "pw", "s").await.unwrap();
        let b = storage.register("bob", "pw", "s").await.unwrap();

        let meta = storage.add(a, new_secret("email")).await.unwrap();
        let result = storage.get(b, meta.id).await;
        assert!(matches!(result, Err(StorageError::NotFound)));
    }

    #[tokio::test]
    async fn delete_twice_is_not_found() {
        let storage = storage().await;
        let tenant = storage.register("alice", "pw", "s").await.unwrap();
        let meta = storage.add(tenant, new_secret("email")).await.unwrap();

        storage.delete(tenant, meta.id).await.unwrap();
        let result = storage.delete(tenant, meta.id).await;
        assert!(matches!(result, Err(StorageError::NotFound)));
    }

    #[tokio::test]
    async fn list_is_ordered_by_name() {
        let storage = storage().await;
        let tenant = storage.register("alice", "pw", "s").await.unwrap();

        storage.add(tenant, new_secret("zeta")).await.unwrap();
        storage.add(tenant, new_secret("alpha")).await.unwrap();
        storage.add(tenant, new_secret("mid")).await.unwrap();

        let names: Vec<String> = storage
            .list(tenant)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, ["alpha", "mid", "zeta"]);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_bumps_updated() {
        let storage = storage().await;
        let tenant = storage.register("alice", "pw", "s").await.unwrap();
        let meta = storage.add(tenant, new_secret("email")).await.unwrap();

        let updated = storage
            .update(tenant, meta.id, NewSecret {
                name: "mail".into(),
                kind: "password".into(),
                content: vec![9, 9],
            })
            .await
            .unwrap();

        assert_eq!(updated.name, "mail");
        assert_eq!(updated.kind, "password");
        assert!(updated.updated >= meta.updated);

        let record = storage.get(tenant, meta.id).await.unwrap();
        assert_eq!(record.content, vec![9, 9]);
    }

    #[tokio::test]
    async fn update_missing_record_is_not_found() {
        let storage = storage().await;
        let tenant = storage.register("alice", "pw", "s").await.unwrap();

        let result = storage.update(tenant, Uuid::new_v4(), new_secret("x")).await;
        assert!(matches!(result, Err(StorageError::NotFound)));
    }
}
