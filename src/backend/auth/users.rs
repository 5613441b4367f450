/**
 * Identity Model and Credential Store
 *
 * This module owns identity records: creation at registration, password
 * verification at login, and lookup by id for the access gate.
 *
 * # Security
 *
 * - Passwords are hashed with bcrypt (cost 10) before they touch storage
 * - Passwords past bcrypt's 72-byte input limit are rejected, never
 *   silently truncated
 * - Hashing happens only on paths that set a password (`register`,
 *   `update_password`); renaming never re-hashes
 * - bcrypt runs on the blocking pool so it never stalls other requests
 * - Lookups used by the access gate never select the hash column
 */

use bcrypt::BcryptError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::error::BackendError;

/// bcrypt work factor for stored passwords
pub const PASSWORD_HASH_COST: u32 = 10;

/// Message returned when registration input is unusable
pub const INVALID_USER_DATA: &str = "Invalid user data";

/// A registered user, as exposed to handlers and downstream code
///
/// Never carries the password hash.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Unique identity id, assigned once at creation
    pub id: Uuid,
    /// Display name (unique, case-sensitive)
    pub name: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct IdentityRow {
    id: String,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct CredentialRow {
    #[sqlx(flatten)]
    identity: IdentityRow,
    password_hash: String,
}

impl TryFrom<IdentityRow> for Identity {
    type Error = BackendError;

    fn try_from(row: IdentityRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| BackendError::internal(format!("Corrupt identity id {}: {}", row.id, e)))?;

        Ok(Self {
            id,
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Creates and verifies identities against the `users` table
#[derive(Debug, Clone)]
pub struct CredentialStore {
    pool: SqlitePool,
    hash_cost: u32,
}

impl CredentialStore {
    /// Create a store hashing with the production cost factor
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_hash_cost(pool, PASSWORD_HASH_COST)
    }

    /// Create a store with a custom bcrypt cost (tests use the minimum)
    pub fn with_hash_cost(pool: SqlitePool, hash_cost: u32) -> Self {
        Self { pool, hash_cost }
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Register a new identity
    ///
    /// # Arguments
    /// * `name` - Unique display name
    /// * `password` - Plaintext password (hashed before storage)
    ///
    /// # Returns
    /// The created identity, or `DuplicateIdentity` if the name is taken.
    /// The `UNIQUE` constraint on `users.name` settles concurrent
    /// registrations that both pass the existence check.
    pub async fn register(&self, name: &str, password: &str) -> Result<Identity, BackendError> {
        if name.is_empty() || password.is_empty() {
            return Err(BackendError::validation(INVALID_USER_DATA));
        }

        if self.find_credentials_by_name(name).await?.is_some() {
            return Err(BackendError::DuplicateIdentity);
        }

        let password_hash = self.hash_password(password).await?;
        let id = Uuid::new_v4();
        let now = Utc::now();

        let inserted = sqlx::query_as::<_, IdentityRow>(
            r#"
            INSERT INTO users (id, name, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(id.to_string())
        .bind(name)
        .bind(&password_hash)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(row) => row.try_into(),
            Err(e) if is_unique_violation(&e) => Err(BackendError::DuplicateIdentity),
            Err(e) => Err(e.into()),
        }
    }

    /// Check a name/password pair
    ///
    /// # Returns
    /// The matching identity, or `InvalidCredentials` whether the name is
    /// unknown or the password is wrong. Performs no writes.
    pub async fn verify(&self, name: &str, password: &str) -> Result<Identity, BackendError> {
        let Some(row) = self.find_credentials_by_name(name).await? else {
            return Err(BackendError::InvalidCredentials);
        };

        if !self.check_password(password, &row.password_hash).await? {
            return Err(BackendError::InvalidCredentials);
        }

        row.identity.try_into()
    }

    /// Look up an identity by id, without its password hash
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Identity>, BackendError> {
        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Identity::try_from).transpose()
    }

    /// Replace an identity's password
    ///
    /// # Returns
    /// The updated identity, or `None` if no identity has this id
    pub async fn update_password(
        &self,
        id: Uuid,
        password: &str,
    ) -> Result<Option<Identity>, BackendError> {
        if password.is_empty() {
            return Err(BackendError::validation(INVALID_USER_DATA));
        }

        let password_hash = self.hash_password(password).await?;

        let row = sqlx::query_as::<_, IdentityRow>(
            r#"
            UPDATE users
            SET password_hash = ?, updated_at = ?
            WHERE id = ?
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(&password_hash)
        .bind(Utc::now())
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Identity::try_from).transpose()
    }

    /// Change an identity's name, leaving the stored hash untouched
    pub async fn rename(&self, id: Uuid, name: &str) -> Result<Option<Identity>, BackendError> {
        if name.is_empty() {
            return Err(BackendError::validation(INVALID_USER_DATA));
        }

        let updated = sqlx::query_as::<_, IdentityRow>(
            r#"
            UPDATE users
            SET name = ?, updated_at = ?
            WHERE id = ?
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(Utc::now())
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await;

        match updated {
            Ok(row) => row.map(Identity::try_from).transpose(),
            Err(e) if is_unique_violation(&e) => Err(BackendError::DuplicateIdentity),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_credentials_by_name(&self, name: &str) -> Result<Option<CredentialRow>, BackendError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT id, name, password_hash, created_at, updated_at
            FROM users
            WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn hash_password(&self, password: &str) -> Result<String, BackendError> {
        let password = password.to_owned();
        let cost = self.hash_cost;

        let hashed = tokio::task::spawn_blocking(move || bcrypt::non_truncating_hash(password, cost))
            .await
            .map_err(|e| BackendError::internal(format!("Hashing task failed: {}", e)))?;

        match hashed {
            Ok(hash) => Ok(hash),
            Err(BcryptError::Truncation(len)) => {
                tracing::warn!("Rejected {}-byte password over the bcrypt limit", len);
                Err(BackendError::validation(INVALID_USER_DATA))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn check_password(&self, password: &str, password_hash: &str) -> Result<bool, BackendError> {
        let password = password.to_owned();
        let password_hash = password_hash.to_owned();

        let matches =
            tokio::task::spawn_blocking(move || bcrypt::non_truncating_verify(password, &password_hash))
                .await
                .map_err(|e| BackendError::internal(format!("Hashing task failed: {}", e)))?;

        // No stored hash can come from a password past the bcrypt limit.
        match matches {
            Ok(matches) => Ok(matches),
            Err(BcryptError::Truncation(_)) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db) if db.is_unique_violation())
}
