/**
 * Application State Management
 *
 * This module defines the application state and the `FromRef`
 * implementations that let handlers extract only the piece they need.
 *
 * # Thread Safety
 *
 * Every field is cheap to clone and `Send + Sync`: the SQLite pool is
 * internally reference-counted and the issuer shares its clock through an
 * `Arc`. There is no other shared mutable state between requests.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::clock::{Clock, SystemClock};
use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::auth::users::CredentialStore;
use crate::backend::middleware::AccessGate;

/// Central state container shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db_pool: SqlitePool,
    /// Identity creation and verification
    pub credentials: CredentialStore,
    /// Bearer token minting and verification
    pub tokens: TokenIssuer,
}

impl AppState {
    /// Build state for production use
    pub fn new(db_pool: SqlitePool, jwt_secret: &[u8]) -> Self {
        Self::with_parts(
            CredentialStore::new(db_pool.clone()),
            TokenIssuer::new(jwt_secret, Arc::new(SystemClock)),
        )
    }

    /// Build state with an injected clock and bcrypt cost
    pub fn with_clock(
        db_pool: SqlitePool,
        jwt_secret: &[u8],
        clock: Arc<dyn Clock>,
        hash_cost: u32,
    ) -> Self {
        Self::with_parts(
            CredentialStore::with_hash_cost(db_pool, hash_cost),
            TokenIssuer::new(jwt_secret, clock),
        )
    }

    fn with_parts(credentials: CredentialStore, tokens: TokenIssuer) -> Self {
        Self {
            db_pool: credentials.pool().clone(),
            credentials,
            tokens,
        }
    }

    /// Access gate over this state's store and issuer
    pub fn gate(&self) -> AccessGate {
        AccessGate::new(self.credentials.clone(), self.tokens.clone())
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for CredentialStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.credentials.clone()
    }
}

impl FromRef<AppState> for TokenIssuer {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}
