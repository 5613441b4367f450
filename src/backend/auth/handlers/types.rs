/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by the
 * register, login and me handlers.
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Register and login request
///
/// Missing and `null` fields both deserialize as `None` so that they reach
/// the credential store's validation instead of failing JSON extraction.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct CredentialsRequest {
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    /// Plaintext password (hashed before storage, never logged)
    #[serde(default)]
    pub password: Option<String>,
}

impl CredentialsRequest {
    /// Name as sent, or empty if absent
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Password as sent, or empty if absent
    pub fn password(&self) -> &str {
        self.password.as_deref().unwrap_or_default()
    }
}

/// Auth response
///
/// Returned by register and login. Carries the bearer token for
/// immediate use.
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    /// Identity id
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Bearer token (30-day expiration)
    pub token: String,
}
