/**
 * Login Handler
 *
 * This module implements the user authentication handler for
 * POST /api/auth/login.
 *
 * # Security
 *
 * - Passwords are verified using bcrypt (constant-time comparison)
 * - Unknown names and wrong passwords produce the same 401 response
 * - Passwords are never logged or returned in responses
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, CredentialsRequest};
use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::auth::users::CredentialStore;
use crate::backend::error::BackendError;

/// Login handler
///
/// Verifies the name and password and returns a fresh bearer token.
///
/// # Errors
///
/// * `401 Unauthorized` - "Invalid name or password"
/// * `500 Internal Server Error` - storage, hashing or signing failure
pub async fn login(
    State(credentials): State<CredentialStore>,
    State(tokens): State<TokenIssuer>,
    Json(request): Json<CredentialsRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    tracing::info!("Login request for name: {}", request.name());

    let identity = credentials
        .verify(request.name(), request.password())
        .await
        .inspect_err(|e| tracing::warn!("Login for '{}' failed: {}", request.name(), e))?;

    let token = tokens.issue(identity.id)?;

    Ok(Json(AuthResponse {
        id: identity.id,
        name: identity.name,
        token,
    }))
}
