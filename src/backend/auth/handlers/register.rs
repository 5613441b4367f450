/**
 * Register Handler
 *
 * This module implements the user registration handler for
 * POST /api/auth/register.
 *
 * # Registration Process
 *
 * 1. Reject empty name or password
 * 2. Check that the name is not taken
 * 3. Hash the password with bcrypt and store the identity
 * 4. Issue a bearer token
 * 5. Return 201 with id, name and token
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::{AuthResponse, CredentialsRequest};
use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::auth::users::CredentialStore;
use crate::backend::error::BackendError;

/// Register handler
///
/// # Arguments
///
/// * `State(credentials)` - Credential store
/// * `State(tokens)` - Token issuer
/// * `Json(request)` - Name and password
///
/// # Errors
///
/// * `400 Bad Request` - "User already exists" or "Invalid user data"
/// * `500 Internal Server Error` - storage, hashing or signing failure
///
/// # Example Request
///
/// ```text
/// POST /api/auth/register HTTP/1.1
/// Content-Type: application/json
///
/// { "name": "alice", "password": "secret123" }
/// ```
///
/// # Example Response
///
/// ```text
/// HTTP/1.1 201 Created
///
/// { "id": "123e4567-e89b-12d3-a456-426614174000", "name": "alice", "token": "eyJhbGciOi..." }
/// ```
pub async fn register(
    State(credentials): State<CredentialStore>,
    State(tokens): State<TokenIssuer>,
    Json(request): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    tracing::info!("Register request for name: {}", request.name());

    let identity = credentials
        .register(request.name(), request.password())
        .await
        .inspect_err(|e| tracing::warn!("Registration for '{}' failed: {}", request.name(), e))?;

    let token = tokens.issue(identity.id)?;

    tracing::info!("User created successfully: {} ({})", identity.name, identity.id);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            id: identity.id,
            name: identity.name,
            token,
        }),
    ))
}
