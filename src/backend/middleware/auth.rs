/**
 * Authentication Middleware
 *
 * This module provides the access gate that protects routes requiring a
 * signed-in user. For every request it:
 *
 * 1. Extracts a bearer token from the Authorization header
 * 2. Verifies the token signature and expiry
 * 3. Resolves the token's identity in the credential store
 * 4. Attaches the identity to the request extensions
 *
 * Every rejection is a 401 with one of three messages. The gate never
 * writes to storage.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::backend::auth::sessions::{TokenIssuer, TokenVerdict};
use crate::backend::auth::users::{CredentialStore, Identity};
use crate::backend::error::{AuthFailure, BackendError};

/// Why no bearer token could be pulled from the headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingToken {
    /// No Authorization header at all
    NoHeader,
    /// Header present but not `Bearer <token>` (or not valid UTF-8)
    WrongScheme,
    /// `Bearer` with nothing after it
    EmptyToken,
}

/// Pull the bearer token out of the Authorization header
///
/// The scheme name is matched case-insensitively. All three failure cases
/// are reported to the client as "no token".
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, MissingToken> {
    let value = headers.get(AUTHORIZATION).ok_or(MissingToken::NoHeader)?;
    let value = value.to_str().map_err(|_| MissingToken::WrongScheme)?.trim();

    let (scheme, token) = match value.split_once(' ') {
        Some((scheme, token)) => (scheme, token.trim()),
        None => (value, ""),
    };

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(MissingToken::WrongScheme);
    }

    if token.is_empty() {
        return Err(MissingToken::EmptyToken);
    }

    Ok(token)
}

/// Request-time check converting a bearer token into an identity
#[derive(Clone)]
pub struct AccessGate {
    credentials: CredentialStore,
    tokens: TokenIssuer,
}

impl AccessGate {
    pub fn new(credentials: CredentialStore, tokens: TokenIssuer) -> Self {
        Self { credentials, tokens }
    }

    /// Run extract, verify and resolve against a request's headers
    ///
    /// # Errors
    ///
    /// * `Unauthenticated(NoToken)` - no usable bearer token
    /// * `Unauthenticated(TokenFailed)` - bad signature, garbage or expired
    /// * `Unauthenticated(UserNotFound)` - identity deleted since issuance
    /// * `Database` - the store failed while resolving
    pub async fn admit(&self, headers: &HeaderMap) -> Result<Identity, BackendError> {
        let token = extract_bearer_token(headers).map_err(|reason| {
            tracing::warn!("Rejected request without bearer token: {:?}", reason);
            BackendError::Unauthenticated(AuthFailure::NoToken)
        })?;

        let identity_id = match self.tokens.verify(token) {
            TokenVerdict::Valid(id) => id,
            verdict => {
                tracing::warn!("Rejected bearer token: {:?}", verdict);
                return Err(BackendError::Unauthenticated(AuthFailure::TokenFailed));
            }
        };

        self.credentials
            .find_by_id(identity_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!("Token identity no longer exists: {}", identity_id);
                BackendError::Unauthenticated(AuthFailure::UserNotFound)
            })
    }
}

/// Authentication middleware
///
/// Returns 401 before the downstream handler runs if the gate rejects the
/// request; otherwise inserts the resolved `Identity` into the request
/// extensions.
pub async fn auth_middleware(
    State(gate): State<AccessGate>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let identity = gate.admit(request.headers()).await?;
    tracing::debug!("Admitted request for {}", identity.name);

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Axum extractor for the identity admitted by `auth_middleware`
///
/// Handlers on unprotected routes that use this extractor get a 401
/// "no token" response.
#[derive(Clone, Debug)]
pub struct AuthUser(pub Identity);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                tracing::warn!("Identity not found in request extensions");
                BackendError::Unauthenticated(AuthFailure::NoToken)
            })
    }
}
