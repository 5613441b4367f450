/**
 * Get Current User Handler
 *
 * GET /api/auth/me returns the identity the access gate resolved for the
 * request. The route sits behind `auth_middleware`, so no token handling
 * happens here.
 */

use axum::response::Json;

use crate::backend::auth::users::Identity;
use crate::backend::middleware::AuthUser;

/// Get current user handler
///
/// Responds with `{ id, name, createdAt, updatedAt }`.
pub async fn get_me(AuthUser(identity): AuthUser) -> Json<Identity> {
    Json(identity)
}
