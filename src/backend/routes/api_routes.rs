/**
 * API Route Handlers
 *
 * This module defines the API endpoints:
 *
 * ## Authentication (public)
 * - `POST /api/auth/register` - User registration
 * - `POST /api/auth/login` - User login
 *
 * ## Protected (behind the access gate)
 * - `GET /api/auth/me` - Current user
 * - `POST /api/support/issue` - Submit an issue report
 * - `POST /api/support/help` - Request expert help
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::backend::auth::{get_me, login, register};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;
use crate::backend::support::{submit_help_request, submit_issue_report};

/// Configure API routes
///
/// Public routes are added after the protected group so the access gate
/// layer only wraps the protected ones.
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/api/auth/me", get(get_me))
        .route("/api/support/issue", post(submit_issue_report))
        .route("/api/support/help", post(submit_help_request))
        .route_layer(from_fn_with_state(app_state.gate(), auth_middleware));

    router
        .merge(protected)
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
}
