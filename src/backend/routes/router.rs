/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single axum router.
 */

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Health text served at `/`
pub const ROOT_MESSAGE: &str = "CropGuard AI Backend is running...";

/// Create the axum router with all routes configured
///
/// # Route Details
///
/// - `GET /` - Health text
/// - `/api/...` - See `api_routes`
/// - Anything else - 404 `{ "message": "Not Found" }`
///
/// The mobile client calls from arbitrary origins, so CORS allows any
/// origin with the Content-Type and Authorization headers.
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/", get(|| async { ROOT_MESSAGE }));

    let router = configure_api_routes(router, &app_state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    router
        .fallback(|| async {
            (
                axum::http::StatusCode::NOT_FOUND,
                axum::Json(serde_json::json!({ "message": "Not Found" })),
            )
        })
        .layer(cors)
        .with_state(app_state)
}
