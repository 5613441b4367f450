/**
 * Server Initialization
 *
 * This module wires configuration, storage and routes into a ready-to-serve
 * axum `Router`.
 *
 * # Initialization Process
 *
 * 1. Open the database and apply migrations (fatal on failure)
 * 2. Build the credential store and token issuer from configuration
 * 3. Create the router with all routes and middleware
 */

use axum::Router;

use crate::backend::error::BackendError;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{open_database, ServerConfig};
use crate::backend::server::state::AppState;

/// Create and configure the axum application
///
/// # Errors
///
/// Returns `StorageUnavailable` if the database cannot be opened; the
/// caller is expected to exit.
pub async fn create_app(config: &ServerConfig) -> Result<Router<()>, BackendError> {
    tracing::info!("Initializing CropGuard backend server");

    let db_pool = open_database(&config.database_url).await?;
    let app_state = AppState::new(db_pool, config.jwt_secret.as_bytes());

    Ok(create_router(app_state))
}
