/**
 * Error Conversion
 *
 * This module provides the `IntoResponse` implementation for backend errors,
 * allowing handlers and middleware to return them directly.
 *
 * # Response Format
 *
 * Client errors (4xx) are returned as `{ "message": "<text>" }`.
 * Server errors (5xx) are returned as
 * `{ "message": "Server Error", "error": "<text>" }`.
 */

use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = if self.is_client_error() {
            json!({ "message": self.message() })
        } else {
            tracing::error!("Request failed: {}", self);
            json!({ "message": "Server Error", "error": self.message() })
        };

        (status, Json(body)).into_response()
    }
}
