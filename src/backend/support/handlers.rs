/**
 * Support Handlers
 *
 * POST /api/support/issue and POST /api/support/help. Both routes sit
 * behind the access gate and file the record under the admitted identity.
 */

use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::support::db::{create_help_request, create_issue_report};

/// Message returned when title or description is missing
pub const MISSING_FIELDS: &str = "Please provide a title and description";

/// Body shared by issue reports and help requests
///
/// `null` reads the same as a missing field.
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct SupportRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl SupportRequest {
    /// Title and description, or `MISSING_FIELDS` if either is absent or empty
    fn fields(&self) -> Result<(&str, &str), BackendError> {
        match (self.title.as_deref(), self.description.as_deref()) {
            (Some(title), Some(description)) if !title.is_empty() && !description.is_empty() => {
                Ok((title, description))
            }
            _ => Err(BackendError::validation(MISSING_FIELDS)),
        }
    }
}

/// Submit an issue report
///
/// Responds 201 with `{ message, issue }`.
pub async fn submit_issue_report(
    AuthUser(identity): AuthUser,
    State(pool): State<SqlitePool>,
    Json(request): Json<SupportRequest>,
) -> Result<(StatusCode, Json<Value>), BackendError> {
    let (title, description) = request.fields()?;

    let issue = create_issue_report(&pool, identity.id, title, description).await?;
    tracing::info!("Issue report {} filed by {}", issue.id, identity.name);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Issue report submitted successfully",
            "issue": issue,
        })),
    ))
}

/// Submit an expert help request
///
/// Responds 201 with `{ message, helpRequest }`; the request starts out
/// `Pending`.
pub async fn submit_help_request(
    AuthUser(identity): AuthUser,
    State(pool): State<SqlitePool>,
    Json(request): Json<SupportRequest>,
) -> Result<(StatusCode, Json<Value>), BackendError> {
    let (title, description) = request.fields()?;

    let help_request = create_help_request(&pool, identity.id, title, description).await?;
    tracing::info!("Help request {} opened by {}", help_request.id, identity.name);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Expert help request submitted",
            "helpRequest": help_request,
        })),
    ))
}
