/**
 * Support Records and Database Operations
 *
 * Issue reports and expert help requests submitted by signed-in users.
 * Both are plain inserts tied to the submitting identity.
 */

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::error::BackendError;

/// Progress of an expert help request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HelpStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
}

impl HelpStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for HelpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A problem report filed from the app
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct IssueReport {
    pub id: Uuid,
    /// Submitting identity
    #[serde(rename = "user")]
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A request for an agronomist to follow up
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequest {
    pub id: Uuid,
    /// Submitting identity
    #[serde(rename = "user")]
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub status: HelpStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create an issue report
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `user_id` - Submitting identity
/// * `title` - Short summary
/// * `description` - Full description
pub async fn create_issue_report(
    pool: &SqlitePool,
    user_id: Uuid,
    title: &str,
    description: &str,
) -> Result<IssueReport, BackendError> {
    let now = Utc::now();
    let report = IssueReport {
        id: Uuid::new_v4(),
        user_id,
        title: title.to_owned(),
        description: description.to_owned(),
        created_at: now,
        updated_at: now,
    };

    sqlx::query(
        r#"
        INSERT INTO issue_reports (id, user_id, title, description, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(report.id.to_string())
    .bind(report.user_id.to_string())
    .bind(&report.title)
    .bind(&report.description)
    .bind(report.created_at)
    .bind(report.updated_at)
    .execute(pool)
    .await?;

    Ok(report)
}

/// Create an expert help request in `Pending` state
pub async fn create_help_request(
    pool: &SqlitePool,
    user_id: Uuid,
    title: &str,
    description: &str,
) -> Result<HelpRequest, BackendError> {
    let now = Utc::now();
    let request = HelpRequest {
        id: Uuid::new_v4(),
        user_id,
        title: title.to_owned(),
        description: description.to_owned(),
        status: HelpStatus::Pending,
        created_at: now,
        updated_at: now,
    };

    sqlx::query(
        r#"
        INSERT INTO help_requests (id, user_id, title, description, status, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(request.id.to_string())
    .bind(request.user_id.to_string())
    .bind(&request.title)
    .bind(&request.description)
    .bind(request.status.as_str())
    .bind(request.created_at)
    .bind(request.updated_at)
    .execute(pool)
    .await?;

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::users::CredentialStore;
    use crate::backend::server::config::open_database;

    async fn stored_status(pool: &SqlitePool, id: Uuid) -> String {
        sqlx::query_scalar::<_, String>("SELECT status FROM help_requests WHERE id = ?")
            .bind(id.to_string())
            .fetch_one(pool)
            .await
            .unwrap()
    }

    async fn issue_count(pool: &SqlitePool, user_id: Uuid) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM issue_reports WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[test]
    fn test_help_status_wire_names() {
        assert_eq!(serde_json::to_value(HelpStatus::InProgress).unwrap(), "In Progress");
        assert_eq!(
            serde_json::from_str::<HelpStatus>("\"Resolved\"").unwrap(),
            HelpStatus::Resolved
        );
        assert!(serde_json::from_str::<HelpStatus>("\"Closed\"").is_err());
        assert_eq!(HelpStatus::InProgress.to_string(), "In Progress");
    }

    #[tokio::test]
    async fn test_create_records_for_user() {
        let pool = open_database("sqlite::memory:").await.unwrap();
        let user = CredentialStore::with_hash_cost(pool.clone(), 4)
            .register("farmer", "greenfields")
            .await
            .unwrap();

        let report = create_issue_report(&pool, user.id, "App crash", "Crashes on upload").await.unwrap();
        assert_eq!(report.user_id, user.id);
        assert_eq!(issue_count(&pool, user.id).await, 1);

        let request = create_help_request(&pool, user.id, "Yellow leaves", "Tomatoes wilting").await.unwrap();
        assert_eq!(request.status, HelpStatus::Pending);
        assert_eq!(stored_status(&pool, request.id).await, "Pending");
    }

    #[tokio::test]
    async fn test_records_require_existing_user() {
        let pool = open_database("sqlite::memory:").await.unwrap();
        let result = create_issue_report(&pool, Uuid::new_v4(), "title", "description").await;
        assert!(matches!(result, Err(BackendError::Database(_))));
    }
}
