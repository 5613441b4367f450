//! Shared fixtures for integration tests
//!
//! Every test gets its own in-memory SQLite database, a router built the
//! same way as production, and a manually driven clock.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::{header::AUTHORIZATION, HeaderValue};
use axum_test::{TestResponse, TestServer};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use cropguard::backend::auth::FixedClock;
use cropguard::backend::routes::create_router;
use cropguard::backend::server::{open_database, AppState};

pub const TEST_SECRET: &[u8] = b"integration-test-secret";

/// Minimum bcrypt cost keeps the suite fast
pub const TEST_HASH_COST: u32 = 4;

pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub clock: FixedClock,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = open_database("sqlite::memory:")
            .await
            .expect("Failed to open test database");
        let clock = FixedClock::new(Utc::now());
        let state = AppState::with_clock(pool, TEST_SECRET, Arc::new(clock.clone()), TEST_HASH_COST);
        let server = TestServer::new(create_router(state.clone())).expect("Failed to start test server");

        Self { server, state, clock }
    }

    pub async fn register(&self, name: &str, password: &str) -> TestResponse {
        self.server
            .post("/api/auth/register")
            .json(&json!({ "name": name, "password": password }))
            .await
    }

    pub async fn login(&self, name: &str, password: &str) -> TestResponse {
        self.server
            .post("/api/auth/login")
            .json(&json!({ "name": name, "password": password }))
            .await
    }

    /// Register a user and return its token
    pub async fn token_for(&self, name: &str, password: &str) -> String {
        let body: Value = self.register(name, password).await.json();
        body["token"].as_str().expect("register returned no token").to_string()
    }

    /// Number of issue reports stored for a user
    pub async fn issue_report_count(&self, user_id: Uuid) -> i64 {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM issue_reports WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_one(&self.state.db_pool)
            .await
            .expect("Failed to count issue reports")
    }

    /// Stored status column of a help request, if it exists
    pub async fn help_request_status(&self, id: Uuid) -> Option<String> {
        sqlx::query_scalar::<_, String>("SELECT status FROM help_requests WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.state.db_pool)
            .await
            .expect("Failed to read help request status")
    }

    pub async fn me(&self, authorization: Option<&str>) -> TestResponse {
        let request = self.server.get("/api/auth/me");
        match authorization {
            Some(value) => {
                request
                    .add_header(AUTHORIZATION, HeaderValue::from_str(value).unwrap())
                    .await
            }
            None => request.await,
        }
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
