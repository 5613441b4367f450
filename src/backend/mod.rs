//! Backend Module
//!
//! This module contains all server-side code for the CropGuard API: an axum
//! HTTP server with name/password registration, bearer-token sessions and
//! protected support endpoints.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Credential store, token issuer and auth handlers
//! - **`middleware`** - The access gate for protected routes
//! - **`support`** - Issue reports and expert help requests
//! - **`error`** - Backend error taxonomy
//!
//! # Request Flow
//!
//! 1. Client registers or logs in and receives a bearer token
//! 2. Client sends `Authorization: Bearer <token>` on protected routes
//! 3. The access gate verifies the token and resolves the identity
//! 4. The handler runs with the identity from the request extensions

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Support requests
pub mod support;

/// Re-export commonly used types
pub use error::{AuthFailure, BackendError};
pub use server::{create_app, AppState, ServerConfig};
