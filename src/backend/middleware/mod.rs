//! Middleware Module
//!
//! This module contains HTTP middleware for the backend server.
//!
//! - **`auth`** - The access gate protecting signed-in routes

pub mod auth;

pub use auth::{auth_middleware, extract_bearer_token, AccessGate, AuthUser, MissingToken};
