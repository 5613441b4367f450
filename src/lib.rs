//! CropGuard - Backend Library
//!
//! Server side of the CropGuard crop-disease app. The library exposes the
//! axum application so the binary and the integration tests build the same
//! router.
//!
//! # Module Structure
//!
//! - **`backend`** - Server-side code
//!   - Credential store (bcrypt-hashed passwords in SQLite)
//!   - Token issuer (30-day HS256 bearer tokens)
//!   - Access gate middleware for protected routes
//!   - Support endpoints (issue reports, expert help requests)
//!
//! # Error Handling
//!
//! Fallible operations return `Result<T, BackendError>`; the error converts
//! into a JSON HTTP response with a `message` field.

/// Backend server-side code
pub mod backend;
