//! Authentication Module
//!
//! This module handles identity creation, credential verification and
//! bearer tokens.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── clock.rs        - Injectable wall clock
//! ├── users.rs        - Identity model and credential store
//! ├── sessions.rs     - Token issuer
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: name and password → identity created → token returned
//! 2. **Login**: name and password → credentials verified → token returned
//! 3. **Protected request**: token → access gate → identity attached
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are stateless HS256 JWTs carrying only the identity id
//! - Tokens expire after 30 days and cannot be revoked earlier
//! - Invalid credentials return 401 (no information leakage)

/// Injectable wall clock
pub mod clock;

/// Identity model and credential store
pub mod users;

/// Token issuing and verification
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use clock::{Clock, FixedClock, SystemClock};
pub use handlers::{get_me, login, register, AuthResponse, CredentialsRequest};
pub use sessions::{Claims, TokenIssuer, TokenVerdict, TOKEN_LIFETIME_DAYS};
pub use users::{CredentialStore, Identity, PASSWORD_HASH_COST};
