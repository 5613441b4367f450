//! Server Module
//!
//! This module contains the code that initializes and configures the axum
//! HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Environment configuration and database opening
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `ServerConfig::from_env` (fatal if incomplete)
//! 2. **Storage**: open the SQLite pool and run migrations (fatal on failure)
//! 3. **State Creation**: credential store and token issuer get explicit config
//! 4. **Router Creation**: routes, access gate and CORS

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::{open_database, ConfigError, ServerConfig};
pub use init::create_app;
pub use state::AppState;
