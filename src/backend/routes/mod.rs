//! Route Configuration Module
//!
//! - **`router`** - Main router creation, CORS and fallback
//! - **`api_routes`** - Auth and support endpoints

pub mod router;

pub mod api_routes;

pub use router::create_router;
