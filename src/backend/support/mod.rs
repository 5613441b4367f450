//! Support Module
//!
//! Issue reports and expert help requests filed by signed-in users.
//!
//! - **`db`** - Record types and inserts
//! - **`handlers`** - Protected HTTP handlers

pub mod db;

pub mod handlers;

pub use db::{HelpRequest, HelpStatus, IssueReport};
pub use handlers::{submit_help_request, submit_issue_report, SupportRequest};
