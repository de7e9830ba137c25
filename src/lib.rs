// JusticeHub - service directory and content API
// Licensed under GPL-3.0

//! JusticeHub serves a youth-justice service directory, admin-managed
//! content (events, frameworks, people, research) and stories syndicated
//! from the Empathy Ledger platform over a JSON REST API backed by
//! PostgreSQL or SQLite.

pub mod api;
pub mod cli;
pub mod commands;
pub mod db;
pub mod empathy_ledger;
pub mod error;
pub mod utils;

// Re-export commonly used types
pub use crate::cli::Args;
pub use crate::error::HubError;

/// Result type for JusticeHub operations
pub type Result<T> = anyhow::Result<T>;

/// Error type for JusticeHub operations
pub use anyhow::Error;
