// Empathy Ledger Module
// Syndicates public storyteller profiles and stories from the Empathy Ledger API

pub mod client;
pub mod config;
pub mod models;
pub mod sync;

pub use client::EmpathyLedgerClient;
pub use config::EmpathyLedgerConfig;
pub use models::{ExternalProfile, ExternalStory};
pub use sync::{EmpathyLedgerSync, SyncReport};
