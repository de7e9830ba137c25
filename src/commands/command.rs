// Command trait - Defines the interface for all command implementations
// Licensed under GPL-3.0

use crate::Result;
use async_trait::async_trait;

/// One operational mode of the binary
///
/// Each mode (serve, database init, Empathy Ledger sync) is a separate
/// command object so `main` only has to parse arguments, route and execute.
#[async_trait]
pub trait Command: Send + Sync {
    /// Execute the command asynchronously
    async fn execute(&self) -> Result<()>;

    /// Get a human-readable name for this command (for logging/debugging)
    fn name(&self) -> &'static str;
}
