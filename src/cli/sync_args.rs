// Empathy Ledger sync arguments
// Licensed under GPL-3.0

use clap::Args;

/// One-shot Empathy Ledger syndication
///
/// Connection details come from the `[empathy_ledger]` table of the API
/// config or the `EMPATHY_LEDGER_*` environment variables.
#[derive(Args, Debug, Clone, Default)]
pub struct SyncArgs {
    /// Sync public profiles and stories from Empathy Ledger, then exit
    #[arg(long = "sync-empathy-ledger")]
    pub enable: bool,
}
