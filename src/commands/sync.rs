// SyncCommand - One-shot Empathy Ledger syndication
// Licensed under GPL-3.0

use super::Command;
use crate::api::ApiConfig;
use crate::db::{DatabaseConfig, JusticeHubDatabase};
use crate::empathy_ledger::{EmpathyLedgerClient, EmpathyLedgerSync, SyncReport};
use crate::{Args, HubError, Result};
use async_trait::async_trait;
use colored::*;
use tracing::info;

/// SyncCommand runs one Empathy Ledger pass from the command line
///
/// Exits non-zero when the pass could not fetch from Empathy Ledger;
/// per-record failures are printed but do not fail the command.
pub struct SyncCommand {
    args: Args,
}

impl SyncCommand {
    /// Create a new SyncCommand with the given arguments
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    fn print_report(report: &SyncReport) {
        println!("\n{}", "Empathy Ledger Sync".bold());
        println!("{}", "=".repeat(40));
        println!(
            "  Profiles: {} created, {} updated",
            report.profiles_created, report.profiles_updated
        );
        println!(
            "  Stories:  {} created, {} updated",
            report.stories_created, report.stories_updated
        );
        println!("  Withdrawn: {}", report.withdrawn);
        println!("  Skipped:  {}", report.skipped);

        if report.is_clean() {
            println!("{} Sync completed", "✓".green());
        } else {
            println!(
                "{} Sync completed with {} error(s):",
                "⚠".yellow(),
                report.errors.len()
            );
            for error in &report.errors {
                println!("  - {}", error.red());
            }
        }
    }
}

#[async_trait]
impl Command for SyncCommand {
    async fn execute(&self) -> Result<()> {
        let api_config = ApiConfig::load(self.args.api_config_path()?)?;
        let el_config = api_config.empathy_ledger.ok_or_else(|| {
            HubError::config(
                "Empathy Ledger is not configured (set EMPATHY_LEDGER_API_URL and EMPATHY_LEDGER_API_KEY)",
            )
        })?;
        let client = EmpathyLedgerClient::new(el_config)?;

        let db_config = DatabaseConfig::resolve(self.args.db_config_path()?)?;
        let db = JusticeHubDatabase::new(&db_config).await?;

        info!("Starting Empathy Ledger sync from {}", client.config().base_url);
        let result = EmpathyLedgerSync::new(&client, &db).run().await;
        db.close().await;

        Self::print_report(&result?);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "SyncCommand"
    }
}
