// DatabaseCommand - Database initialization
// Licensed under GPL-3.0

use super::Command;
use crate::db::{DatabaseConfig, JusticeHubDatabase};
use crate::{Args, Result};
use async_trait::async_trait;
use colored::*;

/// DatabaseCommand handles `--db-init`
///
/// Connecting runs every pending migration, so initialization is just a
/// connect, ping and close.
pub struct DatabaseCommand {
    args: Args,
}

impl DatabaseCommand {
    /// Create a new DatabaseCommand with the given arguments
    pub fn new(args: Args) -> Self {
        Self { args }
    }
}

#[async_trait]
impl Command for DatabaseCommand {
    async fn execute(&self) -> Result<()> {
        let config = DatabaseConfig::resolve(self.args.db_config_path()?)?;
        let db = JusticeHubDatabase::new(&config).await?;
        db.ping().await?;

        println!(
            "{} Database initialized successfully ({:?})",
            "✓".green(),
            config.db_type
        );

        db.close().await;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "DatabaseCommand"
    }
}
