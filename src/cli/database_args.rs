// Database configuration arguments
// Licensed under GPL-3.0

use clap::Args;
use std::path::PathBuf;

/// Database connection and maintenance
///
/// Without `--db-config` the connection comes from `DATABASE_URL`, falling
/// back to a local SQLite file.
#[derive(Args, Debug, Clone, Default)]
pub struct DatabaseArgs {
    /// Database configuration file (TOML format)
    #[arg(long = "db-config", value_name = "FILE", id = "db_config")]
    pub config: Option<PathBuf>,

    /// Initialize database (create tables and run migrations)
    #[arg(long = "db-init")]
    pub init: bool,

    /// Generate example database configuration file
    #[arg(
        long = "db-config-example",
        value_name = "FILE",
        id = "db_config_example"
    )]
    pub config_example: Option<PathBuf>,
}
