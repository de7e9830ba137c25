// CLI module - Command line interface and argument parsing
// Licensed under GPL-3.0

use clap::Parser;
use std::path::Path;

mod api_server_args;
mod database_args;
mod sync_args;

pub use api_server_args::ApiServerArgs;
pub use database_args::DatabaseArgs;
pub use sync_args::SyncArgs;

/// JusticeHub - service directory and content API
///
/// The Args struct composes the per-mode argument groups:
/// - API server (ApiServerArgs)
/// - Database operations (DatabaseArgs)
/// - Empathy Ledger sync (SyncArgs)
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version)]
#[command(name = "justicehub")]
#[command(about = "JusticeHub service directory and content API", long_about = None)]
pub struct Args {
    #[command(flatten)]
    pub api_server: ApiServerArgs,

    #[command(flatten)]
    pub database: DatabaseArgs,

    #[command(flatten)]
    pub sync: SyncArgs,
}

impl Args {
    /// Database config path as UTF-8
    pub fn db_config_path(&self) -> crate::Result<Option<&str>> {
        self.database.config.as_deref().map(path_str).transpose()
    }

    /// API config path as UTF-8
    pub fn api_config_path(&self) -> crate::Result<Option<&str>> {
        self.api_server.config.as_deref().map(path_str).transpose()
    }
}

/// Borrow a path as UTF-8, rejecting anything else
pub fn path_str(path: &Path) -> crate::Result<&str> {
    path.to_str().ok_or_else(|| {
        crate::HubError::invalid_input(format!("Invalid file path: {}", path.display())).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_flags() {
        let args = Args::try_parse_from([
            "justicehub",
            "--serve",
            "--api-port",
            "9000",
            "--db-config",
            "database.toml",
        ])
        .unwrap();

        assert!(args.api_server.enable);
        assert_eq!(args.api_server.port, Some(9000));
        assert!(args.api_server.host.is_none());
        assert_eq!(args.db_config_path().unwrap(), Some("database.toml"));
    }

    #[test]
    fn test_parse_sync_flag() {
        let args = Args::try_parse_from(["justicehub", "--sync-empathy-ledger"]).unwrap();
        assert!(args.sync.enable);
        assert!(!args.database.init);
    }
}
