// CommandRouter - Routes CLI arguments to appropriate Command
// Licensed under GPL-3.0

use super::{ApiServerCommand, Command, DatabaseCommand, SyncCommand};
use crate::{Args, HubError, Result};

/// CommandRouter determines which Command to execute based on CLI arguments
///
/// Priority:
/// 1. API server mode (--serve)
/// 2. Empathy Ledger sync (--sync-empathy-ledger)
/// 3. Database initialization (--db-init)
pub struct CommandRouter;

impl CommandRouter {
    /// Route CLI arguments to the appropriate Command
    ///
    /// # Errors
    /// Returns an invalid-input error when no mode flag is given
    pub fn route(args: Args) -> Result<Box<dyn Command>> {
        if args.api_server.enable {
            return Ok(Box::new(ApiServerCommand::new(args)));
        }

        if args.sync.enable {
            return Ok(Box::new(SyncCommand::new(args)));
        }

        if args.database.init {
            return Ok(Box::new(DatabaseCommand::new(args)));
        }

        Err(HubError::invalid_input(
            "No mode selected. Use --serve, --sync-empathy-ledger or --db-init (see --help)",
        )
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn route(argv: &[&str]) -> Result<&'static str> {
        let args = Args::try_parse_from(argv).unwrap();
        CommandRouter::route(args).map(|cmd| cmd.name())
    }

    #[test]
    fn test_serve_takes_priority() {
        let name = route(&["justicehub", "--serve", "--db-init"]).unwrap();
        assert_eq!(name, "ApiServerCommand");
    }

    #[test]
    fn test_sync_and_db_init_routes() {
        assert_eq!(
            route(&["justicehub", "--sync-empathy-ledger"]).unwrap(),
            "SyncCommand"
        );
        assert_eq!(route(&["justicehub", "--db-init"]).unwrap(), "DatabaseCommand");
    }

    #[test]
    fn test_no_mode_is_an_error() {
        assert!(route(&["justicehub"]).is_err());
    }
}
