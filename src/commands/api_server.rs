// ApiServerCommand - REST API server mode
// Licensed under GPL-3.0

use super::Command;
use crate::api::{ApiConfig, ApiServer};
use crate::db::{DatabaseConfig, JusticeHubDatabase};
use crate::{Args, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

/// ApiServerCommand handles REST API server mode
///
/// Configuration precedence is CLI flags, then environment, then the
/// `--api-config` file, then defaults. A database that cannot be reached
/// at startup does not stop the server; data endpoints answer 503 and
/// `/health` reports the database as unavailable.
pub struct ApiServerCommand {
    args: Args,
}

impl ApiServerCommand {
    /// Create a new ApiServerCommand with the given arguments
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    /// API configuration with CLI overrides applied
    pub fn build_config(&self) -> Result<ApiConfig> {
        let mut config = ApiConfig::load(self.args.api_config_path()?)?;

        if let Some(host) = &self.args.api_server.host {
            config.host = host.clone();
        }
        if let Some(port) = self.args.api_server.port {
            config.port = port;
        }
        if self.args.api_server.no_swagger {
            config.enable_swagger = false;
        }

        Ok(config)
    }

    async fn connect_database(&self) -> Result<Option<Arc<JusticeHubDatabase>>> {
        let db_config = DatabaseConfig::resolve(self.args.db_config_path()?)?;

        match JusticeHubDatabase::new(&db_config).await {
            Ok(db) => Ok(Some(Arc::new(db))),
            Err(e) => {
                warn!("Database unavailable, serving without it: {:#}", e);
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl Command for ApiServerCommand {
    async fn execute(&self) -> Result<()> {
        info!("Starting JusticeHub in API server mode");

        let config = self.build_config()?;
        if config.api_keys.is_empty() {
            warn!("No API keys configured; admin and notification endpoints will reject every request");
        }

        let database = self.connect_database().await?;

        let server = ApiServer::new(config, database)?;
        server.run().await?;

        Ok(())
    }

    fn name(&self) -> &'static str {
        "ApiServerCommand"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_flags_override_config() {
        let args = Args::try_parse_from([
            "justicehub",
            "--serve",
            "--api-host",
            "127.0.0.1",
            "--api-port",
            "9191",
            "--no-swagger",
        ])
        .unwrap();

        let config = ApiServerCommand::new(args).build_config().unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9191);
        assert!(!config.enable_swagger);
    }
}
