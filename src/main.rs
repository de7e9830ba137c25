// JusticeHub - service directory and content API
// Licensed under GPL-3.0
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, version 3.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use justicehub::api::ApiConfig;
use justicehub::cli::path_str;
use justicehub::commands::CommandRouter;
use justicehub::db::DatabaseConfig;
use justicehub::Args;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging - respect RUST_LOG environment variable
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse::<Level>().ok())
        .unwrap_or(Level::INFO);

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    // Handle --api-config-example (generate API config example and exit)
    if let Some(config_path) = &args.api_server.config_example {
        ApiConfig::create_example(path_str(config_path)?)?;
        println!(
            "{} Example API configuration saved to: {}",
            "✓".green(),
            config_path.display()
        );
        return Ok(());
    }

    // Handle --db-config-example (generate example config and exit)
    if let Some(config_path) = &args.database.config_example {
        DatabaseConfig::create_example_config(path_str(config_path)?)?;
        println!(
            "{} Example database configuration saved to: {}",
            "✓".green(),
            config_path.display()
        );
        return Ok(());
    }

    let command = CommandRouter::route(args)?;
    debug!("Executing {}", command.name());
    command.execute().await
}
