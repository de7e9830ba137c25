// Database Configuration
// Handles PostgreSQL and SQLite database configuration

use crate::error::HubError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Database type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    Postgres,
    Sqlite,
}

impl DatabaseType {
    /// Name of the per-backend migrations subdirectory
    pub fn migrations_subdir(&self) -> &'static str {
        match self {
            DatabaseType::Postgres => "postgres",
            DatabaseType::Sqlite => "sqlite",
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(rename = "type")]
    pub db_type: DatabaseType,

    /// Full connection URL; takes precedence over the individual fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    // PostgreSQL settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,

    // SQLite settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Root of the migrations tree (contains `postgres/` and `sqlite/`)
    #[serde(default = "default_migrations_dir")]
    pub migrations_dir: PathBuf,
}

fn default_migrations_dir() -> PathBuf {
    PathBuf::from("migrations")
}

/// Full configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
}

impl DatabaseConfig {
    /// Create PostgreSQL configuration
    pub fn postgres(
        host: String,
        port: u16,
        database: String,
        username: String,
        password: String,
    ) -> Self {
        Self {
            db_type: DatabaseType::Postgres,
            url: None,
            host: Some(host),
            port: Some(port),
            database: Some(database),
            username: Some(username),
            password: Some(password),
            max_connections: Some(10),
            path: None,
            migrations_dir: default_migrations_dir(),
        }
    }

    /// Create SQLite configuration
    pub fn sqlite(path: PathBuf) -> Self {
        Self {
            db_type: DatabaseType::Sqlite,
            url: None,
            host: None,
            port: None,
            database: None,
            username: None,
            password: None,
            max_connections: None,
            path: Some(path),
            migrations_dir: default_migrations_dir(),
        }
    }

    /// Create configuration from a connection URL such as `DATABASE_URL`
    pub fn from_url(url: &str) -> crate::Result<Self> {
        let url = url.trim();
        let db_type = if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            DatabaseType::Postgres
        } else if url.starts_with("sqlite:") {
            DatabaseType::Sqlite
        } else {
            return Err(HubError::config(format!(
                "Unsupported database URL scheme: {}",
                url.split(':').next().unwrap_or_default()
            ))
            .into());
        };

        Ok(Self {
            db_type,
            url: Some(url.to_string()),
            host: None,
            port: None,
            database: None,
            username: None,
            password: None,
            max_connections: if db_type == DatabaseType::Postgres {
                Some(10)
            } else {
                None
            },
            path: None,
            migrations_dir: default_migrations_dir(),
        })
    }

    /// Override migrations directory
    pub fn with_migrations_dir(mut self, dir: PathBuf) -> Self {
        self.migrations_dir = dir;
        self
    }

    /// Directory holding the migrations for this backend
    pub fn backend_migrations_dir(&self) -> PathBuf {
        self.migrations_dir.join(self.db_type.migrations_subdir())
    }

    /// Generate database URL for sqlx
    pub fn connection_string(&self) -> crate::Result<String> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }

        match self.db_type {
            DatabaseType::Postgres => {
                let host = self
                    .host
                    .as_ref()
                    .ok_or_else(|| HubError::DatabaseError("Missing PostgreSQL host".to_string()))?;
                let port = self
                    .port
                    .ok_or_else(|| HubError::DatabaseError("Missing PostgreSQL port".to_string()))?;
                let database = self
                    .database
                    .as_ref()
                    .ok_or_else(|| HubError::DatabaseError("Missing database name".to_string()))?;
                let username = self
                    .username
                    .as_ref()
                    .ok_or_else(|| HubError::DatabaseError("Missing username".to_string()))?;
                let password = self
                    .password
                    .as_ref()
                    .ok_or_else(|| HubError::DatabaseError("Missing password".to_string()))?;

                Ok(format!(
                    "postgres://{}:{}@{}:{}/{}",
                    username, password, host, port, database
                ))
            }
            DatabaseType::Sqlite => {
                let path = self
                    .path
                    .as_ref()
                    .ok_or_else(|| HubError::DatabaseError("Missing SQLite path".to_string()))?;

                let path_str = path.to_string_lossy();
                if path_str == ":memory:" {
                    Ok(format!("sqlite:{}", path_str))
                } else if path_str.starts_with('/') {
                    // Absolute UNIX path: sqlite:// plus the leading slash
                    Ok(format!("sqlite://{}", path.display()))
                } else if cfg!(windows) && path_str.len() > 1 && path_str.as_bytes()[1] == b':' {
                    Ok(format!("sqlite:///{}", path.display()))
                } else {
                    Ok(format!("sqlite:{}", path.display()))
                }
            }
        }
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> crate::Result<Config> {
        let contents = std::fs::read_to_string(path).map_err(|e| HubError::FileSystemError {
            path: path.to_string(),
            source: e,
        })?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| HubError::config(format!("Failed to parse database config: {}", e)))?;

        Ok(config)
    }

    /// Resolve configuration: config file if given, else `DATABASE_URL`, else default
    pub fn resolve(config_path: Option<&str>) -> crate::Result<Self> {
        if let Some(path) = config_path {
            return Ok(Self::from_file(path)?.database);
        }

        match std::env::var("DATABASE_URL") {
            Ok(url) if !url.trim().is_empty() => Self::from_url(&url),
            _ => Ok(Self::default()),
        }
    }

    /// Create example configuration file
    pub fn create_example_config(path: &str) -> crate::Result<()> {
        let example = r#"[database]
# Database type: "postgres" or "sqlite"
type = "postgres"

# PostgreSQL configuration (or set url = "postgres://..."; DATABASE_URL is used
# when no config file is given)
host = "localhost"
port = 5432
database = "justicehub"
username = "justicehub"
password = "change_me"
max_connections = 10

# SQLite configuration (uncomment to use)
# type = "sqlite"
# path = "./justicehub.db"

# Migrations root (contains postgres/ and sqlite/)
migrations_dir = "migrations"
"#;

        std::fs::write(path, example).map_err(|e| HubError::FileSystemError {
            path: path.to_string(),
            source: e,
        })?;

        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::sqlite(PathBuf::from("justicehub.db"))
    }
}
