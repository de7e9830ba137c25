// API Configuration

use crate::empathy_ledger::EmpathyLedgerConfig;
use crate::error::HubError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Environment variable overriding the bind host
pub const ENV_HOST: &str = "JUSTICEHUB_HOST";
/// Environment variable overriding the bind port
pub const ENV_PORT: &str = "JUSTICEHUB_PORT";
/// Environment variable adding an admin API key
pub const ENV_ADMIN_API_KEY: &str = "JUSTICEHUB_ADMIN_API_KEY";
/// Environment variable adding a user API key
pub const ENV_API_KEY: &str = "JUSTICEHUB_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Enable CORS
    pub enable_cors: bool,

    /// Allowed origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Rate limit per minute per API key
    pub rate_limit_per_minute: u32,

    /// Maximum request body size in bytes
    pub max_body_size: usize,

    /// Enable Swagger UI
    pub enable_swagger: bool,

    // Tables last so the TOML output stays valid
    /// API keys (key -> permission level)
    #[serde(default)]
    pub api_keys: HashMap<String, Permission>,

    /// Empathy Ledger syndication; disabled when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empathy_ledger: Option<EmpathyLedgerConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Permission {
    /// Content management and sync
    Admin,

    /// Signed-in user features such as notifications
    User,
}

impl Permission {
    /// Whether this permission satisfies `required`
    pub fn allows(self, required: Permission) -> bool {
        match required {
            Permission::User => true,
            Permission::Admin => self == Permission::Admin,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            api_keys: HashMap::new(),
            enable_cors: true,
            cors_origins: Vec::new(),
            rate_limit_per_minute: 100,
            max_body_size: 1024 * 1024, // 1MB
            enable_swagger: true,
            empathy_ledger: None,
        }
    }
}

impl ApiConfig {
    /// Create config from file
    pub fn from_file(path: &str) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| HubError::FileSystemError {
            path: path.to_string(),
            source: e,
        })?;
        let config: ApiConfig = toml::from_str(&content)
            .map_err(|e| HubError::config(format!("Failed to parse {}: {}", path, e)))?;
        Ok(config)
    }

    /// Load from an optional file, then apply environment overrides
    pub fn load(path: Option<&str>) -> crate::Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Overlay environment variables found through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> crate::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST).filter(|v| !v.trim().is_empty()) {
            self.host = host;
        }
        if let Some(port) = lookup(ENV_PORT).filter(|v| !v.trim().is_empty()) {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| HubError::config(format!("{} is not a valid port: {}", ENV_PORT, port)))?;
        }
        if let Some(key) = lookup(ENV_ADMIN_API_KEY).filter(|v| !v.trim().is_empty()) {
            self.add_key(key, Permission::Admin);
        }
        if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.trim().is_empty()) {
            self.add_key(key, Permission::User);
        }

        match self.empathy_ledger.as_mut() {
            Some(el) => el.apply_overrides(&lookup),
            None => self.empathy_ledger = EmpathyLedgerConfig::from_lookup(&lookup),
        }

        Ok(())
    }

    /// Create example config file
    pub fn create_example(path: &str) -> crate::Result<()> {
        let mut config = Self::default();
        config.add_key("change-me-admin-key".to_string(), Permission::Admin);
        config.add_key("change-me-user-key".to_string(), Permission::User);
        config.empathy_ledger = Some(EmpathyLedgerConfig::new(
            "https://empathy-ledger.example.org",
            "change-me",
        ));

        let toml = toml::to_string_pretty(&config)
            .map_err(|e| HubError::config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml).map_err(|e| HubError::FileSystemError {
            path: path.to_string(),
            source: e,
        })?;
        Ok(())
    }

    /// Validate API key and return permission level
    pub fn validate_key(&self, key: &str) -> Option<Permission> {
        self.api_keys.get(key).copied()
    }

    /// Add API key
    pub fn add_key(&mut self, key: String, permission: Permission) {
        self.api_keys.insert(key, permission);
    }
}
