// Empathy Ledger client configuration

use crate::error::HubError;
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable holding the API base URL
pub const ENV_API_URL: &str = "EMPATHY_LEDGER_API_URL";
/// Environment variable holding the bearer token
pub const ENV_API_KEY: &str = "EMPATHY_LEDGER_API_KEY";
/// Environment variable restricting the sync to one organization
pub const ENV_ORG_ID: &str = "EMPATHY_LEDGER_ORG_ID";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmpathyLedgerConfig {
    /// API base URL, e.g. https://empathy-ledger.example.org
    pub base_url: String,

    /// Bearer token sent with every request
    pub api_key: String,

    /// Only syndicate records belonging to this organization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,

    /// Records requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Per-request timeout
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_page_size() -> u32 {
    50
}

fn default_timeout_seconds() -> u64 {
    30
}

impl EmpathyLedgerConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            organization_id: None,
            page_size: default_page_size(),
            timeout_seconds: default_timeout_seconds(),
        }
    }

    /// Build from the process environment; `None` unless both URL and key are set
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty())?;
        let api_key = lookup(ENV_API_KEY).filter(|v| !v.trim().is_empty())?;

        let mut config = Self::new(base_url, api_key);
        config.organization_id = lookup(ENV_ORG_ID).filter(|v| !v.trim().is_empty());
        Some(config)
    }

    /// Overlay any variables present in `lookup` onto this config
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.trim().is_empty()) {
            self.api_key = key;
        }
        if let Some(org) = lookup(ENV_ORG_ID).filter(|v| !v.trim().is_empty()) {
            self.organization_id = Some(org);
        }
    }

    /// Check the base URL and paging parameters
    pub fn validate(&self) -> crate::Result<()> {
        let url = Url::parse(&self.base_url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(HubError::config(format!(
                "Empathy Ledger base_url must be http(s), got '{}'",
                self.base_url
            ))
            .into());
        }
        if self.api_key.trim().is_empty() {
            return Err(HubError::config("Empathy Ledger api_key is empty").into());
        }
        if self.page_size == 0 {
            return Err(HubError::config("Empathy Ledger page_size must be positive").into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_from_lookup_requires_url_and_key() {
        assert!(EmpathyLedgerConfig::from_lookup(lookup(&[(ENV_API_URL, "https://el.test")])).is_none());

        let config = EmpathyLedgerConfig::from_lookup(lookup(&[
            (ENV_API_URL, "https://el.test"),
            (ENV_API_KEY, "secret"),
            (ENV_ORG_ID, "org-1"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://el.test");
        assert_eq!(config.organization_id.as_deref(), Some("org-1"));
        assert_eq!(config.page_size, 50);
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = EmpathyLedgerConfig::new("https://old.test", "old");
        config.apply_overrides(lookup(&[(ENV_API_KEY, "new")]));
        assert_eq!(config.base_url, "https://old.test");
        assert_eq!(config.api_key, "new");
    }

    #[test]
    fn test_validate() {
        assert!(EmpathyLedgerConfig::new("https://el.test", "k").validate().is_ok());
        assert!(EmpathyLedgerConfig::new("ftp://el.test", "k").validate().is_err());
        assert!(EmpathyLedgerConfig::new("not a url", "k").validate().is_err());
        assert!(EmpathyLedgerConfig::new("https://el.test", " ").validate().is_err());
    }
}
