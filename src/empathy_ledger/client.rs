// Empathy Ledger API Client
//
// Handles HTTP communication with the Empathy Ledger REST API

use super::config::EmpathyLedgerConfig;
use super::models::{ExternalProfile, ExternalStory, ListResponse};
use crate::error::HubError;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Hard stop for pagination against a misbehaving upstream
const MAX_PAGES: u32 = 1000;

/// Empathy Ledger API client
pub struct EmpathyLedgerClient {
    client: reqwest::Client,
    config: EmpathyLedgerConfig,
}

impl EmpathyLedgerClient {
    /// Create a new client; fails on an invalid configuration
    pub fn new(config: EmpathyLedgerConfig) -> crate::Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .pool_max_idle_per_host(4)
            .build()
            .map_err(HubError::from)?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &EmpathyLedgerConfig {
        &self.config
    }

    /// All profiles visible to this API key
    pub async fn fetch_profiles(&self) -> crate::Result<Vec<ExternalProfile>> {
        self.fetch_all("profiles").await
    }

    /// All stories visible to this API key
    pub async fn fetch_stories(&self) -> crate::Result<Vec<ExternalStory>> {
        self.fetch_all("stories").await
    }

    fn resource_url(&self, resource: &str) -> String {
        format!(
            "{}/api/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            resource
        )
    }

    /// Fetch one page of a resource
    async fn fetch_page<T: DeserializeOwned>(
        &self,
        resource: &str,
        page: u32,
    ) -> crate::Result<ListResponse<T>> {
        let mut params = vec![
            ("page", page.to_string()),
            ("limit", self.config.page_size.to_string()),
        ];
        if let Some(org) = &self.config.organization_id {
            params.push(("organization_id", org.clone()));
        }

        let response = self
            .client
            .get(self.resource_url(resource))
            .bearer_auth(&self.config.api_key)
            .query(&params)
            .send()
            .await
            .map_err(HubError::from)?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            return Err(HubError::HttpError {
                status: status.as_u16(),
                details,
            }
            .into());
        }

        let body = response.text().await.map_err(HubError::from)?;
        let list = serde_json::from_str(&body).map_err(HubError::from)?;
        Ok(list)
    }

    /// Follow pagination until the upstream reports no more rows
    async fn fetch_all<T: DeserializeOwned>(&self, resource: &str) -> crate::Result<Vec<T>> {
        let mut items = Vec::new();

        for page in 1..=MAX_PAGES {
            let list: ListResponse<T> = self.fetch_page(resource, page).await?;
            let received = list.data.len();
            items.extend(list.data);

            debug!("Fetched {} {} from page {}", received, resource, page);

            let has_more = list.pagination.map(|p| p.has_more).unwrap_or(false);
            if !has_more || received == 0 {
                break;
            }
        }

        Ok(items)
    }
}
