// API State Management

use crate::api::{
    config::ApiConfig, middleware::rate_limit::PerKeyRateLimiter, models::error::ApiError,
};
use crate::db::JusticeHubDatabase;
use crate::empathy_ledger::EmpathyLedgerClient;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state
pub struct AppState {
    /// API configuration
    pub config: Arc<ApiConfig>,

    /// Server start time
    pub start_time: Instant,

    /// Rate limiter for per-key rate limiting
    pub rate_limiter: Arc<PerKeyRateLimiter>,

    /// Database (absent when the server starts without one)
    pub database: Option<Arc<JusticeHubDatabase>>,

    /// Empathy Ledger client, when syndication is configured
    pub empathy_ledger: Option<Arc<EmpathyLedgerClient>>,
}

impl AppState {
    /// Create new application state
    pub fn new(config: ApiConfig) -> crate::Result<Self> {
        let empathy_ledger = match &config.empathy_ledger {
            Some(el) => Some(Arc::new(EmpathyLedgerClient::new(el.clone())?)),
            None => None,
        };

        let rate_limiter = Arc::new(PerKeyRateLimiter::new(config.rate_limit_per_minute));

        Ok(Self {
            config: Arc::new(config),
            start_time: Instant::now(),
            rate_limiter,
            database: None,
            empathy_ledger,
        })
    }

    /// Set database
    pub fn with_database(mut self, database: Arc<JusticeHubDatabase>) -> Self {
        self.database = Some(database);
        self
    }

    /// Database or 503
    pub fn database(&self) -> Result<&JusticeHubDatabase, ApiError> {
        self.database
            .as_deref()
            .ok_or_else(|| ApiError::ServiceUnavailable("Database not configured".to_string()))
    }

    /// Empathy Ledger client or 503
    pub fn empathy_ledger(&self) -> Result<&EmpathyLedgerClient, ApiError> {
        self.empathy_ledger.as_deref().ok_or_else(|| {
            ApiError::ServiceUnavailable("Empathy Ledger integration not configured".to_string())
        })
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
