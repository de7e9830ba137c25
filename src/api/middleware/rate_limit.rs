// Rate Limiting
//
// One governor limiter per API key, created on first use.

use crate::api::models::error::ApiError;
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter as GovernorRateLimiter,
};
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use tokio::sync::RwLock;

type KeyLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Fallback when the configured rate is zero
const DEFAULT_PER_MINUTE: NonZeroU32 = match NonZeroU32::new(100) {
    Some(n) => n,
    None => unreachable!(),
};

/// Limiters kept before the cache is flushed
const MAX_TRACKED_KEYS: usize = 1000;

/// Per-key rate limiter
#[derive(Clone)]
pub struct PerKeyRateLimiter {
    limiters: Arc<RwLock<HashMap<String, Arc<KeyLimiter>>>>,
    quota: Quota,
}

impl PerKeyRateLimiter {
    /// Create new per-key rate limiter
    pub fn new(requests_per_minute: u32) -> Self {
        let per_minute = NonZeroU32::new(requests_per_minute).unwrap_or(DEFAULT_PER_MINUTE);

        Self {
            limiters: Arc::new(RwLock::new(HashMap::new())),
            quota: Quota::per_minute(per_minute),
        }
    }

    /// Check rate limit for a specific key
    pub async fn check(&self, key: &str) -> Result<(), ApiError> {
        let existing = self.limiters.read().await.get(key).cloned();
        let limiter = match existing {
            Some(limiter) => limiter,
            None => {
                let mut limiters = self.limiters.write().await;
                if limiters.len() >= MAX_TRACKED_KEYS {
                    limiters.clear();
                    tracing::info!("Cleared rate limiter cache");
                }
                limiters
                    .entry(key.to_string())
                    .or_insert_with(|| Arc::new(GovernorRateLimiter::direct(self.quota)))
                    .clone()
            }
        };

        limiter.check().map_err(|_| {
            ApiError::RateLimited(format!(
                "Rate limit exceeded. Maximum {} requests per minute allowed.",
                self.quota.burst_size().get()
            ))
        })
    }
}
