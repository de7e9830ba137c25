// Event Record Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Event record in database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub event_type: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub registration_url: Option<String>,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EventRecord {
    /// Create new public event record
    pub fn new(title: String, slug: String, event_type: String, start_date: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            id: super::new_id(),
            title,
            slug,
            description: None,
            event_type,
            start_date,
            end_date: None,
            location: None,
            registration_url: None,
            is_public: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Event listing filters
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Only events starting at or after this instant
    pub starts_after: Option<DateTime<Utc>>,
    pub public_only: bool,
    pub limit: i64,
    pub offset: i64,
}
