// Person Record Model
// Public profiles, either entered by admins or syndicated from Empathy Ledger

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Person record in database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PersonRecord {
    pub id: String,
    pub full_name: String,
    pub slug: String,
    pub role_title: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub organization: Option<String>,
    pub is_public: bool,
    pub is_featured: bool,
    pub empathy_ledger_id: Option<String>,
    pub last_synced_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PersonRecord {
    /// Create new public, non-featured person record
    pub fn new(full_name: String, slug: String) -> Self {
        let now = Utc::now();
        Self {
            id: super::new_id(),
            full_name,
            slug,
            role_title: None,
            bio: None,
            photo_url: None,
            organization: None,
            is_public: true,
            is_featured: false,
            empathy_ledger_id: None,
            last_synced_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this profile is owned by the Empathy Ledger sync
    pub fn is_syndicated(&self) -> bool {
        self.empathy_ledger_id.is_some()
    }
}

/// People listing filters
#[derive(Debug, Clone, Default)]
pub struct PersonFilter {
    pub public_only: bool,
    pub featured_only: bool,
    pub limit: i64,
    pub offset: i64,
}
