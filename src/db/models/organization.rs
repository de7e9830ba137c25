// Organization Record Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Organization running one or more services
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OrganizationRecord {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub website: Option<String>,
    pub state: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrganizationRecord {
    /// Create new organization record
    pub fn new(name: String, slug: String) -> Self {
        let now = Utc::now();
        Self {
            id: super::new_id(),
            name,
            slug,
            description: None,
            website: None,
            state: None,
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }
}
