// Framework Record Model
// Justice reinvestment / diversion frameworks showcased on the site

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct FrameworkRecord {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub overview: String,
    pub jurisdiction: Option<String>,
    pub key_features: Option<String>,
    pub evidence_level: Option<String>,
    pub source_url: Option<String>,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FrameworkRecord {
    pub fn new(name: String, slug: String, overview: String) -> Self {
        let now = Utc::now();
        Self {
            id: super::new_id(),
            name,
            slug,
            overview,
            jurisdiction: None,
            key_features: None,
            evidence_level: None,
            source_url: None,
            is_featured: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Framework listing filters
#[derive(Debug, Clone, Default)]
pub struct FrameworkFilter {
    pub featured_only: bool,
    pub limit: i64,
    pub offset: i64,
}
