// Research Record Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Research item (report, evaluation, paper) in database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ResearchRecord {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub summary: String,
    pub authors: Option<String>,
    pub organization: Option<String>,
    pub publication_year: Option<i32>,
    pub category: String,
    pub jurisdiction: Option<String>,
    pub document_url: Option<String>,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResearchRecord {
    pub fn new(title: String, slug: String, summary: String, category: String) -> Self {
        let now = Utc::now();
        Self {
            id: super::new_id(),
            title,
            slug,
            summary,
            authors: None,
            organization: None,
            publication_year: None,
            category,
            jurisdiction: None,
            document_url: None,
            is_featured: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Research listing filters
#[derive(Debug, Clone, Default)]
pub struct ResearchFilter {
    pub category: Option<String>,
    /// Free-text match on title and summary
    pub query: Option<String>,
    pub featured_only: bool,
    pub limit: i64,
    pub offset: i64,
}
