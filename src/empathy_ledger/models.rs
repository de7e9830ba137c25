// Empathy Ledger wire models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storyteller profile as published by Empathy Ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalProfile {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub organization_name: Option<String>,
    /// Consent flag; absent means private
    #[serde(default)]
    pub is_public: bool,
}

/// Story as published by Empathy Ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalStory {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub storyteller_id: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// Paged list envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Option<ListPagination>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ListPagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub has_more: bool,
}
