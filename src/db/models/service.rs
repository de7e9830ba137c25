// Service Record Model
// Youth justice services surfaced by the service finder

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Default number of services per page
pub const DEFAULT_SEARCH_LIMIT: i64 = 20;

/// Largest page a caller may request
pub const MAX_SEARCH_LIMIT: i64 = 100;

/// Service record in database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ServiceRecord {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub category: String,
    pub organization_id: Option<String>,
    pub location_city: Option<String>,
    pub location_state: Option<String>,
    pub postcode: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub youth_specific: bool,
    pub indigenous_specific: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceRecord {
    /// Create new active service record
    pub fn new(name: String, slug: String, category: String) -> Self {
        let now = Utc::now();
        Self {
            id: super::new_id(),
            name,
            slug,
            description: None,
            category,
            organization_id: None,
            location_city: None,
            location_state: None,
            postcode: None,
            phone: None,
            email: None,
            website: None,
            youth_specific: false,
            indigenous_specific: false,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set location; states are stored upper-case
    pub fn with_location(mut self, city: &str, state: &str) -> Self {
        self.location_city = Some(city.to_string());
        self.location_state = Some(state.to_uppercase());
        self
    }

    /// Attach to an organization
    pub fn with_organization(mut self, organization_id: &str) -> Self {
        self.organization_id = Some(organization_id.to_string());
        self
    }
}

/// Service finder filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSearch {
    pub query: Option<String>,
    pub category: Option<String>,
    pub state: Option<String>,
    pub youth_specific: Option<bool>,
    pub indigenous_specific: Option<bool>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for ServiceSearch {
    fn default() -> Self {
        Self {
            query: None,
            category: None,
            state: None,
            youth_specific: None,
            indigenous_specific: None,
            limit: DEFAULT_SEARCH_LIMIT,
            offset: 0,
        }
    }
}

/// Number of active services in a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CategoryCount {
    pub category: String,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_record_defaults() {
        let service = ServiceRecord::new(
            "Bail Support".to_string(),
            "bail-support".to_string(),
            "legal".to_string(),
        )
        .with_location("Townsville", "qld");

        assert!(service.is_active);
        assert_eq!(service.location_state.as_deref(), Some("QLD"));
        assert_eq!(service.id.len(), 36);
    }
}
