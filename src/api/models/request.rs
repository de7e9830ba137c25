// API Request Models
//
// Query strings and admin form bodies, with the validation the handlers run
// before touching the database.

use crate::api::models::error::ApiError;
use crate::db::models::service::{DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};
use crate::db::{EventRecord, FrameworkRecord, PersonRecord, ResearchRecord, ServiceSearch};
use crate::utils::search::non_blank;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::{IntoParams, ToSchema};

/// Earliest accepted research publication year
pub const MIN_PUBLICATION_YEAR: i32 = 1900;

/// Most notification ids accepted by one mark-read request
pub const MAX_MARK_READ_IDS: usize = 500;

/// Validate paging parameters, applying defaults
pub fn page_params(limit: Option<i64>, offset: Option<i64>) -> Result<(i64, i64), ApiError> {
    let limit = limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    if !(1..=MAX_SEARCH_LIMIT).contains(&limit) {
        return Err(ApiError::Validation(format!(
            "limit must be between 1 and {}",
            MAX_SEARCH_LIMIT
        )));
    }

    let offset = offset.unwrap_or(0);
    if offset < 0 {
        return Err(ApiError::Validation(
            "offset must be zero or greater".to_string(),
        ));
    }

    Ok((limit, offset))
}

fn require_text(field: &str, value: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

fn optional_url(field: &str, value: &Option<String>) -> Result<Option<String>, ApiError> {
    let Some(value) = non_blank(value.as_deref()) else {
        return Ok(None);
    };

    match Url::parse(&value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(Some(value)),
        _ => Err(ApiError::Validation(format!(
            "{} must be an absolute http(s) URL",
            field
        ))),
    }
}

fn optional_text(value: &Option<String>) -> Option<String> {
    non_blank(value.as_deref())
}

/// Plain paging query
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page size, 1-100 (default 20)
    pub limit: Option<i64>,
    /// Rows to skip (default 0)
    pub offset: Option<i64>,
}

impl PageQuery {
    pub fn resolve(&self) -> Result<(i64, i64), ApiError> {
        page_params(self.limit, self.offset)
    }
}

/// Service finder query string
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ServiceSearchQuery {
    /// Free text matched against name and description
    pub q: Option<String>,
    pub category: Option<String>,
    /// Australian state or territory code, e.g. QLD
    pub state: Option<String>,
    pub youth_specific: Option<bool>,
    pub indigenous_specific: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ServiceSearchQuery {
    pub fn into_search(self) -> Result<ServiceSearch, ApiError> {
        let (limit, offset) = page_params(self.limit, self.offset)?;
        Ok(ServiceSearch {
            query: non_blank(self.q.as_deref()),
            category: non_blank(self.category.as_deref()),
            state: non_blank(self.state.as_deref()),
            youth_specific: self.youth_specific,
            indigenous_specific: self.indigenous_specific,
            limit,
            offset,
        })
    }
}

/// Event listing query
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventListQuery {
    /// Only events starting now or later
    pub upcoming: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Listing query with a featured flag
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FeaturedListQuery {
    pub featured: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Research listing query
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResearchListQuery {
    pub category: Option<String>,
    /// Free text matched against title and summary
    pub q: Option<String>,
    pub featured: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Notification listing query
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NotificationListQuery {
    pub user_id: Option<String>,
    pub unread_only: Option<bool>,
    pub limit: Option<i64>,
}

impl NotificationListQuery {
    /// Returns (user_id, unread_only, limit)
    pub fn resolve(&self) -> Result<(String, bool, i64), ApiError> {
        let user_id = non_blank(self.user_id.as_deref())
            .ok_or_else(|| ApiError::Validation("user_id is required".to_string()))?;
        let (limit, _) = page_params(self.limit, None)?;
        Ok((user_id, self.unread_only.unwrap_or(false), limit))
    }
}

/// Mark notifications read
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MarkReadRequest {
    pub user_id: String,

    /// Specific notifications to mark
    #[serde(default)]
    pub notification_ids: Vec<String>,

    /// Mark every unread notification of the user
    #[serde(default)]
    pub mark_all: bool,
}

impl MarkReadRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        require_text("user_id", &self.user_id)?;
        if !self.mark_all && self.notification_ids.is_empty() {
            return Err(ApiError::Validation(
                "Provide notification_ids or set mark_all".to_string(),
            ));
        }
        if self.notification_ids.len() > MAX_MARK_READ_IDS {
            return Err(ApiError::Validation(format!(
                "At most {} notification_ids per request",
                MAX_MARK_READ_IDS
            )));
        }
        Ok(())
    }
}

/// Admin event form
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EventInput {
    pub title: String,
    pub description: Option<String>,
    #[schema(example = "workshop")]
    pub event_type: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub registration_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_public: bool,
}

fn default_true() -> bool {
    true
}

impl EventInput {
    /// Validate and write the editable fields onto `event`
    pub fn apply_to(&self, event: &mut EventRecord) -> Result<(), ApiError> {
        let title = require_text("title", &self.title)?;
        let event_type = require_text("event_type", &self.event_type)?;
        let registration_url = optional_url("registration_url", &self.registration_url)?;

        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(ApiError::Validation(
                    "end_date must not be before start_date".to_string(),
                ));
            }
        }

        event.title = title;
        event.event_type = event_type;
        event.description = optional_text(&self.description);
        event.start_date = self.start_date;
        event.end_date = self.end_date;
        event.location = optional_text(&self.location);
        event.registration_url = registration_url;
        event.is_public = self.is_public;
        event.updated_at = Utc::now();
        Ok(())
    }
}

/// Admin framework form
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FrameworkInput {
    pub name: String,
    pub overview: String,
    pub jurisdiction: Option<String>,
    pub key_features: Option<String>,
    pub evidence_level: Option<String>,
    pub source_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
}

impl FrameworkInput {
    pub fn apply_to(&self, framework: &mut FrameworkRecord) -> Result<(), ApiError> {
        framework.name = require_text("name", &self.name)?;
        framework.overview = require_text("overview", &self.overview)?;
        framework.source_url = optional_url("source_url", &self.source_url)?;
        framework.jurisdiction = optional_text(&self.jurisdiction);
        framework.key_features = optional_text(&self.key_features);
        framework.evidence_level = optional_text(&self.evidence_level);
        framework.is_featured = self.is_featured;
        framework.updated_at = Utc::now();
        Ok(())
    }
}

/// Admin profile form
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PersonInput {
    pub full_name: String,
    pub role_title: Option<String>,
    pub bio: Option<String>,
    pub photo_url: Option<String>,
    pub organization: Option<String>,
    #[serde(default = "default_true")]
    pub is_public: bool,
    #[serde(default)]
    pub is_featured: bool,
}

impl PersonInput {
    pub fn apply_to(&self, person: &mut PersonRecord) -> Result<(), ApiError> {
        person.full_name = require_text("full_name", &self.full_name)?;
        person.photo_url = optional_url("photo_url", &self.photo_url)?;
        person.role_title = optional_text(&self.role_title);
        person.bio = optional_text(&self.bio);
        person.organization = optional_text(&self.organization);
        person.is_public = self.is_public;
        person.is_featured = self.is_featured;
        person.updated_at = Utc::now();
        Ok(())
    }
}

/// Admin research form
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResearchInput {
    pub title: String,
    pub summary: String,
    pub authors: Option<String>,
    pub organization: Option<String>,
    pub publication_year: Option<i32>,
    #[schema(example = "evaluation")]
    pub category: String,
    pub jurisdiction: Option<String>,
    pub document_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
}

impl ResearchInput {
    pub fn apply_to(&self, item: &mut ResearchRecord) -> Result<(), ApiError> {
        let max_year = Utc::now().year() + 1;
        if let Some(year) = self.publication_year {
            if !(MIN_PUBLICATION_YEAR..=max_year).contains(&year) {
                return Err(ApiError::Validation(format!(
                    "publication_year must be between {} and {}",
                    MIN_PUBLICATION_YEAR, max_year
                )));
            }
        }

        item.title = require_text("title", &self.title)?;
        item.summary = require_text("summary", &self.summary)?;
        item.category = require_text("category", &self.category)?;
        item.document_url = optional_url("document_url", &self.document_url)?;
        item.authors = optional_text(&self.authors);
        item.organization = optional_text(&self.organization);
        item.jurisdiction = optional_text(&self.jurisdiction);
        item.publication_year = self.publication_year;
        item.is_featured = self.is_featured;
        item.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_input() -> EventInput {
        EventInput {
            title: "  Youth Justice Forum ".to_string(),
            description: Some("   ".to_string()),
            event_type: "forum".to_string(),
            start_date: Utc::now(),
            end_date: None,
            location: Some("Brisbane".to_string()),
            registration_url: Some("https://example.org/register".to_string()),
            is_public: true,
        }
    }

    #[test]
    fn test_page_params() {
        assert_eq!(page_params(None, None).unwrap(), (20, 0));
        assert_eq!(page_params(Some(100), Some(40)).unwrap(), (100, 40));
        assert!(page_params(Some(0), None).is_err());
        assert!(page_params(Some(101), None).is_err());
        assert!(page_params(None, Some(-1)).is_err());
    }

    #[test]
    fn test_search_query_drops_blank_filters() {
        let search = ServiceSearchQuery {
            q: Some("  ".to_string()),
            state: Some("qld".to_string()),
            ..Default::default()
        }
        .into_search()
        .unwrap();
        assert!(search.query.is_none());
        assert_eq!(search.state.as_deref(), Some("qld"));
        assert_eq!(search.limit, 20);
    }

    #[test]
    fn test_event_input_trims_and_clears_blank() {
        let mut event = EventRecord::new("x".into(), "x".into(), "x".into(), Utc::now());
        event_input().apply_to(&mut event).unwrap();
        assert_eq!(event.title, "Youth Justice Forum");
        assert!(event.description.is_none());
        assert_eq!(event.slug, "x");
    }

    #[test]
    fn test_event_end_before_start_rejected() {
        let mut input = event_input();
        input.end_date = Some(input.start_date - chrono::Duration::hours(1));
        let mut event = EventRecord::new("x".into(), "x".into(), "x".into(), Utc::now());
        assert!(matches!(
            input.apply_to(&mut event),
            Err(ApiError::Validation(_))
        ));
    }

    #[test]
    fn test_relative_or_non_http_urls_rejected() {
        let mut input = event_input();
        input.registration_url = Some("/register".to_string());
        let mut event = EventRecord::new("x".into(), "x".into(), "x".into(), Utc::now());
        assert!(input.apply_to(&mut event).is_err());

        input.registration_url = Some("javascript:alert(1)".to_string());
        assert!(input.apply_to(&mut event).is_err());
    }

    #[test]
    fn test_research_year_bounds() {
        let mut input = ResearchInput {
            title: "Diversion outcomes".to_string(),
            summary: "Summary".to_string(),
            authors: None,
            organization: None,
            publication_year: Some(1899),
            category: "evaluation".to_string(),
            jurisdiction: None,
            document_url: None,
            is_featured: false,
        };
        let mut item = ResearchRecord::new("x".into(), "x".into(), "x".into(), "x".into());
        assert!(input.apply_to(&mut item).is_err());

        input.publication_year = Some(Utc::now().year() + 2);
        assert!(input.apply_to(&mut item).is_err());

        input.publication_year = Some(2021);
        input.apply_to(&mut item).unwrap();
        assert_eq!(item.publication_year, Some(2021));
    }

    #[test]
    fn test_mark_read_requires_target() {
        let request = MarkReadRequest {
            user_id: "u1".to_string(),
            notification_ids: vec![],
            mark_all: false,
        };
        assert!(request.validate().is_err());

        let request = MarkReadRequest {
            user_id: " ".to_string(),
            notification_ids: vec![],
            mark_all: true,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_mark_read_caps_id_list() {
        let ids = |n: usize| (0..n).map(|i| format!("n-{}", i)).collect::<Vec<_>>();

        let at_cap = MarkReadRequest {
            user_id: "u1".to_string(),
            notification_ids: ids(MAX_MARK_READ_IDS),
            mark_all: false,
        };
        assert!(at_cap.validate().is_ok());

        let over = MarkReadRequest {
            notification_ids: ids(MAX_MARK_READ_IDS + 1),
            ..at_cap
        };
        assert!(matches!(over.validate(), Err(ApiError::Validation(_))));
    }
}
