// API Response Models

use crate::db::{
    NotificationRecord, OrganizationRecord, Page, Pagination, PersonRecord, ServiceRecord,
    StoryRecord,
};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Success envelope: `{ "success": true, "data": ..., "pagination"?: ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            pagination: None,
        }
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// Envelope for one page of a listing
    pub fn page(page: Page<T>) -> Self {
        let pagination = page.pagination();
        Self {
            success: true,
            data: page.items,
            pagination: Some(pagination),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// 201 wrapper for freshly created rows
pub struct Created<T>(pub T);

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(ApiResponse::ok(self.0))).into_response()
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,

    /// Uptime in seconds
    pub uptime_seconds: u64,

    /// Database connection status
    pub database: String,

    /// Whether Empathy Ledger syndication is configured
    pub empathy_ledger: bool,
}

/// Organization with its active services
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrganizationDetail {
    pub organization: OrganizationRecord,
    pub services: Vec<ServiceRecord>,
}

/// Public profile with its published stories
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PersonProfile {
    pub person: PersonRecord,
    pub stories: Vec<StoryRecord>,
}

/// A user's notifications plus their unread total
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationList {
    pub notifications: Vec<NotificationRecord>,
    pub unread_count: i64,
}

/// Result of marking notifications read
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct MarkReadResponse {
    /// Notifications that changed from unread to read
    pub updated: u64,
}

/// Result of an admin delete
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeletedResponse {
    pub id: String,
    pub deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_envelope_shape() {
        let page = Page::new(vec!["a", "b"], 3, 2, 0);
        let json = serde_json::to_value(ApiResponse::page(page)).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"].as_array().unwrap().len(), 2);
        assert_eq!(json["pagination"]["total"], 3);
        assert_eq!(json["pagination"]["has_more"], true);
    }

    #[test]
    fn test_single_envelope_omits_pagination() {
        let json = serde_json::to_value(ApiResponse::ok(MarkReadResponse { updated: 2 })).unwrap();
        assert!(json.get("pagination").is_none());
        assert_eq!(json["data"]["updated"], 2);
    }
}
