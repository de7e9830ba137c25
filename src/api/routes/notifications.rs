// Notification Routes

use crate::api::{
    models::{
        error::{ApiError, ApiErrorResponse},
        request::{MarkReadRequest, NotificationListQuery},
        response::{ApiResponse, MarkReadResponse, NotificationList},
    },
    state::AppState,
};
use crate::db::Database;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use std::sync::Arc;
use tracing::debug;

/// List a user's notifications
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = "notifications",
    params(NotificationListQuery),
    responses(
        (status = 200, description = "Notifications, newest first", body = NotificationList),
        (status = 400, description = "Missing user_id or bad limit", body = ApiErrorResponse),
        (status = 401, description = "Missing or invalid API key", body = ApiErrorResponse)
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn list_notifications(
    State(state): State<Arc<AppState>>,
    query: Result<Query<NotificationListQuery>, QueryRejection>,
) -> Result<ApiResponse<NotificationList>, ApiError> {
    let Query(query) = query?;
    let (user_id, unread_only, limit) = query.resolve()?;

    let db = state.database()?;
    let notifications = db
        .notifications()
        .list_for_user(&user_id, unread_only, limit)
        .await?;
    let unread_count = db.notifications().unread_count(&user_id).await?;

    Ok(ApiResponse::ok(NotificationList {
        notifications,
        unread_count,
    }))
}

/// Mark notifications read
///
/// Marks the listed notifications, or all of them with `mark_all`. Ids that
/// belong to another user are ignored.
#[utoipa::path(
    post,
    path = "/api/notifications/read",
    tag = "notifications",
    request_body = MarkReadRequest,
    responses(
        (status = 200, description = "Number of notifications marked", body = MarkReadResponse),
        (status = 400, description = "Nothing to mark", body = ApiErrorResponse),
        (status = 401, description = "Missing or invalid API key", body = ApiErrorResponse)
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn mark_read(
    State(state): State<Arc<AppState>>,
    body: Result<Json<MarkReadRequest>, JsonRejection>,
) -> Result<ApiResponse<MarkReadResponse>, ApiError> {
    let Json(request) = body?;
    request.validate()?;

    let user_id = request.user_id.trim();
    let notifications = state.database()?.notifications();

    let updated = if request.mark_all {
        notifications.mark_all_read(user_id).await?
    } else {
        notifications
            .mark_read(user_id, &request.notification_ids)
            .await?
    };

    debug!("Marked {} notifications read for {}", updated, user_id);
    Ok(ApiResponse::ok(MarkReadResponse { updated }))
}
