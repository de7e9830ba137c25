// Event Routes

use crate::api::{
    models::{
        error::{ApiError, ApiErrorResponse},
        request::{page_params, EventListQuery},
        response::ApiResponse,
    },
    state::AppState,
};
use crate::db::{Database, EventFilter, EventRecord};
use axum::extract::{rejection::QueryRejection, Path, Query, State};
use chrono::Utc;
use std::sync::Arc;

/// List public events
#[utoipa::path(
    get,
    path = "/api/events",
    tag = "events",
    params(EventListQuery),
    responses(
        (status = 200, description = "Public events ordered by start date", body = [EventRecord]),
        (status = 400, description = "Invalid paging", body = ApiErrorResponse)
    )
)]
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    query: Result<Query<EventListQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<EventRecord>>, ApiError> {
    let Query(query) = query?;
    let (limit, offset) = page_params(query.limit, query.offset)?;

    let filter = EventFilter {
        starts_after: query.upcoming.unwrap_or(false).then(Utc::now),
        public_only: true,
        limit,
        offset,
    };

    let page = state.database()?.events().list(&filter).await?;
    Ok(ApiResponse::page(page))
}

/// Get a public event by slug
#[utoipa::path(
    get,
    path = "/api/events/{slug}",
    tag = "events",
    params(("slug" = String, Path, description = "Event slug")),
    responses(
        (status = 200, description = "Event", body = EventRecord),
        (status = 404, description = "Unknown or private event", body = ApiErrorResponse)
    )
)]
pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<ApiResponse<EventRecord>, ApiError> {
    let event = state
        .database()?
        .events()
        .get_by_slug(&slug)
        .await?
        .filter(|event| event.is_public)
        .ok_or_else(|| ApiError::not_found("Event", &slug))?;

    Ok(ApiResponse::ok(event))
}
