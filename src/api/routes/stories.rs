// Story Routes

use crate::api::{
    models::{
        error::{ApiError, ApiErrorResponse},
        request::PageQuery,
        response::ApiResponse,
    },
    state::AppState,
};
use crate::db::{Database, StoryRecord};
use axum::extract::{rejection::QueryRejection, Path, Query, State};
use std::sync::Arc;

/// List published stories
#[utoipa::path(
    get,
    path = "/api/stories",
    tag = "stories",
    params(PageQuery),
    responses(
        (status = 200, description = "Published stories, newest first", body = [StoryRecord]),
        (status = 400, description = "Invalid paging", body = ApiErrorResponse)
    )
)]
pub async fn list_stories(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<StoryRecord>>, ApiError> {
    let Query(query) = query?;
    let (limit, offset) = query.resolve()?;

    let page = state.database()?.stories().list_published(limit, offset).await?;
    Ok(ApiResponse::page(page))
}

/// Get a published story by slug
#[utoipa::path(
    get,
    path = "/api/stories/{slug}",
    tag = "stories",
    params(("slug" = String, Path, description = "Story slug")),
    responses(
        (status = 200, description = "Story", body = StoryRecord),
        (status = 404, description = "Unknown or unpublished story", body = ApiErrorResponse)
    )
)]
pub async fn get_story(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<ApiResponse<StoryRecord>, ApiError> {
    let story = state
        .database()?
        .stories()
        .get_by_slug(&slug)
        .await?
        .filter(|story| story.is_published())
        .ok_or_else(|| ApiError::not_found("Story", &slug))?;

    Ok(ApiResponse::ok(story))
}
