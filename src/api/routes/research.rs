// Research Routes

use crate::api::{
    models::{
        error::{ApiError, ApiErrorResponse},
        request::{page_params, ResearchListQuery},
        response::ApiResponse,
    },
    state::AppState,
};
use crate::db::{Database, ResearchFilter, ResearchRecord};
use crate::utils::search::non_blank;
use axum::extract::{rejection::QueryRejection, Path, Query, State};
use std::sync::Arc;

/// List research items
#[utoipa::path(
    get,
    path = "/api/research",
    tag = "research",
    params(ResearchListQuery),
    responses(
        (status = 200, description = "Research, newest first", body = [ResearchRecord]),
        (status = 400, description = "Invalid paging", body = ApiErrorResponse)
    )
)]
pub async fn list_research(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ResearchListQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<ResearchRecord>>, ApiError> {
    let Query(query) = query?;
    let (limit, offset) = page_params(query.limit, query.offset)?;

    let filter = ResearchFilter {
        category: non_blank(query.category.as_deref()),
        query: non_blank(query.q.as_deref()),
        featured_only: query.featured.unwrap_or(false),
        limit,
        offset,
    };

    let page = state.database()?.research().list(&filter).await?;
    Ok(ApiResponse::page(page))
}

#[utoipa::path(
    get,
    path = "/api/research/{slug}",
    tag = "research",
    params(("slug" = String, Path, description = "Research slug")),
    responses(
        (status = 200, description = "Research item", body = ResearchRecord),
        (status = 404, description = "Unknown research item", body = ApiErrorResponse)
    )
)]
pub async fn get_research(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<ApiResponse<ResearchRecord>, ApiError> {
    let item = state
        .database()?
        .research()
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::not_found("Research item", &slug))?;

    Ok(ApiResponse::ok(item))
}
