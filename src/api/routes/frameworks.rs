// Framework Routes

use crate::api::{
    models::{
        error::{ApiError, ApiErrorResponse},
        request::{page_params, FeaturedListQuery},
        response::ApiResponse,
    },
    state::AppState,
};
use crate::db::{Database, FrameworkFilter, FrameworkRecord};
use axum::extract::{rejection::QueryRejection, Path, Query, State};
use std::sync::Arc;

/// List frameworks
#[utoipa::path(
    get,
    path = "/api/frameworks",
    tag = "frameworks",
    params(FeaturedListQuery),
    responses(
        (status = 200, description = "Frameworks, featured first", body = [FrameworkRecord]),
        (status = 400, description = "Invalid paging", body = ApiErrorResponse)
    )
)]
pub async fn list_frameworks(
    State(state): State<Arc<AppState>>,
    query: Result<Query<FeaturedListQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<FrameworkRecord>>, ApiError> {
    let Query(query) = query?;
    let (limit, offset) = page_params(query.limit, query.offset)?;

    let filter = FrameworkFilter {
        featured_only: query.featured.unwrap_or(false),
        limit,
        offset,
    };

    let page = state.database()?.frameworks().list(&filter).await?;
    Ok(ApiResponse::page(page))
}

#[utoipa::path(
    get,
    path = "/api/frameworks/{slug}",
    tag = "frameworks",
    params(("slug" = String, Path, description = "Framework slug")),
    responses(
        (status = 200, description = "Framework", body = FrameworkRecord),
        (status = 404, description = "Unknown framework", body = ApiErrorResponse)
    )
)]
pub async fn get_framework(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<ApiResponse<FrameworkRecord>, ApiError> {
    let framework = state
        .database()?
        .frameworks()
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| ApiError::not_found("Framework", &slug))?;

    Ok(ApiResponse::ok(framework))
}
