// People Routes

use crate::api::{
    models::{
        error::{ApiError, ApiErrorResponse},
        request::{page_params, FeaturedListQuery},
        response::{ApiResponse, PersonProfile},
    },
    state::AppState,
};
use crate::db::{Database, PersonFilter, PersonRecord};
use axum::extract::{rejection::QueryRejection, Path, Query, State};
use std::sync::Arc;

/// List public profiles
#[utoipa::path(
    get,
    path = "/api/people",
    tag = "people",
    params(FeaturedListQuery),
    responses(
        (status = 200, description = "Public profiles, featured first", body = [PersonRecord]),
        (status = 400, description = "Invalid paging", body = ApiErrorResponse)
    )
)]
pub async fn list_people(
    State(state): State<Arc<AppState>>,
    query: Result<Query<FeaturedListQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<PersonRecord>>, ApiError> {
    let Query(query) = query?;
    let (limit, offset) = page_params(query.limit, query.offset)?;

    let filter = PersonFilter {
        public_only: true,
        featured_only: query.featured.unwrap_or(false),
        limit,
        offset,
    };

    let page = state.database()?.people().list(&filter).await?;
    Ok(ApiResponse::page(page))
}

/// Get a public profile and its published stories
#[utoipa::path(
    get,
    path = "/api/people/{slug}",
    tag = "people",
    params(("slug" = String, Path, description = "Profile slug")),
    responses(
        (status = 200, description = "Profile with stories", body = PersonProfile),
        (status = 404, description = "Unknown or private profile", body = ApiErrorResponse)
    )
)]
pub async fn get_person(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<ApiResponse<PersonProfile>, ApiError> {
    let db = state.database()?;

    let person = db
        .people()
        .get_by_slug(&slug)
        .await?
        .filter(|person| person.is_public)
        .ok_or_else(|| ApiError::not_found("Person", &slug))?;
    let stories = db.stories().list_for_person(&person.id).await?;

    Ok(ApiResponse::ok(PersonProfile { person, stories }))
}
