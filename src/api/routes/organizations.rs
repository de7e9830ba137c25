// Organization Routes

use crate::api::{
    models::{
        error::{ApiError, ApiErrorResponse},
        request::PageQuery,
        response::{ApiResponse, OrganizationDetail},
    },
    state::AppState,
};
use crate::db::{Database, OrganizationRecord};
use axum::extract::{rejection::QueryRejection, Path, Query, State};
use std::sync::Arc;

/// List organizations
#[utoipa::path(
    get,
    path = "/api/organizations",
    tag = "organizations",
    params(PageQuery),
    responses(
        (status = 200, description = "Organizations ordered by name", body = [OrganizationRecord]),
        (status = 400, description = "Invalid paging", body = ApiErrorResponse)
    )
)]
pub async fn list_organizations(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<OrganizationRecord>>, ApiError> {
    let Query(query) = query?;
    let (limit, offset) = query.resolve()?;

    let page = state.database()?.organizations().list(limit, offset).await?;
    Ok(ApiResponse::page(page))
}

/// Get an organization and the active services it runs
#[utoipa::path(
    get,
    path = "/api/organizations/{id}",
    tag = "organizations",
    params(("id" = String, Path, description = "Organization ID")),
    responses(
        (status = 200, description = "Organization with services", body = OrganizationDetail),
        (status = 404, description = "Unknown organization", body = ApiErrorResponse)
    )
)]
pub async fn get_organization(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<ApiResponse<OrganizationDetail>, ApiError> {
    let db = state.database()?;

    let organization = db
        .organizations()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Organization", &id))?;
    let services = db.services().list_for_organization(&id).await?;

    Ok(ApiResponse::ok(OrganizationDetail {
        organization,
        services,
    }))
}
