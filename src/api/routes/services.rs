// Service Finder Routes

use crate::api::{
    models::{
        error::{ApiError, ApiErrorResponse},
        request::ServiceSearchQuery,
        response::ApiResponse,
    },
    state::AppState,
};
use crate::db::{CategoryCount, Database, ServiceRecord};
use axum::extract::{rejection::QueryRejection, Path, Query, State};
use std::sync::Arc;

/// Search services
///
/// Active services filtered by text, category, state and audience, ordered by name
#[utoipa::path(
    get,
    path = "/api/services",
    tag = "services",
    params(ServiceSearchQuery),
    responses(
        (status = 200, description = "Matching services with pagination", body = [ServiceRecord]),
        (status = 400, description = "Invalid filters or paging", body = ApiErrorResponse)
    )
)]
pub async fn search_services(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ServiceSearchQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<ServiceRecord>>, ApiError> {
    let Query(query) = query?;
    let search = query.into_search()?;

    let page = state.database()?.services().search(&search).await?;
    Ok(ApiResponse::page(page))
}

/// Get one service
#[utoipa::path(
    get,
    path = "/api/services/{id}",
    tag = "services",
    params(("id" = String, Path, description = "Service ID")),
    responses(
        (status = 200, description = "Service", body = ServiceRecord),
        (status = 404, description = "Unknown service", body = ApiErrorResponse)
    )
)]
pub async fn get_service(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<ApiResponse<ServiceRecord>, ApiError> {
    let service = state
        .database()?
        .services()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Service", &id))?;

    Ok(ApiResponse::ok(service))
}

/// Service categories
///
/// Number of active services per category
#[utoipa::path(
    get,
    path = "/api/services/categories",
    tag = "services",
    responses(
        (status = 200, description = "Category counts", body = [CategoryCount])
    )
)]
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<ApiResponse<Vec<CategoryCount>>, ApiError> {
    let categories = state.database()?.services().count_by_category().await?;
    Ok(ApiResponse::ok(categories))
}
