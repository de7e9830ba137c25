// Health Check Route

use crate::api::{
    models::{
        error::{ApiError, ApiErrorResponse},
        response::{ApiResponse, HealthResponse},
    },
    state::AppState,
};
use axum::extract::State;
use std::sync::Arc;

/// Health check endpoint
///
/// Returns 200 while the database answers, 503 otherwise
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = ApiErrorResponse)
    )
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> Result<ApiResponse<HealthResponse>, ApiError> {
    let db = state.database()?;

    db.ping()
        .await
        .map_err(|e| ApiError::ServiceUnavailable(format!("Database unreachable: {}", e)))?;

    Ok(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        database: "connected".to_string(),
        empathy_ledger: state.empathy_ledger.is_some(),
    }))
}
