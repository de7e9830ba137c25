// Empathy Ledger Sync Route

use crate::api::{
    models::{
        error::{ApiError, ApiErrorResponse},
        response::ApiResponse,
    },
    state::AppState,
};
use crate::empathy_ledger::{EmpathyLedgerSync, SyncReport};
use axum::extract::State;
use std::sync::Arc;

/// Run one Empathy Ledger sync pass
#[utoipa::path(
    post,
    path = "/api/admin/sync/empathy-ledger",
    tag = "admin",
    responses(
        (status = 200, description = "Sync report", body = SyncReport),
        (status = 403, description = "Admin key required", body = ApiErrorResponse),
        (status = 500, description = "Empathy Ledger request failed", body = ApiErrorResponse),
        (status = 503, description = "Integration not configured", body = ApiErrorResponse)
    ),
    security(
        ("api_key" = [])
    )
)]
pub async fn sync_empathy_ledger(
    State(state): State<Arc<AppState>>,
) -> Result<ApiResponse<SyncReport>, ApiError> {
    let client = state.empathy_ledger()?;
    let db = state.database()?;

    let report = EmpathyLedgerSync::new(client, db).run().await?;
    Ok(ApiResponse::ok(report))
}
