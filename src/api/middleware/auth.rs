// Authentication Middleware
//
// Public read routes pass through untouched. `/api/notifications` needs a
// User key and `/api/admin` an Admin key, sent in `X-API-Key`.

use crate::api::{config::Permission, models::error::ApiError, state::AppState};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Authentication extension inserted into request
#[derive(Debug, Clone)]
pub struct AuthExtension {
    pub permission: Permission,
    pub api_key: String,
}

/// Permission a path requires, if any
pub fn required_permission(path: &str) -> Option<Permission> {
    let under = |prefix: &str| path == prefix || path.starts_with(&format!("{}/", prefix));

    if under("/api/admin") {
        Some(Permission::Admin)
    } else if under("/api/notifications") {
        Some(Permission::User)
    } else {
        None
    }
}

/// Authentication middleware
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(required) = required_permission(req.uri().path()) else {
        return Ok(next.run(req).await);
    };

    // Extract API key from X-API-Key header
    let api_key = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing X-API-Key header".to_string()))?
        .to_string();

    // Validate API key
    let permission = state
        .config
        .validate_key(&api_key)
        .ok_or_else(|| ApiError::Unauthorized("Invalid API key".to_string()))?;

    check_permission(required, permission)?;
    state.rate_limiter.check(&api_key).await?;

    req.extensions_mut().insert(AuthExtension {
        permission,
        api_key,
    });

    Ok(next.run(req).await)
}

/// Check if user has required permission
pub fn check_permission(required: Permission, user_permission: Permission) -> Result<(), ApiError> {
    if user_permission.allows(required) {
        Ok(())
    } else {
        Err(ApiError::Forbidden("Insufficient permissions".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_permission() {
        assert_eq!(required_permission("/api/services"), None);
        assert_eq!(required_permission("/health"), None);
        assert_eq!(required_permission("/api/administrators"), None);
        assert_eq!(
            required_permission("/api/admin/events/abc"),
            Some(Permission::Admin)
        );
        assert_eq!(
            required_permission("/api/notifications/read"),
            Some(Permission::User)
        );
    }

    #[test]
    fn test_check_permission() {
        assert!(check_permission(Permission::User, Permission::Admin).is_ok());
        assert!(matches!(
            check_permission(Permission::Admin, Permission::User),
            Err(ApiError::Forbidden(_))
        ));
    }
}
