// Notification Record Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// In-app notification addressed to one user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct NotificationRecord {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl NotificationRecord {
    /// Create new unread notification
    pub fn new(user_id: String, title: String, message: String) -> Self {
        Self {
            id: super::new_id(),
            user_id,
            title,
            message,
            link: None,
            is_read: false,
            read_at: None,
            created_at: Utc::now(),
        }
    }
}
