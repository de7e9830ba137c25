// Notification Repository Implementation

use crate::db::connection::{BindValue, DatabasePool};
use crate::db::models::NotificationRecord;
use crate::db::traits::NotificationRepository;
use async_trait::async_trait;
use chrono::Utc;

const NOTIFICATION_COLUMNS: &str =
    "id, user_id, title, message, link, is_read, read_at, created_at";

pub struct NotificationRepositoryImpl {
    pool: DatabasePool,
}

impl NotificationRepositoryImpl {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for NotificationRepositoryImpl {
    async fn create_notification(&self, notification: &NotificationRecord) -> crate::Result<()> {
        let query = self.pool.query_builder().insert_query(
            "notifications",
            &[
                "id",
                "user_id",
                "title",
                "message",
                "link",
                "is_read",
                "read_at",
                "created_at",
            ],
        );

        self.pool
            .execute(
                &query,
                vec![
                    (&notification.id).into(),
                    (&notification.user_id).into(),
                    (&notification.title).into(),
                    (&notification.message).into(),
                    (&notification.link).into(),
                    notification.is_read.into(),
                    notification.read_at.into(),
                    notification.created_at.into(),
                ],
            )
            .await?;

        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        unread_only: bool,
        limit: i64,
    ) -> crate::Result<Vec<NotificationRecord>> {
        let mut qb = self.pool.query_builder();
        let mut bindings: Vec<BindValue> = vec![user_id.into()];
        let mut query = format!(
            "SELECT {} FROM notifications WHERE user_id = {}",
            NOTIFICATION_COLUMNS,
            qb.placeholder()
        );

        if unread_only {
            query.push_str(&format!(" AND is_read = {}", qb.placeholder()));
            bindings.push(false.into());
        }

        query.push_str(&format!(
            " ORDER BY created_at DESC, id ASC LIMIT {}",
            qb.placeholder()
        ));
        bindings.push(limit.into());

        self.pool.fetch_all_as(&query, bindings).await
    }

    async fn unread_count(&self, user_id: &str) -> crate::Result<i64> {
        let mut qb = self.pool.query_builder();
        let query = format!(
            "SELECT COUNT(*) FROM notifications WHERE user_id = {} AND is_read = {}",
            qb.placeholder(),
            qb.placeholder()
        );
        self.pool
            .fetch_count(&query, vec![user_id.into(), false.into()])
            .await
    }

    async fn mark_read(&self, user_id: &str, ids: &[String]) -> crate::Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut qb = self.pool.query_builder();
        let query = format!(
            "UPDATE notifications SET is_read = {}, read_at = {} \
             WHERE user_id = {} AND is_read = {} AND id IN ({})",
            qb.placeholder(),
            qb.placeholder(),
            qb.placeholder(),
            qb.placeholder(),
            qb.placeholders(ids.len())
        );

        let mut bindings: Vec<BindValue> = vec![
            true.into(),
            Utc::now().into(),
            user_id.into(),
            false.into(),
        ];
        bindings.extend(ids.iter().map(BindValue::from));

        self.pool.execute(&query, bindings).await
    }

    async fn mark_all_read(&self, user_id: &str) -> crate::Result<u64> {
        let mut qb = self.pool.query_builder();
        let query = format!(
            "UPDATE notifications SET is_read = {}, read_at = {} WHERE user_id = {} AND is_read = {}",
            qb.placeholder(),
            qb.placeholder(),
            qb.placeholder(),
            qb.placeholder()
        );

        self.pool
            .execute(
                &query,
                vec![true.into(), Utc::now().into(), user_id.into(), false.into()],
            )
            .await
    }
}
