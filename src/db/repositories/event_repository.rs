// Event Repository Implementation

use crate::db::connection::{BindValue, DatabasePool, QueryBuilder};
use crate::db::models::{EventFilter, EventRecord, Page};
use crate::db::traits::EventRepository;
use async_trait::async_trait;

const EVENT_COLUMNS: &str = "id, title, slug, description, event_type, start_date, end_date, \
    location, registration_url, is_public, created_at, updated_at";

/// Columns replaced by an update; id, slug and created_at never change
const EVENT_EDITABLE: &[&str] = &[
    "title",
    "description",
    "event_type",
    "start_date",
    "end_date",
    "location",
    "registration_url",
    "is_public",
    "updated_at",
];

pub struct EventRepositoryImpl {
    pool: DatabasePool,
}

impl EventRepositoryImpl {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    fn editable_values(event: &EventRecord) -> Vec<BindValue> {
        vec![
            (&event.title).into(),
            (&event.description).into(),
            (&event.event_type).into(),
            event.start_date.into(),
            event.end_date.into(),
            (&event.location).into(),
            (&event.registration_url).into(),
            event.is_public.into(),
            event.updated_at.into(),
        ]
    }

    fn filter_clause(qb: &mut QueryBuilder, filter: &EventFilter) -> (String, Vec<BindValue>) {
        let mut conditions = Vec::new();
        let mut bindings: Vec<BindValue> = Vec::new();
        if filter.public_only {
            conditions.push(format!("is_public = {}", qb.placeholder()));
            bindings.push(true.into());
        }
        if let Some(after) = filter.starts_after {
            conditions.push(format!("start_date >= {}", qb.placeholder()));
            bindings.push(after.into());
        }

        if conditions.is_empty() {
            (String::new(), bindings)
        } else {
            (format!(" WHERE {}", conditions.join(" AND ")), bindings)
        }
    }
}

#[async_trait]
impl EventRepository for EventRepositoryImpl {
    async fn create_event(&self, event: &EventRecord) -> crate::Result<()> {
        let mut columns = vec!["id", "slug", "created_at"];
        columns.extend_from_slice(EVENT_EDITABLE);
        let query = self.pool.query_builder().insert_query("events", &columns);

        let mut bindings: Vec<BindValue> =
            vec![(&event.id).into(), (&event.slug).into(), event.created_at.into()];
        bindings.extend(Self::editable_values(event));

        self.pool.execute(&query, bindings).await?;
        Ok(())
    }

    async fn list(&self, filter: &EventFilter) -> crate::Result<Page<EventRecord>> {
        let mut count_qb = self.pool.query_builder();
        let (clause, bindings) = Self::filter_clause(&mut count_qb, filter);
        let total = self
            .pool
            .fetch_count(&format!("SELECT COUNT(*) FROM events{}", clause), bindings)
            .await?;

        let mut qb = self.pool.query_builder();
        let (clause, mut bindings) = Self::filter_clause(&mut qb, filter);
        let query = format!(
            "SELECT {} FROM events{} ORDER BY start_date ASC, id ASC LIMIT {} OFFSET {}",
            EVENT_COLUMNS,
            clause,
            qb.placeholder(),
            qb.placeholder()
        );
        bindings.push(filter.limit.into());
        bindings.push(filter.offset.into());

        let items = self.pool.fetch_all_as(&query, bindings).await?;
        Ok(Page::new(items, total, filter.limit, filter.offset))
    }

    async fn get_by_id(&self, id: &str) -> crate::Result<Option<EventRecord>> {
        let query = self
            .pool
            .query_builder()
            .select_where_query("events", EVENT_COLUMNS, "id");
        self.pool.fetch_optional_as(&query, vec![id.into()]).await
    }

    async fn get_by_slug(&self, slug: &str) -> crate::Result<Option<EventRecord>> {
        let query = self
            .pool
            .query_builder()
            .select_where_query("events", EVENT_COLUMNS, "slug");
        self.pool.fetch_optional_as(&query, vec![slug.into()]).await
    }

    async fn update_event(&self, event: &EventRecord) -> crate::Result<bool> {
        let query = self
            .pool
            .query_builder()
            .update_query("events", EVENT_EDITABLE, "id");
        let mut bindings = Self::editable_values(event);
        bindings.push((&event.id).into());

        Ok(self.pool.execute(&query, bindings).await? > 0)
    }

    async fn delete_event(&self, id: &str) -> crate::Result<bool> {
        let mut qb = self.pool.query_builder();
        let query = format!("DELETE FROM events WHERE id = {}", qb.placeholder());
        Ok(self.pool.execute(&query, vec![id.into()]).await? > 0)
    }

    async fn slug_exists(&self, slug: &str) -> crate::Result<bool> {
        let mut qb = self.pool.query_builder();
        let query = format!("SELECT COUNT(*) FROM events WHERE slug = {}", qb.placeholder());
        Ok(self.pool.fetch_count(&query, vec![slug.into()]).await? > 0)
    }
}
