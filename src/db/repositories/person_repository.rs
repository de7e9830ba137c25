// Person Repository Implementation

use crate::db::connection::{BindValue, DatabasePool, QueryBuilder};
use crate::db::models::{Page, PersonFilter, PersonRecord};
use crate::db::traits::PersonRepository;
use async_trait::async_trait;

const PERSON_COLUMNS: &str = "id, full_name, slug, role_title, bio, photo_url, organization, \
    is_public, is_featured, empathy_ledger_id, last_synced_at, created_at, updated_at";

const PERSON_EDITABLE: &[&str] = &[
    "full_name",
    "role_title",
    "bio",
    "photo_url",
    "organization",
    "is_public",
    "is_featured",
    "empathy_ledger_id",
    "last_synced_at",
    "updated_at",
];

pub struct PersonRepositoryImpl {
    pool: DatabasePool,
}

impl PersonRepositoryImpl {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    fn editable_values(person: &PersonRecord) -> Vec<BindValue> {
        vec![
            (&person.full_name).into(),
            (&person.role_title).into(),
            (&person.bio).into(),
            (&person.photo_url).into(),
            (&person.organization).into(),
            person.is_public.into(),
            person.is_featured.into(),
            (&person.empathy_ledger_id).into(),
            person.last_synced_at.into(),
            person.updated_at.into(),
        ]
    }

    fn filter_clause(qb: &mut QueryBuilder, filter: &PersonFilter) -> (String, Vec<BindValue>) {
        let mut conditions = Vec::new();
        let mut bindings = Vec::new();
        if filter.public_only {
            conditions.push(format!("is_public = {}", qb.placeholder()));
            bindings.push(BindValue::Bool(true));
        }
        if filter.featured_only {
            conditions.push(format!("is_featured = {}", qb.placeholder()));
            bindings.push(BindValue::Bool(true));
        }

        if conditions.is_empty() {
            (String::new(), bindings)
        } else {
            (format!(" WHERE {}", conditions.join(" AND ")), bindings)
        }
    }
}

#[async_trait]
impl PersonRepository for PersonRepositoryImpl {
    async fn create_person(&self, person: &PersonRecord) -> crate::Result<()> {
        let mut columns = vec!["id", "slug", "created_at"];
        columns.extend_from_slice(PERSON_EDITABLE);
        let query = self.pool.query_builder().insert_query("people", &columns);

        let mut bindings: Vec<BindValue> =
            vec![(&person.id).into(), (&person.slug).into(), person.created_at.into()];
        bindings.extend(Self::editable_values(person));

        self.pool.execute(&query, bindings).await?;
        Ok(())
    }

    async fn list(&self, filter: &PersonFilter) -> crate::Result<Page<PersonRecord>> {
        let mut count_qb = self.pool.query_builder();
        let (clause, bindings) = Self::filter_clause(&mut count_qb, filter);
        let total = self
            .pool
            .fetch_count(&format!("SELECT COUNT(*) FROM people{}", clause), bindings)
            .await?;

        let mut qb = self.pool.query_builder();
        let (clause, mut bindings) = Self::filter_clause(&mut qb, filter);
        let query = format!(
            "SELECT {} FROM people{} ORDER BY is_featured DESC, full_name ASC, id ASC LIMIT {} OFFSET {}",
            PERSON_COLUMNS,
            clause,
            qb.placeholder(),
            qb.placeholder()
        );
        bindings.push(filter.limit.into());
        bindings.push(filter.offset.into());

        let items = self.pool.fetch_all_as(&query, bindings).await?;
        Ok(Page::new(items, total, filter.limit, filter.offset))
    }

    async fn get_by_id(&self, id: &str) -> crate::Result<Option<PersonRecord>> {
        let query = self
            .pool
            .query_builder()
            .select_where_query("people", PERSON_COLUMNS, "id");
        self.pool.fetch_optional_as(&query, vec![id.into()]).await
    }

    async fn get_by_slug(&self, slug: &str) -> crate::Result<Option<PersonRecord>> {
        let query = self
            .pool
            .query_builder()
            .select_where_query("people", PERSON_COLUMNS, "slug");
        self.pool.fetch_optional_as(&query, vec![slug.into()]).await
    }

    async fn get_by_empathy_ledger_id(&self, external_id: &str) -> crate::Result<Option<PersonRecord>> {
        let query = self
            .pool
            .query_builder()
            .select_where_query("people", PERSON_COLUMNS, "empathy_ledger_id");
        self.pool.fetch_optional_as(&query, vec![external_id.into()]).await
    }

    async fn update_person(&self, person: &PersonRecord) -> crate::Result<bool> {
        let query = self
            .pool
            .query_builder()
            .update_query("people", PERSON_EDITABLE, "id");
        let mut bindings = Self::editable_values(person);
        bindings.push((&person.id).into());

        Ok(self.pool.execute(&query, bindings).await? > 0)
    }

    async fn delete_person(&self, id: &str) -> crate::Result<bool> {
        let mut qb = self.pool.query_builder();
        let query = format!("DELETE FROM people WHERE id = {}", qb.placeholder());
        Ok(self.pool.execute(&query, vec![id.into()]).await? > 0)
    }

    async fn slug_exists(&self, slug: &str) -> crate::Result<bool> {
        let mut qb = self.pool.query_builder();
        let query = format!("SELECT COUNT(*) FROM people WHERE slug = {}", qb.placeholder());
        Ok(self.pool.fetch_count(&query, vec![slug.into()]).await? > 0)
    }
}
