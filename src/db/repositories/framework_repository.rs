// Framework Repository Implementation

use crate::db::connection::{BindValue, DatabasePool};
use crate::db::models::{FrameworkFilter, FrameworkRecord, Page};
use crate::db::traits::FrameworkRepository;
use async_trait::async_trait;

const FRAMEWORK_COLUMNS: &str = "id, name, slug, overview, jurisdiction, key_features, \
    evidence_level, source_url, is_featured, created_at, updated_at";

const FRAMEWORK_EDITABLE: &[&str] = &[
    "name",
    "overview",
    "jurisdiction",
    "key_features",
    "evidence_level",
    "source_url",
    "is_featured",
    "updated_at",
];

pub struct FrameworkRepositoryImpl {
    pool: DatabasePool,
}

impl FrameworkRepositoryImpl {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    fn editable_values(framework: &FrameworkRecord) -> Vec<BindValue> {
        vec![
            (&framework.name).into(),
            (&framework.overview).into(),
            (&framework.jurisdiction).into(),
            (&framework.key_features).into(),
            (&framework.evidence_level).into(),
            (&framework.source_url).into(),
            framework.is_featured.into(),
            framework.updated_at.into(),
        ]
    }
}

#[async_trait]
impl FrameworkRepository for FrameworkRepositoryImpl {
    async fn create_framework(&self, framework: &FrameworkRecord) -> crate::Result<()> {
        let mut columns = vec!["id", "slug", "created_at"];
        columns.extend_from_slice(FRAMEWORK_EDITABLE);
        let query = self.pool.query_builder().insert_query("frameworks", &columns);

        let mut bindings: Vec<BindValue> = vec![
            (&framework.id).into(),
            (&framework.slug).into(),
            framework.created_at.into(),
        ];
        bindings.extend(Self::editable_values(framework));

        self.pool.execute(&query, bindings).await?;
        Ok(())
    }

    async fn list(&self, filter: &FrameworkFilter) -> crate::Result<Page<FrameworkRecord>> {
        let mut count_qb = self.pool.query_builder();
        let (clause, count_bindings) = if filter.featured_only {
            (
                format!(" WHERE is_featured = {}", count_qb.placeholder()),
                vec![BindValue::Bool(true)],
            )
        } else {
            (String::new(), vec![])
        };
        let total = self
            .pool
            .fetch_count(&format!("SELECT COUNT(*) FROM frameworks{}", clause), count_bindings)
            .await?;

        let mut qb = self.pool.query_builder();
        let mut bindings = Vec::new();
        let clause = if filter.featured_only {
            bindings.push(BindValue::Bool(true));
            format!(" WHERE is_featured = {}", qb.placeholder())
        } else {
            String::new()
        };
        let query = format!(
            "SELECT {} FROM frameworks{} ORDER BY is_featured DESC, name ASC LIMIT {} OFFSET {}",
            FRAMEWORK_COLUMNS,
            clause,
            qb.placeholder(),
            qb.placeholder()
        );
        bindings.push(filter.limit.into());
        bindings.push(filter.offset.into());

        let items = self.pool.fetch_all_as(&query, bindings).await?;
        Ok(Page::new(items, total, filter.limit, filter.offset))
    }

    async fn get_by_id(&self, id: &str) -> crate::Result<Option<FrameworkRecord>> {
        let query = self
            .pool
            .query_builder()
            .select_where_query("frameworks", FRAMEWORK_COLUMNS, "id");
        self.pool.fetch_optional_as(&query, vec![id.into()]).await
    }

    async fn get_by_slug(&self, slug: &str) -> crate::Result<Option<FrameworkRecord>> {
        let query = self
            .pool
            .query_builder()
            .select_where_query("frameworks", FRAMEWORK_COLUMNS, "slug");
        self.pool.fetch_optional_as(&query, vec![slug.into()]).await
    }

    async fn update_framework(&self, framework: &FrameworkRecord) -> crate::Result<bool> {
        let query = self
            .pool
            .query_builder()
            .update_query("frameworks", FRAMEWORK_EDITABLE, "id");
        let mut bindings = Self::editable_values(framework);
        bindings.push((&framework.id).into());

        Ok(self.pool.execute(&query, bindings).await? > 0)
    }

    async fn delete_framework(&self, id: &str) -> crate::Result<bool> {
        let mut qb = self.pool.query_builder();
        let query = format!("DELETE FROM frameworks WHERE id = {}", qb.placeholder());
        Ok(self.pool.execute(&query, vec![id.into()]).await? > 0)
    }

    async fn slug_exists(&self, slug: &str) -> crate::Result<bool> {
        let mut qb = self.pool.query_builder();
        let query = format!("SELECT COUNT(*) FROM frameworks WHERE slug = {}", qb.placeholder());
        Ok(self.pool.fetch_count(&query, vec![slug.into()]).await? > 0)
    }
}
