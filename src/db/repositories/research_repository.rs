// Research Repository Implementation

use crate::db::connection::{BindValue, DatabasePool, QueryBuilder};
use crate::db::models::{Page, ResearchFilter, ResearchRecord};
use crate::db::traits::ResearchRepository;
use crate::utils::{like_pattern, search_text};
use async_trait::async_trait;

const RESEARCH_COLUMNS: &str = "id, title, slug, summary, authors, organization, publication_year, \
    category, jurisdiction, document_url, is_featured, created_at, updated_at";

const RESEARCH_EDITABLE: &[&str] = &[
    "title",
    "summary",
    "authors",
    "organization",
    "publication_year",
    "category",
    "jurisdiction",
    "document_url",
    "is_featured",
    "search_text",
    "updated_at",
];

pub struct ResearchRepositoryImpl {
    pool: DatabasePool,
}

impl ResearchRepositoryImpl {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    fn editable_values(item: &ResearchRecord) -> Vec<BindValue> {
        vec![
            (&item.title).into(),
            (&item.summary).into(),
            (&item.authors).into(),
            (&item.organization).into(),
            item.publication_year.into(),
            (&item.category).into(),
            (&item.jurisdiction).into(),
            (&item.document_url).into(),
            item.is_featured.into(),
            search_text(&[Some(item.title.as_str()), Some(item.summary.as_str())]).into(),
            item.updated_at.into(),
        ]
    }

    fn filter_clause(qb: &mut QueryBuilder, filter: &ResearchFilter) -> (String, Vec<BindValue>) {
        let mut conditions = Vec::new();
        let mut bindings = Vec::new();

        if let Some(category) = &filter.category {
            conditions.push(format!("category = {}", qb.placeholder()));
            bindings.push(BindValue::String(category.clone()));
        }
        if let Some(query) = &filter.query {
            let pattern = like_pattern(query);
            conditions.push(format!(r"search_text LIKE {} ESCAPE '\'", qb.placeholder()));
            bindings.push(BindValue::String(pattern));
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
impl ResearchRepository for ResearchRepositoryImpl {
    async fn create_research(&self, item: &ResearchRecord) -> crate::Result<()> {
        let mut columns = vec!["id", "slug", "created_at"];
        columns.extend_from_slice(RESEARCH_EDITABLE);
        let query = self.pool.query_builder().insert_query("research_items", &columns);

        let mut bindings: Vec<BindValue> =
            vec![(&item.id).into(), (&item.slug).into(), item.created_at.into()];
        bindings.extend(Self::editable_values(item));

        self.pool.execute(&query, bindings).await?;
        Ok(())
    }

    async fn list(&self, filter: &ResearchFilter) -> crate::Result<Page<ResearchRecord>> {
        let mut count_qb = self.pool.query_builder();
        let (clause, bindings) = Self::filter_clause(&mut count_qb, filter);
        let total = self
            .pool
            .fetch_count(&format!("SELECT COUNT(*) FROM research_items{}", clause), bindings)
            .await?;

        // NULL years sort last on both backends via the CASE key
        let mut qb = self.pool.query_builder();
        let (clause, mut bindings) = Self::filter_clause(&mut qb, filter);
        let query = format!(
            "SELECT {} FROM research_items{} \
             ORDER BY CASE WHEN publication_year IS NULL THEN 1 ELSE 0 END, \
             publication_year DESC, title ASC LIMIT {} OFFSET {}",
            RESEARCH_COLUMNS,
            clause,
            qb.placeholder(),
            qb.placeholder()
        );
        bindings.push(filter.limit.into());
        bindings.push(filter.offset.into());

        let items = self.pool.fetch_all_as(&query, bindings).await?;
        Ok(Page::new(items, total, filter.limit, filter.offset))
    }

    async fn get_by_id(&self, id: &str) -> crate::Result<Option<ResearchRecord>> {
        let query = self
            .pool
            .query_builder()
            .select_where_query("research_items", RESEARCH_COLUMNS, "id");
        self.pool.fetch_optional_as(&query, vec![id.into()]).await
    }

    async fn get_by_slug(&self, slug: &str) -> crate::Result<Option<ResearchRecord>> {
        let query = self
            .pool
            .query_builder()
            .select_where_query("research_items", RESEARCH_COLUMNS, "slug");
        self.pool.fetch_optional_as(&query, vec![slug.into()]).await
    }

    async fn update_research(&self, item: &ResearchRecord) -> crate::Result<bool> {
        let query = self
            .pool
            .query_builder()
            .update_query("research_items", RESEARCH_EDITABLE, "id");
        let mut bindings = Self::editable_values(item);
        bindings.push((&item.id).into());

        Ok(self.pool.execute(&query, bindings).await? > 0)
    }

    async fn delete_research(&self, id: &str) -> crate::Result<bool> {
        let mut qb = self.pool.query_builder();
        let query = format!("DELETE FROM research_items WHERE id = {}", qb.placeholder());
        Ok(self.pool.execute(&query, vec![id.into()]).await? > 0)
    }

    async fn slug_exists(&self, slug: &str) -> crate::Result<bool> {
        let mut qb = self.pool.query_builder();
        let query = format!(
            "SELECT COUNT(*) FROM research_items WHERE slug = {}",
            qb.placeholder()
        );
        Ok(self.pool.fetch_count(&query, vec![slug.into()]).await? > 0)
    }
}
