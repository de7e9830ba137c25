// Story Repository Implementation

use crate::db::connection::{BindValue, DatabasePool};
use crate::db::models::{Page, StoryRecord, StoryStatus};
use crate::db::traits::StoryRepository;
use async_trait::async_trait;

const STORY_COLUMNS: &str = "id, title, slug, excerpt, content, person_id, status, published_at, \
    empathy_ledger_id, created_at, updated_at";

const STORY_EDITABLE: &[&str] = &[
    "title",
    "excerpt",
    "content",
    "person_id",
    "status",
    "published_at",
    "empathy_ledger_id",
    "updated_at",
];

pub struct StoryRepositoryImpl {
    pool: DatabasePool,
}

impl StoryRepositoryImpl {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    fn editable_values(story: &StoryRecord) -> Vec<BindValue> {
        vec![
            (&story.title).into(),
            (&story.excerpt).into(),
            (&story.content).into(),
            (&story.person_id).into(),
            (&story.status).into(),
            story.published_at.into(),
            (&story.empathy_ledger_id).into(),
            story.updated_at.into(),
        ]
    }
}

#[async_trait]
impl StoryRepository for StoryRepositoryImpl {
    async fn create_story(&self, story: &StoryRecord) -> crate::Result<()> {
        let mut columns = vec!["id", "slug", "created_at"];
        columns.extend_from_slice(STORY_EDITABLE);
        let query = self.pool.query_builder().insert_query("stories", &columns);

        let mut bindings: Vec<BindValue> =
            vec![(&story.id).into(), (&story.slug).into(), story.created_at.into()];
        bindings.extend(Self::editable_values(story));

        self.pool.execute(&query, bindings).await?;
        Ok(())
    }

    async fn list_published(&self, limit: i64, offset: i64) -> crate::Result<Page<StoryRecord>> {
        let published = StoryStatus::Published.as_str();

        let mut qb = self.pool.query_builder();
        let count_query = format!(
            "SELECT COUNT(*) FROM stories WHERE status = {}",
            qb.placeholder()
        );
        let total = self
            .pool
            .fetch_count(&count_query, vec![published.into()])
            .await?;

        qb.reset();
        let query = format!(
            "SELECT {} FROM stories WHERE status = {} \
             ORDER BY published_at DESC, id ASC LIMIT {} OFFSET {}",
            STORY_COLUMNS,
            qb.placeholder(),
            qb.placeholder(),
            qb.placeholder()
        );
        let items = self
            .pool
            .fetch_all_as(&query, vec![published.into(), limit.into(), offset.into()])
            .await?;

        Ok(Page::new(items, total, limit, offset))
    }

    async fn get_by_slug(&self, slug: &str) -> crate::Result<Option<StoryRecord>> {
        let query = self
            .pool
            .query_builder()
            .select_where_query("stories", STORY_COLUMNS, "slug");
        self.pool.fetch_optional_as(&query, vec![slug.into()]).await
    }

    async fn list_for_person(&self, person_id: &str) -> crate::Result<Vec<StoryRecord>> {
        let mut qb = self.pool.query_builder();
        let query = format!(
            "SELECT {} FROM stories WHERE person_id = {} AND status = {} ORDER BY published_at DESC",
            STORY_COLUMNS,
            qb.placeholder(),
            qb.placeholder()
        );
        self.pool
            .fetch_all_as(
                &query,
                vec![person_id.into(), StoryStatus::Published.as_str().into()],
            )
            .await
    }

    async fn get_by_empathy_ledger_id(&self, external_id: &str) -> crate::Result<Option<StoryRecord>> {
        let query = self
            .pool
            .query_builder()
            .select_where_query("stories", STORY_COLUMNS, "empathy_ledger_id");
        self.pool.fetch_optional_as(&query, vec![external_id.into()]).await
    }

    async fn update_story(&self, story: &StoryRecord) -> crate::Result<bool> {
        let query = self
            .pool
            .query_builder()
            .update_query("stories", STORY_EDITABLE, "id");
        let mut bindings = Self::editable_values(story);
        bindings.push((&story.id).into());

        Ok(self.pool.execute(&query, bindings).await? > 0)
    }

    async fn slug_exists(&self, slug: &str) -> crate::Result<bool> {
        let mut qb = self.pool.query_builder();
        let query = format!("SELECT COUNT(*) FROM stories WHERE slug = {}", qb.placeholder());
        Ok(self.pool.fetch_count(&query, vec![slug.into()]).await? > 0)
    }
}
