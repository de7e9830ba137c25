// Organization Repository Implementation

use crate::db::connection::DatabasePool;
use crate::db::models::{OrganizationRecord, Page};
use crate::db::traits::OrganizationRepository;
use async_trait::async_trait;

const ORGANIZATION_COLUMNS: &str =
    "id, name, slug, description, website, state, is_verified, created_at, updated_at";

pub struct OrganizationRepositoryImpl {
    pool: DatabasePool,
}

impl OrganizationRepositoryImpl {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrganizationRepository for OrganizationRepositoryImpl {
    async fn create_organization(&self, organization: &OrganizationRecord) -> crate::Result<()> {
        let query = self.pool.query_builder().insert_query(
            "organizations",
            &[
                "id",
                "name",
                "slug",
                "description",
                "website",
                "state",
                "is_verified",
                "created_at",
                "updated_at",
            ],
        );

        self.pool
            .execute(
                &query,
                vec![
                    (&organization.id).into(),
                    (&organization.name).into(),
                    (&organization.slug).into(),
                    (&organization.description).into(),
                    (&organization.website).into(),
                    (&organization.state).into(),
                    organization.is_verified.into(),
                    organization.created_at.into(),
                    organization.updated_at.into(),
                ],
            )
            .await?;

        Ok(())
    }

    async fn list(&self, limit: i64, offset: i64) -> crate::Result<Page<OrganizationRecord>> {
        let total = self
            .pool
            .fetch_count("SELECT COUNT(*) FROM organizations", vec![])
            .await?;

        let mut qb = self.pool.query_builder();
        let query = format!(
            "SELECT {} FROM organizations ORDER BY name ASC, id ASC LIMIT {} OFFSET {}",
            ORGANIZATION_COLUMNS,
            qb.placeholder(),
            qb.placeholder()
        );
        let items = self
            .pool
            .fetch_all_as(&query, vec![limit.into(), offset.into()])
            .await?;

        Ok(Page::new(items, total, limit, offset))
    }

    async fn get_by_id(&self, id: &str) -> crate::Result<Option<OrganizationRecord>> {
        let query = self
            .pool
            .query_builder()
            .select_where_query("organizations", ORGANIZATION_COLUMNS, "id");
        self.pool.fetch_optional_as(&query, vec![id.into()]).await
    }
}
