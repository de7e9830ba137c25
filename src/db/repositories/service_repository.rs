// Service Repository Implementation
// Handles the service finder search and service lookups

use crate::db::connection::{BindValue, DatabasePool, QueryBuilder};
use crate::db::models::{CategoryCount, Page, ServiceRecord, ServiceSearch};
use crate::db::traits::ServiceRepository;
use crate::utils::{like_pattern, search_text};
use async_trait::async_trait;

const SERVICE_COLUMNS: &str = "id, name, slug, description, category, organization_id, \
    location_city, location_state, postcode, phone, email, website, youth_specific, \
    indigenous_specific, is_active, created_at, updated_at";

pub struct ServiceRepositoryImpl {
    pool: DatabasePool,
}

impl ServiceRepositoryImpl {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Build the WHERE clause shared by the page and count queries
    fn filter_clause(qb: &mut QueryBuilder, search: &ServiceSearch) -> (String, Vec<BindValue>) {
        let mut conditions = vec![format!("is_active = {}", qb.placeholder())];
        let mut bindings = vec![BindValue::Bool(true)];

        if let Some(query) = &search.query {
            let pattern = like_pattern(query);
            conditions.push(format!(r"search_text LIKE {} ESCAPE '\'", qb.placeholder()));
            bindings.push(BindValue::String(pattern));
        }

        if let Some(category) = &search.category {
            conditions.push(format!("category = {}", qb.placeholder()));
            bindings.push(BindValue::String(category.clone()));
        }

        if let Some(state) = &search.state {
            conditions.push(format!("UPPER(location_state) = {}", qb.placeholder()));
            bindings.push(BindValue::String(state.to_uppercase()));
        }

        if let Some(youth) = search.youth_specific {
            conditions.push(format!("youth_specific = {}", qb.placeholder()));
            bindings.push(BindValue::Bool(youth));
        }

        if let Some(indigenous) = search.indigenous_specific {
            conditions.push(format!("indigenous_specific = {}", qb.placeholder()));
            bindings.push(BindValue::Bool(indigenous));
        }

        (conditions.join(" AND "), bindings)
    }
}

#[async_trait]
impl ServiceRepository for ServiceRepositoryImpl {
    async fn create_service(&self, service: &ServiceRecord) -> crate::Result<()> {
        let query = self.pool.query_builder().insert_query(
            "services",
            &[
                "id",
                "name",
                "slug",
                "description",
                "category",
                "organization_id",
                "location_city",
                "location_state",
                "postcode",
                "phone",
                "email",
                "website",
                "youth_specific",
                "indigenous_specific",
                "is_active",
                "search_text",
                "created_at",
                "updated_at",
            ],
        );

        self.pool
            .execute(
                &query,
                vec![
                    (&service.id).into(),
                    (&service.name).into(),
                    (&service.slug).into(),
                    (&service.description).into(),
                    (&service.category).into(),
                    (&service.organization_id).into(),
                    (&service.location_city).into(),
                    (&service.location_state).into(),
                    (&service.postcode).into(),
                    (&service.phone).into(),
                    (&service.email).into(),
                    (&service.website).into(),
                    service.youth_specific.into(),
                    service.indigenous_specific.into(),
                    service.is_active.into(),
                    search_text(&[Some(service.name.as_str()), service.description.as_deref()]).into(),
                    service.created_at.into(),
                    service.updated_at.into(),
                ],
            )
            .await?;

        Ok(())
    }

    async fn search(&self, search: &ServiceSearch) -> crate::Result<Page<ServiceRecord>> {
        let mut count_qb = self.pool.query_builder();
        let (where_clause, bindings) = Self::filter_clause(&mut count_qb, search);
        let total = self
            .pool
            .fetch_count(
                &format!("SELECT COUNT(*) FROM services WHERE {}", where_clause),
                bindings,
            )
            .await?;

        let mut qb = self.pool.query_builder();
        let (where_clause, mut bindings) = Self::filter_clause(&mut qb, search);
        let query = format!(
            "SELECT {} FROM services WHERE {} ORDER BY name ASC, id ASC LIMIT {} OFFSET {}",
            SERVICE_COLUMNS,
            where_clause,
            qb.placeholder(),
            qb.placeholder()
        );
        bindings.push(BindValue::Int64(search.limit));
        bindings.push(BindValue::Int64(search.offset));

        let items = self.pool.fetch_all_as::<ServiceRecord>(&query, bindings).await?;

        Ok(Page::new(items, total, search.limit, search.offset))
    }

    async fn get_by_id(&self, id: &str) -> crate::Result<Option<ServiceRecord>> {
        let query = self
            .pool
            .query_builder()
            .select_where_query("services", SERVICE_COLUMNS, "id");
        self.pool.fetch_optional_as(&query, vec![id.into()]).await
    }

    async fn list_for_organization(&self, organization_id: &str) -> crate::Result<Vec<ServiceRecord>> {
        let mut qb = self.pool.query_builder();
        let query = format!(
            "SELECT {} FROM services WHERE organization_id = {} AND is_active = {} ORDER BY name ASC",
            SERVICE_COLUMNS,
            qb.placeholder(),
            qb.placeholder()
        );
        self.pool
            .fetch_all_as(&query, vec![organization_id.into(), true.into()])
            .await
    }

    async fn count_by_category(&self) -> crate::Result<Vec<CategoryCount>> {
        let mut qb = self.pool.query_builder();
        let query = format!(
            "SELECT category, COUNT(*) AS count FROM services WHERE is_active = {} \
             GROUP BY category ORDER BY count DESC, category ASC",
            qb.placeholder()
        );
        self.pool.fetch_all_as(&query, vec![true.into()]).await
    }
}
