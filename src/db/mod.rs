// Database Module
// Database abstraction layer for JusticeHub

pub mod config;
pub mod connection;
pub mod migrations;
pub mod models;
pub mod repositories;
pub mod traits;

// Re-exports
pub use config::{Config, DatabaseConfig, DatabaseType};
pub use connection::DatabasePool;
pub use migrations::run_migrations;
pub use models::*;
pub use traits::*;

use crate::error::HubError;
use crate::utils::{slug_candidate, slugify};
use repositories::{
    EventRepositoryImpl, FrameworkRepositoryImpl, NotificationRepositoryImpl,
    OrganizationRepositoryImpl, PersonRepositoryImpl, ResearchRepositoryImpl,
    ServiceRepositoryImpl, StoryRepositoryImpl,
};
use std::future::Future;
use tracing::debug;

/// Give up on slug allocation after this many suffixes
const MAX_SLUG_ATTEMPTS: u32 = 1000;

/// Re-allocations allowed when concurrent writers claim the same slug
const MAX_SLUG_CONFLICTS: u32 = 32;

/// Tables whose rows carry a unique slug
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugScope {
    Events,
    Frameworks,
    People,
    Research,
    Stories,
}

/// Main database struct
pub struct JusticeHubDatabase {
    pool: DatabasePool,
    services: ServiceRepositoryImpl,
    organizations: OrganizationRepositoryImpl,
    events: EventRepositoryImpl,
    frameworks: FrameworkRepositoryImpl,
    people: PersonRepositoryImpl,
    research: ResearchRepositoryImpl,
    stories: StoryRepositoryImpl,
    notifications: NotificationRepositoryImpl,
}

impl JusticeHubDatabase {
    /// Connect and run migrations
    pub async fn new(config: &DatabaseConfig) -> crate::Result<Self> {
        let pool = DatabasePool::new(config).await?;

        run_migrations(&pool, &config.backend_migrations_dir()).await?;

        Ok(Self::from_pool(pool))
    }

    /// Wrap an already-migrated pool
    pub fn from_pool(pool: DatabasePool) -> Self {
        Self {
            services: ServiceRepositoryImpl::new(pool.clone()),
            organizations: OrganizationRepositoryImpl::new(pool.clone()),
            events: EventRepositoryImpl::new(pool.clone()),
            frameworks: FrameworkRepositoryImpl::new(pool.clone()),
            people: PersonRepositoryImpl::new(pool.clone()),
            research: ResearchRepositoryImpl::new(pool.clone()),
            stories: StoryRepositoryImpl::new(pool.clone()),
            notifications: NotificationRepositoryImpl::new(pool.clone()),
            pool,
        }
    }

    /// Create database from config file
    pub async fn from_config_file(path: &str) -> crate::Result<Self> {
        let config = DatabaseConfig::from_file(path)?;
        Self::new(&config.database).await
    }

    /// Get database pool
    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    /// Close database connection
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Verify the database answers queries
    pub async fn ping(&self) -> crate::Result<()> {
        self.pool.ping().await
    }

    async fn slug_taken(&self, scope: SlugScope, slug: &str) -> crate::Result<bool> {
        match scope {
            SlugScope::Events => self.events.slug_exists(slug).await,
            SlugScope::Frameworks => self.frameworks.slug_exists(slug).await,
            SlugScope::People => self.people.slug_exists(slug).await,
            SlugScope::Research => self.research.slug_exists(slug).await,
            SlugScope::Stories => self.stories.slug_exists(slug).await,
        }
    }

    /// Allocate a slug for `title` that is not yet used in `scope`.
    ///
    /// Tries `slug`, `slug-2`, `slug-3`, ... Fails with invalid input when the
    /// title yields an empty slug.
    pub async fn unique_slug(&self, scope: SlugScope, title: &str) -> crate::Result<String> {
        let base = slugify(title);
        if base.is_empty() {
            return Err(HubError::invalid_input(format!(
                "Cannot derive a slug from '{}'",
                title
            ))
            .into());
        }

        for attempt in 1..=MAX_SLUG_ATTEMPTS {
            let candidate = slug_candidate(&base, attempt);
            if !self.slug_taken(scope, &candidate).await? {
                debug!("Allocated slug {} ({:?})", candidate, scope);
                return Ok(candidate);
            }
        }

        Err(HubError::DatabaseError(format!(
            "No free slug for '{}' after {} attempts",
            base, MAX_SLUG_ATTEMPTS
        ))
        .into())
    }

    /// Allocate a slug and run `insert` with it, allocating again when the
    /// insert loses a race for the slug to another writer.
    ///
    /// `insert` receives the candidate slug and must write the row; any error
    /// other than a slug UNIQUE violation is returned as-is.
    pub async fn insert_with_unique_slug<T, F, Fut>(
        &self,
        scope: SlugScope,
        title: &str,
        mut insert: F,
    ) -> crate::Result<T>
    where
        F: FnMut(String) -> Fut,
        Fut: Future<Output = crate::Result<T>>,
    {
        let mut conflicts = 0;
        loop {
            let slug = self.unique_slug(scope, title).await?;
            match insert(slug.clone()).await {
                Err(e) if conflicts < MAX_SLUG_CONFLICTS && is_slug_conflict(&e) => {
                    conflicts += 1;
                    debug!("Slug {} taken concurrently ({:?}), retrying", slug, scope);
                }
                result => return result,
            }
        }
    }
}

fn is_slug_conflict(err: &anyhow::Error) -> bool {
    err.downcast_ref::<HubError>()
        .is_some_and(|e| e.is_unique_violation_on("slug"))
}

impl Database for JusticeHubDatabase {
    fn services(&self) -> &dyn ServiceRepository {
        &self.services
    }

    fn organizations(&self) -> &dyn OrganizationRepository {
        &self.organizations
    }

    fn events(&self) -> &dyn EventRepository {
        &self.events
    }

    fn frameworks(&self) -> &dyn FrameworkRepository {
        &self.frameworks
    }

    fn people(&self) -> &dyn PersonRepository {
        &self.people
    }

    fn research(&self) -> &dyn ResearchRepository {
        &self.research
    }

    fn stories(&self) -> &dyn StoryRepository {
        &self.stories
    }

    fn notifications(&self) -> &dyn NotificationRepository {
        &self.notifications
    }
}
