// Database Traits
// Defines repository interfaces for database operations

use crate::db::models::*;
use async_trait::async_trait;

/// Service repository trait
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Insert a service
    async fn create_service(&self, service: &ServiceRecord) -> crate::Result<()>;

    /// Service finder: active services matching the filters, ordered by name
    async fn search(&self, search: &ServiceSearch) -> crate::Result<Page<ServiceRecord>>;

    /// Get service by ID (active or not)
    async fn get_by_id(&self, id: &str) -> crate::Result<Option<ServiceRecord>>;

    /// Active services run by an organization
    async fn list_for_organization(&self, organization_id: &str) -> crate::Result<Vec<ServiceRecord>>;

    /// Active service counts per category, largest first
    async fn count_by_category(&self) -> crate::Result<Vec<CategoryCount>>;
}

/// Organization repository trait
#[async_trait]
pub trait OrganizationRepository: Send + Sync {
    async fn create_organization(&self, organization: &OrganizationRecord) -> crate::Result<()>;

    /// Organizations ordered by name
    async fn list(&self, limit: i64, offset: i64) -> crate::Result<Page<OrganizationRecord>>;

    async fn get_by_id(&self, id: &str) -> crate::Result<Option<OrganizationRecord>>;
}

/// Event repository trait
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create_event(&self, event: &EventRecord) -> crate::Result<()>;

    /// Events ordered by start date
    async fn list(&self, filter: &EventFilter) -> crate::Result<Page<EventRecord>>;

    async fn get_by_id(&self, id: &str) -> crate::Result<Option<EventRecord>>;

    async fn get_by_slug(&self, slug: &str) -> crate::Result<Option<EventRecord>>;

    /// Replace editable fields; returns false when the id is unknown
    async fn update_event(&self, event: &EventRecord) -> crate::Result<bool>;

    /// Delete by id; returns false when the id is unknown
    async fn delete_event(&self, id: &str) -> crate::Result<bool>;

    async fn slug_exists(&self, slug: &str) -> crate::Result<bool>;
}

/// Framework repository trait
#[async_trait]
pub trait FrameworkRepository: Send + Sync {
    async fn create_framework(&self, framework: &FrameworkRecord) -> crate::Result<()>;

    /// Frameworks, featured first, then by name
    async fn list(&self, filter: &FrameworkFilter) -> crate::Result<Page<FrameworkRecord>>;

    async fn get_by_id(&self, id: &str) -> crate::Result<Option<FrameworkRecord>>;

    async fn get_by_slug(&self, slug: &str) -> crate::Result<Option<FrameworkRecord>>;

    async fn update_framework(&self, framework: &FrameworkRecord) -> crate::Result<bool>;

    async fn delete_framework(&self, id: &str) -> crate::Result<bool>;

    async fn slug_exists(&self, slug: &str) -> crate::Result<bool>;
}

/// Person repository trait
#[async_trait]
pub trait PersonRepository: Send + Sync {
    async fn create_person(&self, person: &PersonRecord) -> crate::Result<()>;

    /// People, featured first, then by name
    async fn list(&self, filter: &PersonFilter) -> crate::Result<Page<PersonRecord>>;

    async fn get_by_id(&self, id: &str) -> crate::Result<Option<PersonRecord>>;

    async fn get_by_slug(&self, slug: &str) -> crate::Result<Option<PersonRecord>>;

    /// Find the local profile syndicated from an Empathy Ledger profile
    async fn get_by_empathy_ledger_id(&self, external_id: &str) -> crate::Result<Option<PersonRecord>>;

    async fn update_person(&self, person: &PersonRecord) -> crate::Result<bool>;

    async fn delete_person(&self, id: &str) -> crate::Result<bool>;

    async fn slug_exists(&self, slug: &str) -> crate::Result<bool>;
}

/// Research repository trait
#[async_trait]
pub trait ResearchRepository: Send + Sync {
    async fn create_research(&self, item: &ResearchRecord) -> crate::Result<()>;

    /// Research items, newest publication year first
    async fn list(&self, filter: &ResearchFilter) -> crate::Result<Page<ResearchRecord>>;

    async fn get_by_id(&self, id: &str) -> crate::Result<Option<ResearchRecord>>;

    async fn get_by_slug(&self, slug: &str) -> crate::Result<Option<ResearchRecord>>;

    async fn update_research(&self, item: &ResearchRecord) -> crate::Result<bool>;

    async fn delete_research(&self, id: &str) -> crate::Result<bool>;

    async fn slug_exists(&self, slug: &str) -> crate::Result<bool>;
}

/// Story repository trait
#[async_trait]
pub trait StoryRepository: Send + Sync {
    async fn create_story(&self, story: &StoryRecord) -> crate::Result<()>;

    /// Published stories, newest first
    async fn list_published(&self, limit: i64, offset: i64) -> crate::Result<Page<StoryRecord>>;

    async fn get_by_slug(&self, slug: &str) -> crate::Result<Option<StoryRecord>>;

    /// Published stories told by one person, newest first
    async fn list_for_person(&self, person_id: &str) -> crate::Result<Vec<StoryRecord>>;

    async fn get_by_empathy_ledger_id(&self, external_id: &str) -> crate::Result<Option<StoryRecord>>;

    async fn update_story(&self, story: &StoryRecord) -> crate::Result<bool>;

    async fn slug_exists(&self, slug: &str) -> crate::Result<bool>;
}

/// Notification repository trait
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn create_notification(&self, notification: &NotificationRecord) -> crate::Result<()>;

    /// Notifications for a user, newest first
    async fn list_for_user(
        &self,
        user_id: &str,
        unread_only: bool,
        limit: i64,
    ) -> crate::Result<Vec<NotificationRecord>>;

    async fn unread_count(&self, user_id: &str) -> crate::Result<i64>;

    /// Mark the given notifications read; ids owned by other users are ignored
    async fn mark_read(&self, user_id: &str, ids: &[String]) -> crate::Result<u64>;

    /// Mark every unread notification of a user read
    async fn mark_all_read(&self, user_id: &str) -> crate::Result<u64>;
}

/// Database trait combining all repositories
#[async_trait]
pub trait Database: Send + Sync {
    fn services(&self) -> &dyn ServiceRepository;
    fn organizations(&self) -> &dyn OrganizationRepository;
    fn events(&self) -> &dyn EventRepository;
    fn frameworks(&self) -> &dyn FrameworkRepository;
    fn people(&self) -> &dyn PersonRepository;
    fn research(&self) -> &dyn ResearchRepository;
    fn stories(&self) -> &dyn StoryRepository;
    fn notifications(&self) -> &dyn NotificationRepository;
}
