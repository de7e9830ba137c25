// Repositories Module
// Re-exports all repository implementations

pub mod event_repository;
pub mod framework_repository;
pub mod notification_repository;
pub mod organization_repository;
pub mod person_repository;
pub mod research_repository;
pub mod service_repository;
pub mod story_repository;

pub use event_repository::EventRepositoryImpl;
pub use framework_repository::FrameworkRepositoryImpl;
pub use notification_repository::NotificationRepositoryImpl;
pub use organization_repository::OrganizationRepositoryImpl;
pub use person_repository::PersonRepositoryImpl;
pub use research_repository::ResearchRepositoryImpl;
pub use service_repository::ServiceRepositoryImpl;
pub use story_repository::StoryRepositoryImpl;
