// Database Models Module
// Re-exports all database model types

pub mod event;
pub mod framework;
pub mod notification;
pub mod organization;
pub mod page;
pub mod person;
pub mod research;
pub mod service;
pub mod story;

pub use event::{EventFilter, EventRecord};
pub use framework::{FrameworkFilter, FrameworkRecord};
pub use notification::NotificationRecord;
pub use organization::OrganizationRecord;
pub use page::{Page, Pagination};
pub use person::{PersonFilter, PersonRecord};
pub use research::{ResearchFilter, ResearchRecord};
pub use service::{CategoryCount, ServiceRecord, ServiceSearch};
pub use story::{StoryRecord, StoryStatus};

/// Generate a new primary key
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
