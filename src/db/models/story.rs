// Story Record Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Publication state of a story
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StoryStatus {
    Draft,
    Published,
}

impl StoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryStatus::Draft => "draft",
            StoryStatus::Published => "published",
        }
    }
}

/// Story record in database. `status` holds a [`StoryStatus`] string.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StoryRecord {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub person_id: Option<String>,
    pub status: String,
    pub published_at: Option<DateTime<Utc>>,
    pub empathy_ledger_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoryRecord {
    /// Create new draft story
    pub fn new(title: String, slug: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: super::new_id(),
            title,
            slug,
            excerpt: None,
            content,
            person_id: None,
            status: StoryStatus::Draft.as_str().to_string(),
            published_at: None,
            empathy_ledger_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark published, keeping an existing publication date
    pub fn publish(mut self, at: DateTime<Utc>) -> Self {
        self.status = StoryStatus::Published.as_str().to_string();
        self.published_at = Some(self.published_at.unwrap_or(at));
        self
    }

    /// Back to draft; the publication date is kept for a later republish
    pub fn unpublish(mut self) -> Self {
        self.status = StoryStatus::Draft.as_str().to_string();
        self
    }

    pub fn is_published(&self) -> bool {
        self.status == StoryStatus::Published.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_story_is_draft() {
        let story = StoryRecord::new(
            "Finding my way".to_string(),
            "finding-my-way".to_string(),
            "...".to_string(),
        );
        assert_eq!(story.status, "draft");
        assert!(!story.is_published());
    }

    #[test]
    fn test_publish_keeps_original_date() {
        let first = Utc::now() - chrono::Duration::days(3);
        let story = StoryRecord::new("t".to_string(), "t".to_string(), "c".to_string())
            .publish(first)
            .publish(Utc::now());
        assert!(story.is_published());
        assert_eq!(story.published_at, Some(first));
    }

    #[test]
    fn test_unpublish_then_republish_keeps_date() {
        let first = Utc::now() - chrono::Duration::days(3);
        let story = StoryRecord::new("t".to_string(), "t".to_string(), "c".to_string())
            .publish(first)
            .unpublish();
        assert!(!story.is_published());
        assert_eq!(story.status, "draft");
        assert_eq!(story.publish(Utc::now()).published_at, Some(first));
    }
}
