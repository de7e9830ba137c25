// Empathy Ledger syndication job
//
// Copies public profiles into `people` and their public stories into
// `stories`, keyed by the Empathy Ledger id so repeated passes update in place.
// Records that turn private upstream are hidden locally.

use super::client::EmpathyLedgerClient;
use super::models::{ExternalProfile, ExternalStory};
use crate::db::{Database, JusticeHubDatabase, PersonRecord, SlugScope, StoryRecord};
use crate::utils::slugify;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};
use utoipa::ToSchema;

/// Outcome of one sync pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SyncReport {
    pub profiles_created: u32,
    pub profiles_updated: u32,
    pub stories_created: u32,
    pub stories_updated: u32,
    /// Private records never synced, and stories without a visible storyteller
    pub skipped: u32,
    /// Previously synced profiles and stories hidden after turning private
    pub withdrawn: u32,
    /// One message per record that failed to save
    pub errors: Vec<String>,
}

impl SyncReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// One syndication pass over the Empathy Ledger API
pub struct EmpathyLedgerSync<'a> {
    client: &'a EmpathyLedgerClient,
    db: &'a JusticeHubDatabase,
}

impl<'a> EmpathyLedgerSync<'a> {
    pub fn new(client: &'a EmpathyLedgerClient, db: &'a JusticeHubDatabase) -> Self {
        Self { client, db }
    }

    /// Run the pass. Fetch failures abort; per-record failures land in the report.
    pub async fn run(&self) -> crate::Result<SyncReport> {
        let mut report = SyncReport::default();
        let now = Utc::now();

        let profiles = self.client.fetch_profiles().await?;
        info!("Syncing {} Empathy Ledger profiles", profiles.len());

        // Empathy Ledger id -> local person id
        let mut synced: HashMap<String, String> = HashMap::new();

        for profile in &profiles {
            if !profile.is_public {
                match self.withdraw_profile(profile, now).await {
                    Ok(true) => report.withdrawn += 1,
                    Ok(false) => report.skipped += 1,
                    Err(e) => {
                        warn!("Failed to withdraw profile {}: {}", profile.id, e);
                        report.errors.push(format!("profile {}: {}", profile.id, e));
                    }
                }
                continue;
            }

            match self.upsert_profile(profile, now).await {
                Ok((person, created)) => {
                    if created {
                        report.profiles_created += 1;
                    } else {
                        report.profiles_updated += 1;
                    }
                    // Stories follow the local visibility of their teller
                    if person.is_public {
                        synced.insert(profile.id.clone(), person.id);
                    }
                }
                Err(e) => {
                    warn!("Failed to sync profile {}: {}", profile.id, e);
                    report.errors.push(format!("profile {}: {}", profile.id, e));
                }
            }
        }

        let stories = self.client.fetch_stories().await?;
        info!("Syncing {} Empathy Ledger stories", stories.len());

        for story in &stories {
            if !story.is_public {
                match self.withdraw_story(story, now).await {
                    Ok(true) => report.withdrawn += 1,
                    Ok(false) => report.skipped += 1,
                    Err(e) => {
                        warn!("Failed to withdraw story {}: {}", story.id, e);
                        report.errors.push(format!("story {}: {}", story.id, e));
                    }
                }
                continue;
            }

            let person_id = story
                .storyteller_id
                .as_ref()
                .and_then(|external| synced.get(external));

            let person_id = match person_id {
                Some(id) => id,
                None => {
                    report.skipped += 1;
                    continue;
                }
            };

            match self.upsert_story(story, person_id, now).await {
                Ok(true) => report.stories_created += 1,
                Ok(false) => report.stories_updated += 1,
                Err(e) => {
                    warn!("Failed to sync story {}: {}", story.id, e);
                    report.errors.push(format!("story {}: {}", story.id, e));
                }
            }
        }

        info!(
            "Empathy Ledger sync finished: {} profiles created, {} updated, {} stories created, {} updated, {} withdrawn, {} skipped, {} errors",
            report.profiles_created,
            report.profiles_updated,
            report.stories_created,
            report.stories_updated,
            report.withdrawn,
            report.skipped,
            report.errors.len()
        );

        Ok(report)
    }

    /// Returns the stored person and whether a row was created
    async fn upsert_profile(
        &self,
        profile: &ExternalProfile,
        now: DateTime<Utc>,
    ) -> crate::Result<(PersonRecord, bool)> {
        let people = self.db.people();

        if let Some(mut person) = people.get_by_empathy_ledger_id(&profile.id).await? {
            apply_profile(&mut person, profile, now);
            people.update_person(&person).await?;
            return Ok((person, false));
        }

        let mut draft = PersonRecord::new(profile.display_name.trim().to_string(), String::new());
        draft.empathy_ledger_id = Some(profile.id.clone());
        apply_profile(&mut draft, profile, now);

        let source = slug_source(&profile.display_name, "storyteller", &profile.id);
        let person = self
            .db
            .insert_with_unique_slug(SlugScope::People, &source, |slug| {
                let record = PersonRecord { slug, ..draft.clone() };
                async move { people.create_person(&record).await.map(|_| record) }
            })
            .await?;

        Ok((person, true))
    }

    /// Hide a synced person whose profile went private, with their published
    /// stories. Returns whether anything changed.
    async fn withdraw_profile(
        &self,
        profile: &ExternalProfile,
        now: DateTime<Utc>,
    ) -> crate::Result<bool> {
        let Some(mut person) = self.db.people().get_by_empathy_ledger_id(&profile.id).await? else {
            return Ok(false);
        };

        let stories = self.db.stories().list_for_person(&person.id).await?;
        if !person.is_public && stories.is_empty() {
            return Ok(false);
        }

        person.is_public = false;
        person.last_synced_at = Some(now);
        person.updated_at = now;
        self.db.people().update_person(&person).await?;

        for story in stories {
            let mut story = story.unpublish();
            story.updated_at = now;
            self.db.stories().update_story(&story).await?;
        }

        info!("Withdrew profile {} ({})", person.slug, profile.id);
        Ok(true)
    }

    /// Unpublish a synced story that went private. Returns whether anything changed.
    async fn withdraw_story(&self, story: &ExternalStory, now: DateTime<Utc>) -> crate::Result<bool> {
        let stories = self.db.stories();
        let Some(existing) = stories.get_by_empathy_ledger_id(&story.id).await? else {
            return Ok(false);
        };
        if !existing.is_published() {
            return Ok(false);
        }

        let mut existing = existing.unpublish();
        existing.updated_at = now;
        stories.update_story(&existing).await?;

        info!("Withdrew story {} ({})", existing.slug, story.id);
        Ok(true)
    }

    /// Returns whether a row was created
    async fn upsert_story(
        &self,
        story: &ExternalStory,
        person_id: &str,
        now: DateTime<Utc>,
    ) -> crate::Result<bool> {
        let stories = self.db.stories();

        if let Some(mut existing) = stories.get_by_empathy_ledger_id(&story.id).await? {
            existing.title = story.title.trim().to_string();
            existing.excerpt = story.summary.clone();
            existing.content = story.content.clone();
            existing.person_id = Some(person_id.to_string());
            if let Some(published_at) = story.published_at {
                existing.published_at = Some(published_at);
            }
            existing.updated_at = now;
            let existing = existing.publish(now);
            stories.update_story(&existing).await?;
            return Ok(false);
        }

        let mut draft =
            StoryRecord::new(story.title.trim().to_string(), String::new(), story.content.clone())
                .publish(story.published_at.unwrap_or(now));
        draft.excerpt = story.summary.clone();
        draft.person_id = Some(person_id.to_string());
        draft.empathy_ledger_id = Some(story.id.clone());

        let source = slug_source(&story.title, "story", &story.id);
        self.db
            .insert_with_unique_slug(SlugScope::Stories, &source, |slug| {
                let record = StoryRecord { slug, ..draft.clone() };
                async move { stories.create_story(&record).await }
            })
            .await?;

        Ok(true)
    }
}

/// Copy upstream-owned fields; visibility and featuring stay under local control
fn apply_profile(person: &mut PersonRecord, profile: &ExternalProfile, now: DateTime<Utc>) {
    person.full_name = profile.display_name.trim().to_string();
    person.bio = profile.bio.clone();
    person.photo_url = profile.avatar_url.clone();
    person.role_title = profile.role.clone();
    person.organization = profile.organization_name.clone();
    person.last_synced_at = Some(now);
    person.updated_at = now;
}

/// Text to derive a slug from; names without ASCII letters fall back to `<kind> <id>`
fn slug_source(title: &str, kind: &str, external_id: &str) -> String {
    if slugify(title).is_empty() {
        format!("{} {}", kind, external_id)
    } else {
        title.to_string()
    }
}
