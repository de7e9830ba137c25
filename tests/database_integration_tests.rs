// Database Integration Tests
// Exercises the repositories against a migrated SQLite database

use chrono::{Duration, Utc};
use justicehub::db::*;
use justicehub::HubError;
use tempfile::TempDir;

async fn open_db() -> (JusticeHubDatabase, TempDir) {
    let dir = TempDir::new().unwrap();
    let config = DatabaseConfig::sqlite(dir.path().join("justicehub.db"));
    let db = JusticeHubDatabase::new(&config).await.unwrap();
    (db, dir)
}

#[tokio::test]
async fn test_sqlite_database_creation() {
    let (db, _dir) = open_db().await;

    assert_eq!(db.pool().db_type(), DatabaseType::Sqlite);
    db.ping().await.unwrap();

    db.close().await;
}

#[tokio::test]
async fn test_migrations_are_rerunnable() {
    let dir = TempDir::new().unwrap();
    let config = DatabaseConfig::sqlite(dir.path().join("justicehub.db"));

    let first = JusticeHubDatabase::new(&config).await.unwrap();
    let org = OrganizationRecord::new("Kept Org".to_string(), "kept-org".to_string());
    first.organizations().create_organization(&org).await.unwrap();
    first.close().await;

    let second = JusticeHubDatabase::new(&config).await.unwrap();
    let page = second.organizations().list(20, 0).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.items[0].slug, "kept-org");
}

#[tokio::test]
async fn test_unique_slug_per_scope() {
    let (db, _dir) = open_db().await;

    let slug = db.unique_slug(SlugScope::Events, "Youth Forum 2030!").await.unwrap();
    assert_eq!(slug, "youth-forum-2030");

    let event = EventRecord::new(
        "Youth Forum 2030".to_string(),
        slug,
        "forum".to_string(),
        Utc::now(),
    );
    db.events().create_event(&event).await.unwrap();

    let next = db.unique_slug(SlugScope::Events, "Youth Forum 2030").await.unwrap();
    assert_eq!(next, "youth-forum-2030-2");

    // Other tables have their own namespace
    let framework_slug = db
        .unique_slug(SlugScope::Frameworks, "Youth Forum 2030")
        .await
        .unwrap();
    assert_eq!(framework_slug, "youth-forum-2030");

    assert!(db.unique_slug(SlugScope::People, "!!!").await.is_err());
}

#[tokio::test]
async fn test_slug_insert_retries_only_slug_conflicts() {
    let (db, _dir) = open_db().await;

    let taken = FrameworkRecord::new(
        "Diversion Model".to_string(),
        "diversion-model".to_string(),
        "Overview".to_string(),
    );

    // The first insert loses the slug to a row written after allocation
    let mut calls = 0;
    let stored = db
        .insert_with_unique_slug(SlugScope::Frameworks, "Diversion Model", |slug| {
            calls += 1;
            let first = calls == 1;
            let record = FrameworkRecord::new("Diversion Model".to_string(), slug, "Mine".to_string());
            let frameworks = db.frameworks();
            let taken = &taken;
            async move {
                if first {
                    frameworks.create_framework(taken).await?;
                }
                frameworks.create_framework(&record).await.map(|_| record)
            }
        })
        .await
        .unwrap();
    assert_eq!(calls, 2);
    assert_eq!(stored.slug, "diversion-model-2");

    let mut calls = 0;
    let result: justicehub::Result<()> = db
        .insert_with_unique_slug(SlugScope::Events, "Forum", |_| {
            calls += 1;
            async { Err(HubError::invalid_input("rejected").into()) }
        })
        .await;
    assert!(result.is_err());
    assert_eq!(calls, 1);
}

#[tokio::test]
async fn test_event_filters() {
    let (db, _dir) = open_db().await;
    let now = Utc::now();

    let past = EventRecord::new(
        "Past Workshop".to_string(),
        "past-workshop".to_string(),
        "workshop".to_string(),
        now - Duration::days(10),
    );
    let soon = EventRecord::new(
        "Soon Workshop".to_string(),
        "soon-workshop".to_string(),
        "workshop".to_string(),
        now + Duration::days(2),
    );
    let mut hidden = EventRecord::new(
        "Hidden Meeting".to_string(),
        "hidden-meeting".to_string(),
        "meeting".to_string(),
        now + Duration::days(5),
    );
    hidden.is_public = false;

    for event in [&past, &soon, &hidden] {
        db.events().create_event(event).await.unwrap();
    }

    let all_public = db
        .events()
        .list(&EventFilter {
            public_only: true,
            limit: 20,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(all_public.total, 2);
    assert_eq!(all_public.items[0].slug, "past-workshop");

    let upcoming = db
        .events()
        .list(&EventFilter {
            starts_after: Some(now),
            public_only: true,
            limit: 20,
            offset: 0,
        })
        .await
        .unwrap();
    assert_eq!(upcoming.total, 1);
    assert_eq!(upcoming.items[0].slug, "soon-workshop");

    let everything = db
        .events()
        .list(&EventFilter {
            limit: 20,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(everything.total, 3);
}

#[tokio::test]
async fn test_frameworks_featured_first() {
    let (db, _dir) = open_db().await;

    let plain = FrameworkRecord::new(
        "Alpha Approach".to_string(),
        "alpha-approach".to_string(),
        "Overview".to_string(),
    );
    let mut featured = FrameworkRecord::new(
        "Zeta Model".to_string(),
        "zeta-model".to_string(),
        "Overview".to_string(),
    );
    featured.is_featured = true;

    db.frameworks().create_framework(&plain).await.unwrap();
    db.frameworks().create_framework(&featured).await.unwrap();

    let page = db
        .frameworks()
        .list(&FrameworkFilter {
            limit: 20,
            ..Default::default()
        })
        .await
        .unwrap();
    let slugs: Vec<&str> = page.items.iter().map(|f| f.slug.as_str()).collect();
    assert_eq!(slugs, vec!["zeta-model", "alpha-approach"]);

    let only_featured = db
        .frameworks()
        .list(&FrameworkFilter {
            featured_only: true,
            limit: 20,
            offset: 0,
        })
        .await
        .unwrap();
    assert_eq!(only_featured.total, 1);
}

#[tokio::test]
async fn test_research_filters_and_ordering() {
    let (db, _dir) = open_db().await;

    let mut older = ResearchRecord::new(
        "Diversion Outcomes".to_string(),
        "diversion-outcomes".to_string(),
        "Evaluation of diversion programs".to_string(),
        "evaluation".to_string(),
    );
    older.publication_year = Some(2015);
    let mut newer = ResearchRecord::new(
        "Detention Costs".to_string(),
        "detention-costs".to_string(),
        "What detention costs the community".to_string(),
        "policy".to_string(),
    );
    newer.publication_year = Some(2023);
    let undated = ResearchRecord::new(
        "Field Notes".to_string(),
        "field-notes".to_string(),
        "Undated notes on diversion".to_string(),
        "evaluation".to_string(),
    );

    for item in [&older, &newer, &undated] {
        db.research().create_research(item).await.unwrap();
    }

    let all = db
        .research()
        .list(&ResearchFilter {
            limit: 20,
            ..Default::default()
        })
        .await
        .unwrap();
    let slugs: Vec<&str> = all.items.iter().map(|r| r.slug.as_str()).collect();
    assert_eq!(slugs, vec!["detention-costs", "diversion-outcomes", "field-notes"]);

    let evaluations = db
        .research()
        .list(&ResearchFilter {
            category: Some("evaluation".to_string()),
            limit: 20,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(evaluations.total, 2);

    let matching = db
        .research()
        .list(&ResearchFilter {
            query: Some("DIVERSION".to_string()),
            limit: 20,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(matching.total, 2);
}

#[tokio::test]
async fn test_search_folds_non_ascii_case() {
    let (db, _dir) = open_db().await;

    let service = ServiceRecord::new(
        "École Support".to_string(),
        "ecole-support".to_string(),
        "education".to_string(),
    );
    db.services().create_service(&service).await.unwrap();

    for query in ["école", "ÉCOLE", "École"] {
        let page = db
            .services()
            .search(&ServiceSearch {
                query: Some(query.to_string()),
                limit: 20,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.total, 1, "{}", query);
    }

    let mut item = ResearchRecord::new(
        "Étude Régionale".to_string(),
        "etude-regionale".to_string(),
        "Summary".to_string(),
        "policy".to_string(),
    );
    db.research().create_research(&item).await.unwrap();

    let find = |query: &str| ResearchFilter {
        query: Some(query.to_string()),
        limit: 20,
        ..Default::default()
    };
    assert_eq!(db.research().list(&find("ÉTUDE")).await.unwrap().total, 1);

    // Updates refresh the folded text
    item.title = "Ödland Review".to_string();
    assert!(db.research().update_research(&item).await.unwrap());
    assert_eq!(db.research().list(&find("étude")).await.unwrap().total, 0);
    assert_eq!(db.research().list(&find("ödland")).await.unwrap().total, 1);
}

#[tokio::test]
async fn test_update_and_delete_report_unknown_ids() {
    let (db, _dir) = open_db().await;

    let mut person = PersonRecord::new("Sam Lee".to_string(), "sam-lee".to_string());
    db.people().create_person(&person).await.unwrap();

    person.bio = Some("Mentor".to_string());
    assert!(db.people().update_person(&person).await.unwrap());
    let stored = db.people().get_by_slug("sam-lee").await.unwrap().unwrap();
    assert_eq!(stored.bio.as_deref(), Some("Mentor"));

    let ghost = PersonRecord::new("Ghost".to_string(), "ghost".to_string());
    assert!(!db.people().update_person(&ghost).await.unwrap());
    assert!(!db.people().delete_person(&ghost.id).await.unwrap());

    assert!(db.people().delete_person(&person.id).await.unwrap());
    assert!(db.people().get_by_id(&person.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_syndicated_lookups() {
    let (db, _dir) = open_db().await;

    let mut person = PersonRecord::new("Jordan Kay".to_string(), "jordan-kay".to_string());
    person.empathy_ledger_id = Some("el-profile-1".to_string());
    db.people().create_person(&person).await.unwrap();

    let found = db
        .people()
        .get_by_empathy_ledger_id("el-profile-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, person.id);
    assert!(found.is_syndicated());
    assert!(db
        .people()
        .get_by_empathy_ledger_id("el-profile-2")
        .await
        .unwrap()
        .is_none());

    let mut story = StoryRecord::new(
        "Back on Track".to_string(),
        "back-on-track".to_string(),
        "Content".to_string(),
    )
    .publish(Utc::now());
    story.person_id = Some(person.id.clone());
    story.empathy_ledger_id = Some("el-story-1".to_string());
    db.stories().create_story(&story).await.unwrap();

    let stored = db
        .stories()
        .get_by_empathy_ledger_id("el-story-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.slug, "back-on-track");
    assert_eq!(db.stories().list_for_person(&person.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_notification_counts() {
    let (db, _dir) = open_db().await;
    let repo = db.notifications();

    let a = NotificationRecord::new("u1".to_string(), "A".to_string(), "a".to_string());
    let b = NotificationRecord::new("u1".to_string(), "B".to_string(), "b".to_string());
    repo.create_notification(&a).await.unwrap();
    repo.create_notification(&b).await.unwrap();

    assert_eq!(repo.unread_count("u1").await.unwrap(), 2);
    assert_eq!(repo.mark_read("u1", &[a.id.clone()]).await.unwrap(), 1);
    assert_eq!(repo.mark_read("u1", &[a.id.clone()]).await.unwrap(), 0);
    assert_eq!(repo.mark_read("u1", &[]).await.unwrap(), 0);
    assert_eq!(repo.unread_count("u1").await.unwrap(), 1);

    let read = repo.list_for_user("u1", false, 20).await.unwrap();
    assert_eq!(read.len(), 2);
    assert!(read.iter().any(|n| n.is_read && n.read_at.is_some()));

    assert_eq!(repo.mark_all_read("u1").await.unwrap(), 1);
    assert!(repo.list_for_user("u1", true, 20).await.unwrap().is_empty());
}
