// Empathy Ledger Sync Tests
// Runs syndication passes against a mocked Empathy Ledger API

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use httpmock::prelude::*;
use httpmock::Mock;
use justicehub::api::{build_router, ApiConfig, AppState, Permission};
use justicehub::db::*;
use justicehub::empathy_ledger::{EmpathyLedgerClient, EmpathyLedgerConfig, EmpathyLedgerSync};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const EL_KEY: &str = "el-secret";

async fn open_db() -> (JusticeHubDatabase, TempDir) {
    let dir = TempDir::new().unwrap();
    let config = DatabaseConfig::sqlite(dir.path().join("justicehub.db"));
    let db = JusticeHubDatabase::new(&config).await.unwrap();
    (db, dir)
}

fn client_for(server: &MockServer) -> EmpathyLedgerClient {
    EmpathyLedgerClient::new(EmpathyLedgerConfig::new(server.base_url(), EL_KEY)).unwrap()
}

fn single_page(data: Value) -> Value {
    json!({
        "data": data,
        "pagination": { "page": 1, "limit": 50, "total": 0, "has_more": false }
    })
}

fn profiles() -> Value {
    json!([
        {
            "id": "p-1",
            "display_name": "Mia Walker",
            "bio": "Storyteller from Townsville",
            "role": "Youth advocate",
            "is_public": true
        },
        {
            "id": "p-2",
            "display_name": "Private Person",
            "is_public": false
        },
        {
            "id": "p-3",
            "display_name": "No Consent Flag"
        }
    ])
}

fn stories() -> Value {
    json!([
        {
            "id": "s-1",
            "title": "Coming Home",
            "summary": "A story about family",
            "content": "Full text",
            "storyteller_id": "p-1",
            "is_public": true,
            "published_at": "2024-05-01T00:00:00Z"
        },
        {
            "id": "s-2",
            "title": "Private Draft",
            "content": "Hidden",
            "storyteller_id": "p-1",
            "is_public": false
        },
        {
            "id": "s-3",
            "title": "Orphan Story",
            "content": "Teller not synced",
            "storyteller_id": "p-2",
            "is_public": true
        }
    ])
}

async fn mock_upstream(server: &MockServer) {
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/profiles")
                .header("authorization", format!("Bearer {}", EL_KEY));
            then.status(200).json_body(single_page(profiles()));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/stories")
                .header("authorization", format!("Bearer {}", EL_KEY));
            then.status(200).json_body(single_page(stories()));
        })
        .await;
}

#[tokio::test]
async fn test_sync_imports_public_profiles_and_stories() {
    let server = MockServer::start_async().await;
    mock_upstream(&server).await;
    let (db, _dir) = open_db().await;
    let client = client_for(&server);

    let report = EmpathyLedgerSync::new(&client, &db).run().await.unwrap();
    assert!(report.is_clean());
    assert_eq!(report.profiles_created, 1);
    assert_eq!(report.stories_created, 1);
    // Two private profiles, one private story, one orphan story
    assert_eq!(report.skipped, 4);

    let person = db.people().get_by_slug("mia-walker").await.unwrap().unwrap();
    assert_eq!(person.empathy_ledger_id.as_deref(), Some("p-1"));
    assert_eq!(person.role_title.as_deref(), Some("Youth advocate"));
    assert!(person.last_synced_at.is_some());
    assert!(db.people().get_by_empathy_ledger_id("p-2").await.unwrap().is_none());

    let story = db.stories().get_by_slug("coming-home").await.unwrap().unwrap();
    assert!(story.is_published());
    assert_eq!(story.person_id.as_deref(), Some(person.id.as_str()));
    assert_eq!(story.excerpt.as_deref(), Some("A story about family"));
    assert!(db.stories().get_by_slug("orphan-story").await.unwrap().is_none());
}

#[tokio::test]
async fn test_second_pass_updates_in_place() {
    let server = MockServer::start_async().await;
    mock_upstream(&server).await;
    let (db, _dir) = open_db().await;
    let client = client_for(&server);

    EmpathyLedgerSync::new(&client, &db).run().await.unwrap();

    // Local curation survives a resync
    let mut person = db.people().get_by_slug("mia-walker").await.unwrap().unwrap();
    person.is_featured = true;
    db.people().update_person(&person).await.unwrap();

    let report = EmpathyLedgerSync::new(&client, &db).run().await.unwrap();
    assert_eq!(report.profiles_created, 0);
    assert_eq!(report.profiles_updated, 1);
    assert_eq!(report.stories_created, 0);
    assert_eq!(report.stories_updated, 1);

    let people = db
        .people()
        .list(&PersonFilter {
            limit: 20,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(people.total, 1);
    assert!(people.items[0].is_featured);
    assert_eq!(people.items[0].slug, "mia-walker");

    let stories = db.stories().list_published(20, 0).await.unwrap();
    assert_eq!(stories.total, 1);
}

async fn serve<'a>(server: &'a MockServer, profiles: Value, stories: Value) -> [Mock<'a>; 2] {
    let profiles = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/profiles");
            then.status(200).json_body(single_page(profiles));
        })
        .await;
    let stories = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/stories");
            then.status(200).json_body(single_page(stories));
        })
        .await;
    [profiles, stories]
}

fn teller(is_public: bool) -> Value {
    json!([{ "id": "p-1", "display_name": "Mia Walker", "is_public": is_public }])
}

fn tales(second_public: bool) -> Value {
    json!([
        { "id": "s-1", "title": "Coming Home", "content": "One", "storyteller_id": "p-1", "is_public": true },
        { "id": "s-2", "title": "Second Chance", "content": "Two", "storyteller_id": "p-1", "is_public": second_public }
    ])
}

#[tokio::test]
async fn test_withdrawn_consent_hides_local_copies() {
    let server = MockServer::start_async().await;
    let (db, _dir) = open_db().await;
    let client = client_for(&server);

    let mocks = serve(&server, teller(true), tales(true)).await;
    let report = EmpathyLedgerSync::new(&client, &db).run().await.unwrap();
    assert_eq!(report.stories_created, 2);
    assert_eq!(report.withdrawn, 0);
    for mut mock in mocks {
        mock.delete_async().await;
    }

    // One story goes private
    let mocks = serve(&server, teller(true), tales(false)).await;
    let report = EmpathyLedgerSync::new(&client, &db).run().await.unwrap();
    assert_eq!(report.withdrawn, 1);
    assert_eq!(report.stories_updated, 1);
    let second = db.stories().get_by_slug("second-chance").await.unwrap().unwrap();
    assert!(!second.is_published());
    assert!(db.stories().get_by_slug("coming-home").await.unwrap().unwrap().is_published());
    for mut mock in mocks {
        mock.delete_async().await;
    }

    // The storyteller withdraws entirely
    let _mocks = serve(&server, teller(false), tales(false)).await;
    let report = EmpathyLedgerSync::new(&client, &db).run().await.unwrap();
    assert!(report.is_clean());
    assert_eq!(report.withdrawn, 1);
    assert_eq!(report.stories_updated, 0);

    let person = db.people().get_by_empathy_ledger_id("p-1").await.unwrap().unwrap();
    assert!(!person.is_public);
    assert!(!db.stories().get_by_slug("coming-home").await.unwrap().unwrap().is_published());
    assert_eq!(db.stories().list_published(20, 0).await.unwrap().total, 0);
    let visible = db
        .people()
        .list(&PersonFilter {
            public_only: true,
            limit: 20,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(visible.total, 0);

    // Nothing left to hide on a repeat pass
    let report = EmpathyLedgerSync::new(&client, &db).run().await.unwrap();
    assert_eq!(report.withdrawn, 0);
    assert_eq!(report.skipped, 3);
}

#[tokio::test]
async fn test_follows_upstream_pagination() {
    let server = MockServer::start_async().await;
    let first = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/profiles")
                .query_param("page", "1");
            then.status(200).json_body(json!({
                "data": [{ "id": "p-1", "display_name": "Page One", "is_public": true }],
                "pagination": { "page": 1, "limit": 1, "total": 2, "has_more": true }
            }));
        })
        .await;
    let second = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/profiles")
                .query_param("page", "2");
            then.status(200).json_body(json!({
                "data": [{ "id": "p-2", "display_name": "Page Two", "is_public": true }],
                "pagination": { "page": 2, "limit": 1, "total": 2, "has_more": false }
            }));
        })
        .await;

    let client = client_for(&server);
    let fetched = client.fetch_profiles().await.unwrap();

    assert_eq!(fetched.len(), 2);
    assert_eq!(fetched[1].display_name, "Page Two");
    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn test_upstream_failure_aborts_pass() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v1/profiles");
            then.status(401).body("invalid api key");
        })
        .await;
    let (db, _dir) = open_db().await;
    let client = client_for(&server);

    let err = EmpathyLedgerSync::new(&client, &db).run().await.unwrap_err();
    assert!(err.to_string().contains("401"));
    assert!(err.to_string().contains("invalid api key"));

    let people = db
        .people()
        .list(&PersonFilter {
            limit: 20,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(people.total, 0);
}

#[tokio::test]
async fn test_sync_route_returns_report() {
    let server = MockServer::start_async().await;
    mock_upstream(&server).await;
    let (db, _dir) = open_db().await;

    let mut config = ApiConfig::default();
    config.add_key("admin".to_string(), Permission::Admin);
    config.empathy_ledger = Some(EmpathyLedgerConfig::new(server.base_url(), EL_KEY));
    let state = AppState::new(config).unwrap().with_database(Arc::new(db));
    let router = build_router(Arc::new(state));

    let request = Request::post("/api/admin/sync/empathy-ledger")
        .header("x-api-key", "admin")
        .body(Body::empty())
        .unwrap();
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["profiles_created"], 1);
    assert_eq!(body["data"]["stories_created"], 1);
    assert_eq!(body["data"]["errors"].as_array().unwrap().len(), 0);
}
