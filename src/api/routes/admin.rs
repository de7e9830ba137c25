// Admin Content Routes
//
// Create, update and delete for events, frameworks, people and research.
// Slugs are derived from the title on create and never change afterwards.

use crate::api::{
    models::{
        error::{ApiError, ApiErrorResponse},
        request::{EventInput, FrameworkInput, PersonInput, ResearchInput},
        response::{ApiResponse, Created, DeletedResponse},
    },
    state::AppState,
};
use crate::db::{
    Database, EventRecord, FrameworkRecord, PersonRecord, ResearchRecord, SlugScope,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use std::sync::Arc;
use tracing::info;

fn deleted(id: String) -> ApiResponse<DeletedResponse> {
    ApiResponse::ok(DeletedResponse { id, deleted: true })
}

/// Create an event
#[utoipa::path(
    post,
    path = "/api/admin/events",
    tag = "admin",
    request_body = EventInput,
    responses(
        (status = 201, description = "Event created", body = EventRecord),
        (status = 400, description = "Validation failed", body = ApiErrorResponse),
        (status = 403, description = "Admin key required", body = ApiErrorResponse)
    ),
    security(("api_key" = []))
)]
pub async fn create_event(
    State(state): State<Arc<AppState>>,
    body: Result<Json<EventInput>, JsonRejection>,
) -> Result<Created<EventRecord>, ApiError> {
    let Json(input) = body?;
    let db = state.database()?;

    let mut draft = EventRecord::new(String::new(), String::new(), String::new(), input.start_date);
    input.apply_to(&mut draft)?;

    let event = db
        .insert_with_unique_slug(SlugScope::Events, &draft.title, |slug| {
            let record = EventRecord { slug, ..draft.clone() };
            async move { db.events().create_event(&record).await.map(|_| record) }
        })
        .await?;
    info!("Created event {} ({})", event.slug, event.id);

    Ok(Created(event))
}

/// Update an event
#[utoipa::path(
    put,
    path = "/api/admin/events/{id}",
    tag = "admin",
    params(("id" = String, Path, description = "Event ID")),
    request_body = EventInput,
    responses(
        (status = 200, description = "Event updated", body = EventRecord),
        (status = 400, description = "Validation failed", body = ApiErrorResponse),
        (status = 404, description = "Unknown event", body = ApiErrorResponse)
    ),
    security(("api_key" = []))
)]
pub async fn update_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<EventInput>, JsonRejection>,
) -> Result<ApiResponse<EventRecord>, ApiError> {
    let Json(input) = body?;
    let events = state.database()?.events();

    let mut event = events
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Event", &id))?;
    input.apply_to(&mut event)?;

    if !events.update_event(&event).await? {
        return Err(ApiError::not_found("Event", &id));
    }

    Ok(ApiResponse::ok(event))
}

/// Delete an event
#[utoipa::path(
    delete,
    path = "/api/admin/events/{id}",
    tag = "admin",
    params(("id" = String, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event deleted", body = DeletedResponse),
        (status = 404, description = "Unknown event", body = ApiErrorResponse)
    ),
    security(("api_key" = []))
)]
pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<ApiResponse<DeletedResponse>, ApiError> {
    if !state.database()?.events().delete_event(&id).await? {
        return Err(ApiError::not_found("Event", &id));
    }
    info!("Deleted event {}", id);
    Ok(deleted(id))
}

/// Create a framework
#[utoipa::path(
    post,
    path = "/api/admin/frameworks",
    tag = "admin",
    request_body = FrameworkInput,
    responses(
        (status = 201, description = "Framework created", body = FrameworkRecord),
        (status = 400, description = "Validation failed", body = ApiErrorResponse)
    ),
    security(("api_key" = []))
)]
pub async fn create_framework(
    State(state): State<Arc<AppState>>,
    body: Result<Json<FrameworkInput>, JsonRejection>,
) -> Result<Created<FrameworkRecord>, ApiError> {
    let Json(input) = body?;
    let db = state.database()?;

    let mut draft = FrameworkRecord::new(String::new(), String::new(), String::new());
    input.apply_to(&mut draft)?;

    let framework = db
        .insert_with_unique_slug(SlugScope::Frameworks, &draft.name, |slug| {
            let record = FrameworkRecord { slug, ..draft.clone() };
            async move { db.frameworks().create_framework(&record).await.map(|_| record) }
        })
        .await?;
    info!("Created framework {} ({})", framework.slug, framework.id);

    Ok(Created(framework))
}

/// Update a framework
#[utoipa::path(
    put,
    path = "/api/admin/frameworks/{id}",
    tag = "admin",
    params(("id" = String, Path, description = "Framework ID")),
    request_body = FrameworkInput,
    responses(
        (status = 200, description = "Framework updated", body = FrameworkRecord),
        (status = 404, description = "Unknown framework", body = ApiErrorResponse)
    ),
    security(("api_key" = []))
)]
pub async fn update_framework(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<FrameworkInput>, JsonRejection>,
) -> Result<ApiResponse<FrameworkRecord>, ApiError> {
    let Json(input) = body?;
    let frameworks = state.database()?.frameworks();

    let mut framework = frameworks
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Framework", &id))?;
    input.apply_to(&mut framework)?;

    if !frameworks.update_framework(&framework).await? {
        return Err(ApiError::not_found("Framework", &id));
    }

    Ok(ApiResponse::ok(framework))
}

/// Delete a framework
#[utoipa::path(
    delete,
    path = "/api/admin/frameworks/{id}",
    tag = "admin",
    params(("id" = String, Path, description = "Framework ID")),
    responses(
        (status = 200, description = "Framework deleted", body = DeletedResponse),
        (status = 404, description = "Unknown framework", body = ApiErrorResponse)
    ),
    security(("api_key" = []))
)]
pub async fn delete_framework(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<ApiResponse<DeletedResponse>, ApiError> {
    if !state.database()?.frameworks().delete_framework(&id).await? {
        return Err(ApiError::not_found("Framework", &id));
    }
    info!("Deleted framework {}", id);
    Ok(deleted(id))
}

/// Create a profile
#[utoipa::path(
    post,
    path = "/api/admin/people",
    tag = "admin",
    request_body = PersonInput,
    responses(
        (status = 201, description = "Profile created", body = PersonRecord),
        (status = 400, description = "Validation failed", body = ApiErrorResponse)
    ),
    security(("api_key" = []))
)]
pub async fn create_person(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PersonInput>, JsonRejection>,
) -> Result<Created<PersonRecord>, ApiError> {
    let Json(input) = body?;
    let db = state.database()?;

    let mut draft = PersonRecord::new(String::new(), String::new());
    input.apply_to(&mut draft)?;

    let person = db
        .insert_with_unique_slug(SlugScope::People, &draft.full_name, |slug| {
            let record = PersonRecord { slug, ..draft.clone() };
            async move { db.people().create_person(&record).await.map(|_| record) }
        })
        .await?;
    info!("Created profile {} ({})", person.slug, person.id);

    Ok(Created(person))
}

/// Update a profile
#[utoipa::path(
    put,
    path = "/api/admin/people/{id}",
    tag = "admin",
    params(("id" = String, Path, description = "Person ID")),
    request_body = PersonInput,
    responses(
        (status = 200, description = "Profile updated", body = PersonRecord),
        (status = 404, description = "Unknown profile", body = ApiErrorResponse)
    ),
    security(("api_key" = []))
)]
pub async fn update_person(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<PersonInput>, JsonRejection>,
) -> Result<ApiResponse<PersonRecord>, ApiError> {
    let Json(input) = body?;
    let people = state.database()?.people();

    let mut person = people
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Person", &id))?;
    input.apply_to(&mut person)?;

    if !people.update_person(&person).await? {
        return Err(ApiError::not_found("Person", &id));
    }

    Ok(ApiResponse::ok(person))
}

/// Delete a profile; their stories stay, unlinked
#[utoipa::path(
    delete,
    path = "/api/admin/people/{id}",
    tag = "admin",
    params(("id" = String, Path, description = "Person ID")),
    responses(
        (status = 200, description = "Profile deleted", body = DeletedResponse),
        (status = 404, description = "Unknown profile", body = ApiErrorResponse)
    ),
    security(("api_key" = []))
)]
pub async fn delete_person(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<ApiResponse<DeletedResponse>, ApiError> {
    if !state.database()?.people().delete_person(&id).await? {
        return Err(ApiError::not_found("Person", &id));
    }
    info!("Deleted profile {}", id);
    Ok(deleted(id))
}

/// Create a research item
#[utoipa::path(
    post,
    path = "/api/admin/research",
    tag = "admin",
    request_body = ResearchInput,
    responses(
        (status = 201, description = "Research item created", body = ResearchRecord),
        (status = 400, description = "Validation failed", body = ApiErrorResponse)
    ),
    security(("api_key" = []))
)]
pub async fn create_research(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ResearchInput>, JsonRejection>,
) -> Result<Created<ResearchRecord>, ApiError> {
    let Json(input) = body?;
    let db = state.database()?;

    let mut draft = ResearchRecord::new(String::new(), String::new(), String::new(), String::new());
    input.apply_to(&mut draft)?;

    let item = db
        .insert_with_unique_slug(SlugScope::Research, &draft.title, |slug| {
            let record = ResearchRecord { slug, ..draft.clone() };
            async move { db.research().create_research(&record).await.map(|_| record) }
        })
        .await?;
    info!("Created research item {} ({})", item.slug, item.id);

    Ok(Created(item))
}

/// Update a research item
#[utoipa::path(
    put,
    path = "/api/admin/research/{id}",
    tag = "admin",
    params(("id" = String, Path, description = "Research item ID")),
    request_body = ResearchInput,
    responses(
        (status = 200, description = "Research item updated", body = ResearchRecord),
        (status = 404, description = "Unknown research item", body = ApiErrorResponse)
    ),
    security(("api_key" = []))
)]
pub async fn update_research(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Result<Json<ResearchInput>, JsonRejection>,
) -> Result<ApiResponse<ResearchRecord>, ApiError> {
    let Json(input) = body?;
    let research = state.database()?.research();

    let mut item = research
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Research item", &id))?;
    input.apply_to(&mut item)?;

    if !research.update_research(&item).await? {
        return Err(ApiError::not_found("Research item", &id));
    }

    Ok(ApiResponse::ok(item))
}

/// Delete a research item
#[utoipa::path(
    delete,
    path = "/api/admin/research/{id}",
    tag = "admin",
    params(("id" = String, Path, description = "Research item ID")),
    responses(
        (status = 200, description = "Research item deleted", body = DeletedResponse),
        (status = 404, description = "Unknown research item", body = ApiErrorResponse)
    ),
    security(("api_key" = []))
)]
pub async fn delete_research(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<ApiResponse<DeletedResponse>, ApiError> {
    if !state.database()?.research().delete_research(&id).await? {
        return Err(ApiError::not_found("Research item", &id));
    }
    info!("Deleted research item {}", id);
    Ok(deleted(id))
}
