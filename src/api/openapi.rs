// OpenAPI Documentation

use crate::api::{
    models::{
        error::ApiErrorResponse,
        request::{EventInput, FrameworkInput, MarkReadRequest, PersonInput, ResearchInput},
        response::{
            DeletedResponse, HealthResponse, MarkReadResponse, NotificationList,
            OrganizationDetail, PersonProfile,
        },
    },
    routes,
};
use crate::db::{
    CategoryCount, EventRecord, FrameworkRecord, NotificationRecord, OrganizationRecord,
    Pagination, PersonRecord, ResearchRecord, ServiceRecord, StoryRecord,
};
use crate::empathy_ledger::SyncReport;
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        routes::health::health_check,
        routes::services::search_services,
        routes::services::get_service,
        routes::services::list_categories,
        routes::organizations::list_organizations,
        routes::organizations::get_organization,
        routes::events::list_events,
        routes::events::get_event,
        routes::frameworks::list_frameworks,
        routes::frameworks::get_framework,
        routes::people::list_people,
        routes::people::get_person,
        routes::research::list_research,
        routes::research::get_research,
        routes::stories::list_stories,
        routes::stories::get_story,
        routes::notifications::list_notifications,
        routes::notifications::mark_read,
        routes::admin::create_event,
        routes::admin::update_event,
        routes::admin::delete_event,
        routes::admin::create_framework,
        routes::admin::update_framework,
        routes::admin::delete_framework,
        routes::admin::create_person,
        routes::admin::update_person,
        routes::admin::delete_person,
        routes::admin::create_research,
        routes::admin::update_research,
        routes::admin::delete_research,
        routes::sync::sync_empathy_ledger,
    ),
    components(
        schemas(
            // Records
            ServiceRecord,
            CategoryCount,
            OrganizationRecord,
            EventRecord,
            FrameworkRecord,
            PersonRecord,
            ResearchRecord,
            StoryRecord,
            NotificationRecord,
            Pagination,

            // Request models
            EventInput,
            FrameworkInput,
            PersonInput,
            ResearchInput,
            MarkReadRequest,

            // Response models
            HealthResponse,
            OrganizationDetail,
            PersonProfile,
            NotificationList,
            MarkReadResponse,
            DeletedResponse,
            SyncReport,

            // Error model
            ApiErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check"),
        (name = "services", description = "Youth justice service finder"),
        (name = "organizations", description = "Organizations running services"),
        (name = "events", description = "Public events"),
        (name = "frameworks", description = "Justice frameworks"),
        (name = "people", description = "Public profiles"),
        (name = "research", description = "Research library"),
        (name = "stories", description = "Published stories"),
        (name = "notifications", description = "User notifications"),
        (name = "admin", description = "Content management and Empathy Ledger sync"),
    ),
    info(
        title = "JusticeHub API",
        version = "0.1.0",
        description = r#"
# JusticeHub REST API

Service directory, content library and storyteller profiles for youth justice.

## Responses

Successful responses are wrapped as `{"success": true, "data": ...}`; listings
add a `pagination` block with `total`, `limit`, `offset` and `has_more`.

Errors use `{"success": false, "error": "...", "code": "..."}`.

## Authentication

Read endpoints are public. Notification endpoints need a User key and
`/api/admin` endpoints an Admin key, passed in the `X-API-Key` header:

```
X-API-Key: your-api-key-here
```

## Rate Limiting

Authenticated requests are rate limited per API key.
"#,
        license(
            name = "GPL-3.0",
            url = "https://www.gnu.org/licenses/gpl-3.0.en.html"
        )
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-API-Key"))),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_admin_paths() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/services"));
        assert!(doc.paths.paths.contains_key("/api/admin/events/{id}"));
        assert!(doc.paths.paths.contains_key("/api/admin/sync/empathy-ledger"));
    }
}
