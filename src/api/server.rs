// API Server Implementation

use crate::api::{config::ApiConfig, middleware, routes, state::AppState};
use crate::db::JusticeHubDatabase;
use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tracing::info;

/// API Server
pub struct ApiServer {
    config: ApiConfig,
    state: Arc<AppState>,
}

impl ApiServer {
    /// Create new API server
    pub fn new(config: ApiConfig, database: Option<Arc<JusticeHubDatabase>>) -> crate::Result<Self> {
        let mut state = AppState::new(config.clone())?;
        if let Some(database) = database {
            state = state.with_database(database);
        }

        Ok(Self {
            config,
            state: Arc::new(state),
        })
    }

    /// Build the router
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Run the server
    pub async fn run(self) -> crate::Result<()> {
        let app = self.router();

        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("JusticeHub API server listening on {}", addr);
        if self.config.enable_swagger {
            info!("OpenAPI documentation available at: http://{}/api/docs", addr);
        }
        info!("Health check endpoint: http://{}/health", addr);

        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Get the application state
    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }
}

/// Build the full router over shared state
pub fn build_router(state: Arc<AppState>) -> Router {
    let config = state.config.clone();

    let admin_routes = Router::new()
        .route("/events", post(routes::admin::create_event))
        .route(
            "/events/:id",
            put(routes::admin::update_event).delete(routes::admin::delete_event),
        )
        .route("/frameworks", post(routes::admin::create_framework))
        .route(
            "/frameworks/:id",
            put(routes::admin::update_framework).delete(routes::admin::delete_framework),
        )
        .route("/people", post(routes::admin::create_person))
        .route(
            "/people/:id",
            put(routes::admin::update_person).delete(routes::admin::delete_person),
        )
        .route("/research", post(routes::admin::create_research))
        .route(
            "/research/:id",
            put(routes::admin::update_research).delete(routes::admin::delete_research),
        )
        .route(
            "/sync/empathy-ledger",
            post(routes::sync::sync_empathy_ledger),
        );

    let api_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        // Service finder
        .route("/services", get(routes::services::search_services))
        .route("/services/categories", get(routes::services::list_categories))
        .route("/services/:id", get(routes::services::get_service))
        .route("/organizations", get(routes::organizations::list_organizations))
        .route("/organizations/:id", get(routes::organizations::get_organization))
        // Content
        .route("/events", get(routes::events::list_events))
        .route("/events/:slug", get(routes::events::get_event))
        .route("/frameworks", get(routes::frameworks::list_frameworks))
        .route("/frameworks/:slug", get(routes::frameworks::get_framework))
        .route("/people", get(routes::people::list_people))
        .route("/people/:slug", get(routes::people::get_person))
        .route("/research", get(routes::research::list_research))
        .route("/research/:slug", get(routes::research::get_research))
        .route("/stories", get(routes::stories::list_stories))
        .route("/stories/:slug", get(routes::stories::get_story))
        // Signed-in users
        .route("/notifications", get(routes::notifications::list_notifications))
        .route("/notifications/read", post(routes::notifications::mark_read))
        .nest("/admin", admin_routes);

    let mut router = Router::new()
        .nest("/api", api_routes)
        .route("/health", get(routes::health::health_check))
        .merge(swagger_routes(&config))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::authenticate,
        ))
        .layer(DefaultBodyLimit::max(config.max_body_size));

    if config.enable_cors {
        router = router.layer(middleware::cors_layer(&config.cors_origins));
    }

    router
        .layer(CompressionLayer::new())
        .layer(middleware::logging_layer())
        .with_state(state)
}

/// Build Swagger UI routes
fn swagger_routes(config: &ApiConfig) -> Router<Arc<AppState>> {
    if config.enable_swagger {
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        let openapi = crate::api::openapi::ApiDoc::openapi();

        Router::new().merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi))
    } else {
        Router::new()
    }
}
