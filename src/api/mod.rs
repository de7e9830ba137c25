// API Module - REST API Server for JusticeHub

pub mod config;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod state;

// Re-export commonly used types
pub use config::{ApiConfig, Permission};
pub use server::{build_router, ApiServer};
pub use state::AppState;

/// API module tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.port, 8080);
        assert!(config.enable_cors);
        assert!(config.api_keys.is_empty());
    }
}
