// Middleware Module

pub mod auth;
pub mod cors;
pub mod logging;
pub mod rate_limit;

pub use auth::{authenticate, check_permission, required_permission, AuthExtension};
pub use cors::cors_layer;
pub use logging::logging_layer;
pub use rate_limit::PerKeyRateLimiter;
