// API Models Module

pub mod error;
pub mod request;
pub mod response;

pub use error::{ApiError, ApiErrorResponse};
pub use request::{
    EventInput, FrameworkInput, MarkReadRequest, PersonInput, ResearchInput,
};
pub use response::{ApiResponse, Created, HealthResponse};
