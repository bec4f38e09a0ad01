//! HTTP adapter - axum routes, DTOs, and error mapping.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{ApiError, AppState};
pub use routes::api_router;
