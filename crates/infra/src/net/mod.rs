//! Transport to the platform API and classification of its answers.

pub mod api_response;
pub mod gateway;

pub use api_response::{ApiError, ApiResponse};
pub use gateway::{Gateway, GatewayError, DEFAULT_TIMEOUT};
