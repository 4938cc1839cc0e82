//! Response models for the auth endpoints.

mod error_response;
mod session_response;

pub use error_response::ErrorResponse;
pub use session_response::{SessionResponse, SessionUser, SessionUserMetadata};
