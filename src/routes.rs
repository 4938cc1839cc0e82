//! Route configuration for the server binary.
//!
//! The endpoint table lives in `attendance_api::routes`; this wrapper keeps
//! the composition point in the server crate.

use actix_web::web;

/// Configure all API routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    attendance_api::routes::configure_routes(cfg);
}
