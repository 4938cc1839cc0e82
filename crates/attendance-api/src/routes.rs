//! API routes configuration
//!
//! This module wires all HTTP routes for the Attendance Hub backend.

use crate::handlers::auth;
use actix_web::{web, HttpResponse};
use serde_json::json;

/// Configure API routes for the Attendance Hub backend
///
/// - ANY  /api/auth/google/start - Begin the Google sign-in flow
/// - ANY  /api/auth/google/callback - Finish the flow, mint the session
/// - POST /api/auth/logout - Clear the session (handler enforces the method)
/// - GET  /api/auth/me - Current user info (handler enforces the method)
/// - GET  /api/healthcheck - Health check endpoint
///
/// The auth routes register for every method on purpose: the handlers answer
/// wrong-method requests themselves with a JSON 405 body instead of the
/// framework default.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/auth")
                    .route("/google/start", web::route().to(auth::google_start_handler))
                    .route("/google/callback", web::route().to(auth::google_callback_handler))
                    .route("/logout", web::route().to(auth::logout_handler))
                    .route("/me", web::route().to(auth::me_handler)),
            )
            .route("/healthcheck", web::get().to(healthcheck_handler)),
    );
}

/// Health check endpoint handler
async fn healthcheck_handler() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
