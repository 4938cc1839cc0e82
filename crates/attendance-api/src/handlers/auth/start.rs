//! Google sign-in start handler
//!
//! ANY /api/auth/google/start - Sends the browser into Google sign-in

use std::sync::Arc;

use actix_web::http::header;
use actix_web::{web, HttpResponse};
use attendance_commons::AuthSettings;
use attendance_oauth::GoogleOauthFlow;
use log::error;

use super::flow_cookie;
use super::models::ErrorResponse;

/// ANY /api/auth/google/start
///
/// Builds the provider authorization URL, pins the flow cookie, and
/// redirects. Method is not restricted so plain anchors, forms, and
/// programmatic navigation all work.
pub async fn google_start_handler(
    flow: web::Data<Arc<GoogleOauthFlow>>,
    settings: web::Data<AuthSettings>,
) -> HttpResponse {
    match flow.start() {
        Ok(payload) => HttpResponse::Found()
            .append_header((
                header::SET_COOKIE,
                flow_cookie(&payload.flow_cookie_value, settings.cookie_secure),
            ))
            .append_header((header::LOCATION, payload.authorize_url))
            .finish(),
        Err(err) => {
            error!("Failed to initiate Google sign-in: {}", err);
            HttpResponse::InternalServerError().json(ErrorResponse::new(err.to_string()))
        },
    }
}
