//! Logout handler
//!
//! POST /api/auth/logout - Expires the session and flow cookies

use actix_web::http::{header, Method};
use actix_web::{web, HttpRequest, HttpResponse};
use attendance_auth::cookie::{FLOW_COOKIE_NAME, SESSION_COOKIE_NAME};
use attendance_commons::AuthSettings;
use serde_json::json;

use super::clear_cookie;
use super::models::ErrorResponse;

/// POST /api/auth/logout
///
/// Stateless logout: expiring the cookies is the whole operation, no
/// server-side record exists. Any other method gets a 405.
pub async fn logout_handler(req: HttpRequest, settings: web::Data<AuthSettings>) -> HttpResponse {
    if req.method() != Method::POST {
        return HttpResponse::MethodNotAllowed().json(ErrorResponse::new("Method not allowed"));
    }

    let secure = settings.cookie_secure;
    HttpResponse::Ok()
        .append_header((header::SET_COOKIE, clear_cookie(SESSION_COOKIE_NAME, secure)))
        .append_header((header::SET_COOKIE, clear_cookie(FLOW_COOKIE_NAME, secure)))
        .json(json!({ "ok": true }))
}
