//! Authentication handlers for the Attendance Hub dashboard
//!
//! Session state rides exclusively on HttpOnly cookies; there is no server
//! session table.
//!
//! ## Endpoints
//! - ANY  /api/auth/google/start - Redirect the browser into Google sign-in
//! - ANY  /api/auth/google/callback - Finish the flow, set the session cookie
//! - POST /api/auth/logout - Clear the session and flow cookies
//! - GET  /api/auth/me - Current user info from the session cookie

pub mod models;

mod callback;
mod logout;
mod me;
mod start;

pub use callback::google_callback_handler;
pub use logout::logout_handler;
pub use me::me_handler;
pub use start::google_start_handler;

use std::collections::HashMap;

use actix_web::http::header;
use actix_web::HttpRequest;
use attendance_auth::cookie::{self, CookieOptions};
use attendance_auth::session::SESSION_TTL_DAYS;
use attendance_oauth::FLOW_TTL_SECONDS;

/// Cookies sent with the request; an absent or unreadable header is an
/// empty map.
pub(crate) fn request_cookies(req: &HttpRequest) -> HashMap<String, String> {
    req.headers()
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(cookie::parse)
        .unwrap_or_default()
}

/// First occurrence of a query parameter, empty string when absent.
pub(crate) fn first_query_value(query_string: &str, name: &str) -> String {
    url::form_urlencoded::parse(query_string.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}

/// `Set-Cookie` line that stores the flow state for the login window.
pub(crate) fn flow_cookie(value: &str, secure: bool) -> String {
    cookie::serialize(
        cookie::FLOW_COOKIE_NAME,
        value,
        &CookieOptions {
            max_age: Some(FLOW_TTL_SECONDS),
            secure: Some(secure),
            ..Default::default()
        },
    )
}

/// `Set-Cookie` line that stores the session credential for seven days.
pub(crate) fn session_cookie(token: &str, secure: bool) -> String {
    cookie::serialize(
        cookie::SESSION_COOKIE_NAME,
        token,
        &CookieOptions {
            max_age: Some(SESSION_TTL_DAYS * 24 * 60 * 60),
            secure: Some(secure),
            ..Default::default()
        },
    )
}

/// `Set-Cookie` line that expires a cookie immediately.
pub(crate) fn clear_cookie(name: &str, secure: bool) -> String {
    cookie::serialize(
        name,
        "",
        &CookieOptions {
            max_age: Some(0),
            secure: Some(secure),
            ..Default::default()
        },
    )
}


#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_request_cookies_reads_header() {
        let req = TestRequest::default()
            .insert_header((header::COOKIE, "session=tok; flow-oauth=fv"))
            .to_http_request();
        let cookies = request_cookies(&req);
        assert_eq!(cookies.get("session").map(String::as_str), Some("tok"));
        assert_eq!(cookies.get("flow-oauth").map(String::as_str), Some("fv"));
    }

    #[test]
    fn test_request_cookies_absent_header() {
        let req = TestRequest::default().to_http_request();
        assert!(request_cookies(&req).is_empty());
    }

    #[test]
    fn test_first_query_value_takes_first() {
        assert_eq!(first_query_value("code=a&code=b&state=s", "code"), "a");
        assert_eq!(first_query_value("code=a&state=s", "state"), "s");
        assert_eq!(first_query_value("state=s", "code"), "");
        assert_eq!(first_query_value("code=%2Fx%20y", "code"), "/x y");
    }

    #[test]
    fn test_cookie_builders_respect_secure_flag() {
        assert!(flow_cookie("v", true).contains("Secure"));
        assert!(!flow_cookie("v", false).contains("Secure"));
        assert!(session_cookie("t", true).starts_with("session=t; Max-Age=604800"));
        assert!(clear_cookie(cookie::FLOW_COOKIE_NAME, true).starts_with("flow-oauth=; Max-Age=0"));
    }
}
