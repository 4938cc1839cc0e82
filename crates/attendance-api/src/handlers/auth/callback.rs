//! Google sign-in callback handler
//!
//! ANY /api/auth/google/callback - Finishes the flow started by
//! `google_start_handler`

use std::sync::Arc;

use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use attendance_auth::cookie::{FLOW_COOKIE_NAME, SESSION_COOKIE_NAME};
use attendance_commons::AuthSettings;
use attendance_oauth::GoogleOauthFlow;
use log::error;
use url::Url;

use super::models::ErrorResponse;
use super::{clear_cookie, first_query_value, request_cookies, session_cookie};

/// ANY /api/auth/google/callback
///
/// Runs phase B of the flow. The flow cookie is cleared on every outcome;
/// the session cookie is set only when a credential was minted. Success
/// redirects into the dashboard, failure redirects to the app base URL with
/// the message in an `auth_error` query parameter.
pub async fn google_callback_handler(
    req: HttpRequest,
    flow: web::Data<Arc<GoogleOauthFlow>>,
    settings: web::Data<AuthSettings>,
) -> HttpResponse {
    let code = first_query_value(req.query_string(), "code");
    let state = first_query_value(req.query_string(), "state");
    let cookies = request_cookies(&req);

    let result = flow
        .callback(&code, &state, cookies.get(FLOW_COOKIE_NAME).map(String::as_str))
        .await;

    let secure = settings.cookie_secure;
    let mut response = HttpResponse::Found();
    if result.clear_flow_cookie {
        response.append_header((header::SET_COOKIE, clear_cookie(FLOW_COOKIE_NAME, secure)));
    }
    if let Some(token) = &result.session_token {
        response.append_header((header::SET_COOKIE, session_cookie(token, secure)));
    }

    let location = match &result.error {
        Some(message) => match error_redirect(&result.app_base_url, message) {
            Ok(url) => url,
            Err(err) => {
                error!("Cannot build error redirect: {}", err);
                return HttpResponse::InternalServerError()
                    .append_header((header::SET_COOKIE, clear_cookie(FLOW_COOKIE_NAME, secure)))
                    .json(ErrorResponse::new("Invalid application base URL"));
            },
        },
        None => format!("{}{}", result.app_base_url, result.redirect_path),
    };

    response.append_header((header::LOCATION, location)).finish()
}

/// App base URL with the failure message attached as `auth_error`.
fn error_redirect(app_base_url: &str, message: &str) -> Result<String, url::ParseError> {
    let mut url = Url::parse(app_base_url)?;
    url.query_pairs_mut().append_pair("auth_error", message);
    Ok(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::auth::testing;
    use actix_web::http::StatusCode;
    use actix_web::test::TestRequest;
    use attendance_auth::session::verify_session;
    use attendance_commons::Role;
    use attendance_oauth::FlowState;

    fn flow_cookie_header(state: &str) -> (header::HeaderName, String) {
        let flow_state = FlowState {
            state: state.to_string(),
            verifier: "test-verifier".to_string(),
            created_at: chrono::Utc::now().timestamp_millis(),
        };
        let value = attendance_auth::cookie::serialize(
            FLOW_COOKIE_NAME,
            &serde_json::to_string(&flow_state).unwrap(),
            &Default::default(),
        );
        let pair = value.split(';').next().unwrap().to_string();
        (header::COOKIE, pair)
    }

    #[actix_web::test]
    async fn test_callback_success_sets_session_and_redirects() {
        let flow = web::Data::new(testing::flow(Some(testing::sample_user()), Some("student")));
        let settings = web::Data::new(testing::settings());
        let req = TestRequest::get()
            .uri("/api/auth/google/callback?code=auth-code&state=st")
            .insert_header(flow_cookie_header("st"))
            .to_http_request();

        let resp = google_callback_handler(req, flow, settings).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(testing::location(&resp), "https://hub.example.edu/dashboard");

        let cookies = testing::set_cookies(&resp);
        assert_eq!(cookies.len(), 2);
        assert!(cookies[0].starts_with("flow-oauth=; Max-Age=0"));
        assert!(cookies[1].starts_with("session="));
        assert!(cookies[1].contains("Max-Age=604800"));

        let token = cookies[1]
            .split(';')
            .next()
            .unwrap()
            .trim_start_matches("session=")
            .to_string();
        let payload = verify_session(&token, testing::SESSION_SECRET).unwrap();
        assert_eq!(payload.role, Role::Student);
        assert_eq!(payload.email, "jordan@students.example.edu");
    }

    #[actix_web::test]
    async fn test_callback_failure_redirects_with_auth_error() {
        let flow = web::Data::new(testing::flow(Some(testing::sample_user()), None));
        let settings = web::Data::new(testing::settings());
        // No flow cookie: the login window is gone.
        let req = TestRequest::get()
            .uri("/api/auth/google/callback?code=auth-code&state=st")
            .to_http_request();

        let resp = google_callback_handler(req, flow, settings).await;

        assert_eq!(resp.status(), StatusCode::FOUND);
        let location = testing::location(&resp);
        assert!(location.starts_with("https://hub.example.edu/?auth_error="));
        assert!(location.contains("Login+session+expired.+Please+retry."));

        let cookies = testing::set_cookies(&resp);
        assert_eq!(cookies.len(), 1, "failure must not set a session cookie");
        assert!(cookies[0].starts_with("flow-oauth=; Max-Age=0"));
    }

    #[actix_web::test]
    async fn test_callback_missing_query_params() {
        let flow = web::Data::new(testing::flow(None, None));
        let settings = web::Data::new(testing::settings());
        let req = TestRequest::get()
            .uri("/api/auth/google/callback")
            .to_http_request();

        let resp = google_callback_handler(req, flow, settings).await;

        let location = testing::location(&resp);
        assert!(location.contains("auth_error=Missing+OAuth+code%2Fstate"));
    }

    #[actix_web::test]
    async fn test_callback_takes_first_of_repeated_params() {
        let flow = web::Data::new(testing::flow(Some(testing::sample_user()), None));
        let settings = web::Data::new(testing::settings());
        let req = TestRequest::get()
            .uri("/api/auth/google/callback?code=c1&code=c2&state=right&state=wrong")
            .insert_header(flow_cookie_header("right"))
            .to_http_request();

        let resp = google_callback_handler(req, flow, settings).await;

        // "right" is compared against the stored state; the flow proceeds.
        assert_eq!(testing::location(&resp), "https://hub.example.edu/dashboard");
    }

    #[actix_web::test]
    async fn test_callback_state_mismatch_keeps_cookie_clearing() {
        let flow = web::Data::new(testing::flow(Some(testing::sample_user()), None));
        let settings = web::Data::new(testing::settings());
        let req = TestRequest::get()
            .uri("/api/auth/google/callback?code=c&state=other")
            .insert_header(flow_cookie_header("expected"))
            .to_http_request();

        let resp = google_callback_handler(req, flow, settings).await;

        let location = testing::location(&resp);
        assert!(location.contains("auth_error=Invalid+or+expired+OAuth+state"));
        let cookies = testing::set_cookies(&resp);
        assert!(cookies[0].starts_with("flow-oauth=; Max-Age=0"));
    }
}
