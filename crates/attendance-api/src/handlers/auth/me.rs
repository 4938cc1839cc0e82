//! Current-user handler
//!
//! GET /api/auth/me - Identity and role carried by the session cookie

use actix_web::http::Method;
use actix_web::{web, HttpRequest, HttpResponse};
use attendance_auth::cookie::SESSION_COOKIE_NAME;
use attendance_auth::session::verify_session;
use attendance_commons::AuthSettings;

use super::models::{ErrorResponse, SessionResponse};
use super::request_cookies;

/// GET /api/auth/me
///
/// Every failure mode (no cookie, empty cookie, bad signature, expired
/// credential) reads the same to the client: 401 "Not authenticated".
pub async fn me_handler(req: HttpRequest, settings: web::Data<AuthSettings>) -> HttpResponse {
    if req.method() != Method::GET {
        return HttpResponse::MethodNotAllowed().json(ErrorResponse::new("Method not allowed"));
    }

    let cookies = request_cookies(&req);
    let token = match cookies.get(SESSION_COOKIE_NAME).filter(|token| !token.is_empty()) {
        Some(token) => token,
        None => {
            return HttpResponse::Unauthorized().json(ErrorResponse::new("Not authenticated"));
        },
    };

    match verify_session(token, &settings.session_secret) {
        Ok(payload) => HttpResponse::Ok().json(SessionResponse::from(payload)),
        Err(_) => HttpResponse::Unauthorized().json(ErrorResponse::new("Not authenticated")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::auth::testing;
    use actix_web::http::{header, StatusCode};
    use actix_web::test::TestRequest;
    use attendance_auth::session::{sign_session, SessionPayload};
    use attendance_commons::{Role, UserId};

    fn signed_token(secret: &str) -> String {
        sign_session(
            &SessionPayload {
                subject: UserId::new("user-123"),
                email: "jordan@students.example.edu".to_string(),
                role: Role::Student,
                full_name: Some("Jordan Lee".to_string()),
            },
            secret,
        )
        .unwrap()
    }

    async fn body_json(resp: HttpResponse) -> serde_json::Value {
        let bytes = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_web::test]
    async fn test_me_returns_session_payload() {
        let settings = web::Data::new(testing::settings());
        let token = signed_token(testing::SESSION_SECRET);
        let req = TestRequest::get()
            .uri("/api/auth/me")
            .insert_header((header::COOKIE, format!("session={}", token)))
            .to_http_request();

        let resp = me_handler(req, settings).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["user"]["id"], "user-123");
        assert_eq!(body["user"]["email"], "jordan@students.example.edu");
        assert_eq!(body["user"]["user_metadata"]["full_name"], "Jordan Lee");
        assert_eq!(body["role"], "student");
    }

    #[actix_web::test]
    async fn test_me_without_cookie() {
        let settings = web::Data::new(testing::settings());
        let req = TestRequest::get().uri("/api/auth/me").to_http_request();

        let resp = me_handler(req, settings).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(resp).await;
        assert_eq!(body["error"], "Not authenticated");
    }

    #[actix_web::test]
    async fn test_me_with_empty_cookie_value() {
        let settings = web::Data::new(testing::settings());
        let req = TestRequest::get()
            .uri("/api/auth/me")
            .insert_header((header::COOKIE, "session="))
            .to_http_request();

        let resp = me_handler(req, settings).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_me_with_garbage_token() {
        let settings = web::Data::new(testing::settings());
        let req = TestRequest::get()
            .uri("/api/auth/me")
            .insert_header((header::COOKIE, "session=not.a.jwt"))
            .to_http_request();

        let resp = me_handler(req, settings).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_me_with_wrong_signing_key() {
        let settings = web::Data::new(testing::settings());
        let token = signed_token("some-other-secret");
        let req = TestRequest::get()
            .uri("/api/auth/me")
            .insert_header((header::COOKIE, format!("session={}", token)))
            .to_http_request();

        let resp = me_handler(req, settings).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_me_rejects_post() {
        let settings = web::Data::new(testing::settings());
        let token = signed_token(testing::SESSION_SECRET);
        let req = TestRequest::post()
            .uri("/api/auth/me")
            .insert_header((header::COOKIE, format!("session={}", token)))
            .to_http_request();

        let resp = me_handler(req, settings).await;

        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = body_json(resp).await;
        assert_eq!(body["error"], "Method not allowed");
    }
}
