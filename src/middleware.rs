//! Middleware constructors shared by the production server and the test
//! server wiring: the CORS policy for the dashboard origin and the request
//! logger.

use actix_cors::Cors;
use actix_web::http::header::HeaderName;
use actix_web::http::Method;
use actix_web::middleware;
use log::debug;

use crate::config::ServerConfig;

/// Build CORS middleware from server configuration using actix-cors.
///
/// Maps all CorsSettings options to actix-cors builder methods. The session
/// rides on cookies, so `allow_credentials` defaults to true and the browser
/// origin must be listed explicitly for credentialed requests to work.
pub fn build_cors_from_config(config: &ServerConfig) -> Cors {
    let cors_config = &config.cors;

    let mut cors = Cors::default();

    // Configure allowed origins
    let any_origin = cors_config.allowed_origins.is_empty()
        || cors_config.allowed_origins.contains(&"*".to_string());
    if any_origin {
        cors = cors.allow_any_origin();
        debug!("CORS: Allowing any origin");
    } else {
        for origin in &cors_config.allowed_origins {
            cors = cors.allowed_origin(origin);
        }
        debug!("CORS: Allowed origins: {:?}", cors_config.allowed_origins);
    }

    // Configure allowed methods
    let methods: Vec<Method> =
        cors_config.allowed_methods.iter().filter_map(|m| m.parse().ok()).collect();
    if !methods.is_empty() {
        cors = cors.allowed_methods(methods);
    }

    // Configure allowed headers
    if cors_config.allowed_headers.contains(&"*".to_string()) {
        cors = cors.allow_any_header();
    } else {
        let headers: Vec<HeaderName> =
            cors_config.allowed_headers.iter().filter_map(|h| h.parse().ok()).collect();
        if !headers.is_empty() {
            cors = cors.allowed_headers(headers);
        }
    }

    // Configure exposed headers
    if !cors_config.expose_headers.is_empty() {
        let expose_headers: Vec<HeaderName> =
            cors_config.expose_headers.iter().filter_map(|h| h.parse().ok()).collect();
        cors = cors.expose_headers(expose_headers);
    }

    // Configure credentials. actix-cors rejects the `*` origin combined with
    // credentials, so an explicit origin list is required for cookies to flow.
    if cors_config.allow_credentials && !any_origin {
        cors = cors.supports_credentials();
    }

    // Configure max age
    cors = cors.max_age(cors_config.max_age as usize);

    cors
}

/// Build the request logger middleware.
pub fn request_logger() -> middleware::Logger {
    middleware::Logger::default()
}
