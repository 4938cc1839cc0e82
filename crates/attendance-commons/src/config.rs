//! Configuration sections shared between the server binary and the auth
//! crates.
//!
//! These are plain serde structs; loading, env overrides, and validation
//! live in the server crate.

use serde::{Deserialize, Serialize};

/// Authentication and identity-provider settings.
///
/// The six provider fields have no usable defaults and must be supplied via
/// `config.toml` or environment overrides; the server refuses to start while
/// any of them is empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Base URL of the Supabase project (e.g. `https://xyz.supabase.co`).
    #[serde(default)]
    pub supabase_url: String,

    /// Supabase anon (publishable) API key, sent on the token exchange.
    #[serde(default)]
    pub supabase_anon_key: String,

    /// Supabase service-role key used for the role-table lookup.
    /// Never sent to browsers.
    #[serde(default)]
    pub supabase_service_role_key: String,

    /// Public base URL of this deployment, used to derive the OAuth
    /// callback URL and post-login redirects (e.g. `https://hub.example.edu`).
    #[serde(default)]
    pub app_base_url: String,

    /// HMAC secret for signing session credentials.
    #[serde(default)]
    pub session_secret: String,

    /// Email domain allowed to sign in (e.g. `students.example.edu`).
    #[serde(default)]
    pub allowed_email_domain: String,

    /// Mark cookies `Secure` (default: true; disable only for local
    /// plain-HTTP development).
    #[serde(default = "default_true")]
    pub cookie_secure: bool,

    /// Timeout in seconds for requests to the identity provider (default: 10).
    #[serde(default = "default_provider_timeout_secs")]
    pub provider_timeout_secs: u64,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            supabase_service_role_key: String::new(),
            app_base_url: String::new(),
            session_secret: String::new(),
            allowed_email_domain: String::new(),
            cookie_secure: default_true(),
            provider_timeout_secs: default_provider_timeout_secs(),
        }
    }
}

/// Cross-origin resource sharing policy for the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins. Empty list or ["*"] allows any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,

    /// Allowed HTTP methods.
    #[serde(default = "default_cors_methods")]
    pub allowed_methods: Vec<String>,

    /// Allowed HTTP headers. Use ["*"] for any header.
    #[serde(default = "default_cors_headers")]
    pub allowed_headers: Vec<String>,

    /// Headers to expose to the browser.
    #[serde(default)]
    pub expose_headers: Vec<String>,

    /// Allow credentials (cookies). Default: true, the session rides on a
    /// cookie.
    #[serde(default = "default_true")]
    pub allow_credentials: bool,

    /// Preflight cache max age in seconds. Default: 3600.
    #[serde(default = "default_cors_max_age")]
    pub max_age: u64,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            allowed_methods: default_cors_methods(),
            allowed_headers: default_cors_headers(),
            expose_headers: Vec::new(),
            allow_credentials: default_true(),
            max_age: default_cors_max_age(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_provider_timeout_secs() -> u64 {
    10
}

fn default_cors_methods() -> Vec<String> {
    vec!["GET".to_string(), "POST".to_string(), "OPTIONS".to_string()]
}

fn default_cors_headers() -> Vec<String> {
    vec![
        "Authorization".to_string(),
        "Content-Type".to_string(),
        "Accept".to_string(),
        "Origin".to_string(),
        "X-Requested-With".to_string(),
    ]
}

fn default_cors_max_age() -> u64 {
    3600
}
