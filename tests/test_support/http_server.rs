use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use attendance_commons::UserId;
use attendance_oauth::{GoogleOauthFlow, IdentityProvider, OauthResult, ProviderUser, RoleStore};
use attendance_server::config::ServerConfig;
use attendance_server::lifecycle::{self, ApplicationComponents, RunningTestHttpServer};

pub const SESSION_SECRET: &str = "integration-test-secret";
pub const APP_BASE_URL: &str = "https://hub.example.edu";
pub const ALLOWED_DOMAIN: &str = "students.example.edu";

/// Identity provider fake that accepts any code and returns a fixed user.
pub struct FixedProvider(pub Option<ProviderUser>);

#[async_trait]
impl IdentityProvider for FixedProvider {
    async fn exchange_code(&self, _: &str, _: &str) -> OauthResult<Option<ProviderUser>> {
        Ok(self.0.clone())
    }
}

/// Role store fake returning a fixed assignment.
pub struct FixedRoles(pub Option<String>);

#[async_trait]
impl RoleStore for FixedRoles {
    async fn role_for(&self, _: &UserId) -> OauthResult<Option<String>> {
        Ok(self.0.clone())
    }
}

pub fn sample_user() -> ProviderUser {
    let mut metadata = serde_json::Map::new();
    metadata.insert(
        "full_name".to_string(),
        serde_json::Value::String("Jordan Lee".to_string()),
    );
    ProviderUser {
        id: "user-123".to_string(),
        email: format!("jordan@{}", ALLOWED_DOMAIN),
        user_metadata: metadata,
    }
}

pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.server.host = "127.0.0.1".to_string();
    config.auth.supabase_url = "https://proj.supabase.co".to_string();
    config.auth.supabase_anon_key = "anon-key".to_string();
    config.auth.supabase_service_role_key = "service-key".to_string();
    config.auth.app_base_url = APP_BASE_URL.to_string();
    config.auth.session_secret = SESSION_SECRET.to_string();
    config.auth.allowed_email_domain = ALLOWED_DOMAIN.to_string();
    // The test server speaks plain HTTP.
    config.auth.cookie_secure = false;
    config
}

/// A near-production HTTP server instance for tests.
///
/// Uses the real `attendance_server::lifecycle::run_for_tests()` wiring with
/// the identity provider and role store swapped for in-process fakes.
pub struct HttpTestServer {
    pub base_url: String,
    pub config: ServerConfig,
    running: RunningTestHttpServer,
}

impl HttpTestServer {
    pub async fn shutdown(self) {
        self.running.shutdown().await;
    }
}

/// Start a near-production HTTP server on a random available port.
///
/// `user` is what the fake provider returns from the code exchange; `role`
/// is the fake role-store assignment.
pub async fn start_http_test_server(
    user: Option<ProviderUser>,
    role: Option<&str>,
) -> Result<HttpTestServer> {
    let config = test_config();

    let flow = Arc::new(GoogleOauthFlow::new(
        config.auth.clone(),
        Arc::new(FixedProvider(user)),
        Arc::new(FixedRoles(role.map(str::to_string))),
    ));
    let components = ApplicationComponents { flow };

    let running = lifecycle::run_for_tests(&config, components).await?;
    let base_url = running.base_url.clone();

    Ok(HttpTestServer {
        base_url,
        config,
        running,
    })
}
