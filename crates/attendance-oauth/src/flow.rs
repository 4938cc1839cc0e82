//! Google OAuth PKCE flow engine.
//!
//! Phase A (start) mints the CSRF state and PKCE verifier, packs them into
//! the flow cookie value, and builds the provider authorization URL. Phase B
//! (callback) replays the stored state against the query parameters, runs
//! the code exchange, enforces the email-domain allow-list, resolves the
//! role, and signs the session credential. Between the two phases the server
//! keeps nothing: the browser cookie is the only flow record, so concurrent
//! starts simply overwrite each other and stale callbacks fail the state
//! check.

use std::sync::Arc;

use attendance_auth::session::{sign_session, SessionPayload};
use attendance_commons::{AuthSettings, UserId};
use log::{error, warn};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{OauthError, OauthResult};
use crate::pkce;
use crate::provider::{IdentityProvider, ProviderUser};
use crate::roles::{resolve_role, RoleStore};

/// Lifetime of an in-flight login, in seconds. Callbacks arriving after
/// this window fail the state check; the flow cookie's Max-Age matches it.
pub const FLOW_TTL_SECONDS: i64 = 600;

/// Flow state carried by the flow cookie between start and callback.
///
/// The field names are the cookie's JSON contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowState {
    pub state: String,
    pub verifier: String,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

impl FlowState {
    /// Mint a fresh flow: new state and verifier, created-at now
    /// (milliseconds).
    pub fn new() -> Self {
        Self {
            state: pkce::generate_state(),
            verifier: pkce::generate_verifier(),
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

impl Default for FlowState {
    fn default() -> Self {
        Self::new()
    }
}

/// Output of phase A: where to send the browser, and what to remember.
#[derive(Debug, Clone)]
pub struct StartPayload {
    pub authorize_url: String,
    /// JSON-serialized [`FlowState`], ready to be set as the flow cookie.
    pub flow_cookie_value: String,
}

/// Uniform output of phase B.
///
/// The callback adapter always clears the flow cookie, then branches on
/// `error`: redirect into the app with the session cookie on success,
/// redirect to the app base URL with the message on failure.
#[derive(Debug, Clone)]
pub struct CallbackResult {
    pub app_base_url: String,
    pub redirect_path: String,
    pub clear_flow_cookie: bool,
    pub session_token: Option<String>,
    pub error: Option<String>,
}

/// The two-phase Google sign-in flow.
///
/// Outbound calls go through the injected [`IdentityProvider`] and
/// [`RoleStore`] trait objects.
pub struct GoogleOauthFlow {
    settings: AuthSettings,
    provider: Arc<dyn IdentityProvider>,
    roles: Arc<dyn RoleStore>,
}

impl GoogleOauthFlow {
    pub fn new(
        settings: AuthSettings,
        provider: Arc<dyn IdentityProvider>,
        roles: Arc<dyn RoleStore>,
    ) -> Self {
        Self {
            settings,
            provider,
            roles,
        }
    }

    /// Phase A: build the authorization URL and the flow cookie value.
    ///
    /// No external calls; the only side effect is drawing randomness.
    pub fn start(&self) -> OauthResult<StartPayload> {
        let flow = FlowState::new();
        let challenge = pkce::code_challenge(&flow.verifier);
        let redirect_to = format!("{}/api/auth/google/callback", self.settings.app_base_url);

        let mut authorize_url = Url::parse(&format!(
            "{}/auth/v1/authorize",
            self.settings.supabase_url.trim_end_matches('/')
        ))
        .map_err(|e| OauthError::Config(format!("invalid supabase_url: {}", e)))?;
        authorize_url
            .query_pairs_mut()
            .append_pair("provider", "google")
            .append_pair("redirect_to", &redirect_to)
            .append_pair("code_challenge", &challenge)
            // GoTrue matches the challenge method case-insensitively.
            .append_pair("code_challenge_method", "s256")
            .append_pair("state", &flow.state)
            .append_pair("prompt", "select_account")
            .append_pair("hd", &self.settings.allowed_email_domain);

        let flow_cookie_value = serde_json::to_string(&flow)
            .map_err(|e| OauthError::Internal(format!("failed to serialize flow state: {}", e)))?;

        Ok(StartPayload {
            authorize_url: authorize_url.into(),
            flow_cookie_value,
        })
    }

    /// Phase B: validate the returning callback and mint a session.
    ///
    /// Fails closed at every step and never bubbles an error to the
    /// transport layer; the outcome is always a [`CallbackResult`] with the
    /// flow cookie marked for clearing.
    pub async fn callback(
        &self,
        code: &str,
        state: &str,
        raw_flow_cookie: Option<&str>,
    ) -> CallbackResult {
        if code.is_empty() || state.is_empty() {
            return self.invalid("Missing OAuth code/state");
        }

        let raw = match raw_flow_cookie {
            Some(raw) if !raw.is_empty() => raw,
            _ => return self.invalid("Login session expired. Please retry."),
        };

        let flow: FlowState = match serde_json::from_str(raw) {
            Ok(flow) => flow,
            Err(_) => return self.invalid("Invalid OAuth session"),
        };

        let age_ms = chrono::Utc::now().timestamp_millis() - flow.created_at;
        if flow.state != state || age_ms > FLOW_TTL_SECONDS * 1000 {
            return self.invalid("Invalid or expired OAuth state");
        }

        let user = match self.provider.exchange_code(code, &flow.verifier).await {
            Ok(user) => user,
            Err(err @ OauthError::ExchangeRejected { .. }) => {
                warn!("PKCE code exchange rejected: {:?}", err);
                return self.invalid(err.to_string());
            }
            Err(err) => {
                error!("PKCE code exchange failed: {}", err);
                return self.invalid("Login failed");
            }
        };

        let user = match user {
            Some(user) if !user.id.is_empty() && !user.email.is_empty() => user,
            _ => return self.invalid("Supabase returned an invalid user session"),
        };

        let domain = user.email.rsplit_once('@').map(|(_, d)| d).unwrap_or("");
        if domain != self.settings.allowed_email_domain {
            return self.invalid(format!(
                "Only @{} accounts are allowed.",
                self.settings.allowed_email_domain
            ));
        }

        let subject = UserId::new(user.id.as_str());
        let role = resolve_role(self.roles.as_ref(), &subject).await;
        let payload = SessionPayload {
            subject,
            email: user.email.clone(),
            role,
            full_name: Some(display_name(&user)),
        };

        let session_token = match sign_session(&payload, &self.settings.session_secret) {
            Ok(token) => token,
            Err(err) => {
                error!("Failed to sign session credential: {}", err);
                return self.invalid("Login failed");
            }
        };

        CallbackResult {
            app_base_url: self.settings.app_base_url.clone(),
            redirect_path: "/dashboard".to_string(),
            clear_flow_cookie: true,
            session_token: Some(session_token),
            error: None,
        }
    }

    fn invalid(&self, error: impl Into<String>) -> CallbackResult {
        CallbackResult {
            app_base_url: self.settings.app_base_url.clone(),
            redirect_path: "/".to_string(),
            clear_flow_cookie: true,
            session_token: None,
            error: Some(error.into()),
        }
    }
}

/// Display name for the session: profile `full_name`, else `name`, else the
/// email's local part, else the literal `"user"`. Only non-empty metadata
/// strings count.
fn display_name(user: &ProviderUser) -> String {
    for key in ["full_name", "name"] {
        if let Some(serde_json::Value::String(s)) = user.user_metadata.get(key) {
            if !s.is_empty() {
                return s.clone();
            }
        }
    }
    let local_part = user.email.split('@').next().unwrap_or("");
    if local_part.is_empty() {
        "user".to_string()
    } else {
        local_part.to_string()
    }
}
