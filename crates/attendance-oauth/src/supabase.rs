//! Supabase (GoTrue + PostgREST) client.
//!
//! Implements the two outbound seams of the login flow: the PKCE code
//! exchange against `auth/v1/token` and the `user_roles` lookup against
//! `rest/v1`. One shared connection pool, one configured timeout.

use std::time::Duration;

use async_trait::async_trait;
use attendance_commons::{AuthSettings, UserId};
use log::{debug, warn};
use serde::Deserialize;

use crate::error::{OauthError, OauthResult};
use crate::provider::{IdentityProvider, ProviderUser};
use crate::roles::RoleStore;

/// Response envelope of `POST /auth/v1/token?grant_type=pkce`.
///
/// Access and refresh tokens also ride in this envelope; only the user
/// object is consumed here, since sessions are minted locally.
#[derive(Debug, Deserialize)]
struct TokenExchangeResponse {
    #[serde(default)]
    user: Option<ProviderUser>,
}

/// One row of the `user_roles` table, as PostgREST serialises it.
#[derive(Debug, Deserialize)]
struct UserRoleRow {
    role: String,
}

/// HTTP client for the Supabase project configured in [`AuthSettings`].
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    service_role_key: String,
}

impl SupabaseClient {
    /// Build the client, binding the configured request timeout.
    pub fn new(settings: &AuthSettings) -> OauthResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.provider_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: settings.supabase_url.trim_end_matches('/').to_string(),
            anon_key: settings.supabase_anon_key.clone(),
            service_role_key: settings.supabase_service_role_key.clone(),
        })
    }
}

#[async_trait]
impl IdentityProvider for SupabaseClient {
    async fn exchange_code(
        &self,
        auth_code: &str,
        code_verifier: &str,
    ) -> OauthResult<Option<ProviderUser>> {
        let url = format!("{}/auth/v1/token?grant_type=pkce", self.base_url);
        let body = serde_json::json!({
            "auth_code": auth_code,
            "code_verifier": code_verifier,
        });

        debug!("Exchanging PKCE authorization code");
        let response = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("PKCE token exchange returned status {}", status);
            return Err(OauthError::ExchangeRejected {
                status: status.as_u16(),
            });
        }

        let data: TokenExchangeResponse = response.json().await?;
        Ok(data.user)
    }
}

#[async_trait]
impl RoleStore for SupabaseClient {
    async fn role_for(&self, user_id: &UserId) -> OauthResult<Option<String>> {
        let url = format!("{}/rest/v1/user_roles", self.base_url);
        let user_filter = format!("eq.{}", user_id);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("select", "role"),
                ("user_id", user_filter.as_str()),
                ("limit", "1"),
            ])
            .header("apikey", &self.service_role_key)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", self.service_role_key),
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OauthError::UnexpectedStatus(status.as_u16()));
        }

        let rows: Vec<UserRoleRow> = response.json().await?;
        Ok(rows.into_iter().next().map(|row| row.role))
    }
}
