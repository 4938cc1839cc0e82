//! Outbound seam to the identity provider's token endpoint.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::OauthResult;

/// Identity returned by a successful PKCE code exchange.
///
/// Fields default to empty when the provider omits them; the flow engine
/// treats an empty `id` or `email` as an invalid user session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderUser {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    /// Free-form profile metadata (`full_name`, `name`, avatar URLs, ...).
    #[serde(default)]
    pub user_metadata: serde_json::Map<String, serde_json::Value>,
}

/// Exchanges an authorization code (plus PKCE verifier) for the user's
/// identity.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Perform the PKCE token exchange. `Ok(None)` means the provider
    /// answered successfully but returned no user object.
    async fn exchange_code(
        &self,
        auth_code: &str,
        code_verifier: &str,
    ) -> OauthResult<Option<ProviderUser>>;
}
