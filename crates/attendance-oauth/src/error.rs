//! Error types for the OAuth flow and provider clients.

use thiserror::Error;

/// Errors from the OAuth flow engine and the Supabase client.
///
/// [`ExchangeRejected`](OauthError::ExchangeRejected) displays the exact
/// message the callback surfaces to users; every other variant is internal
/// detail that callers collapse into a generic login failure.
#[derive(Debug, Error)]
pub enum OauthError {
    /// The token endpoint answered the PKCE exchange with a non-success
    /// status.
    #[error("Failed to exchange OAuth code with Supabase")]
    ExchangeRejected { status: u16 },

    /// The provider answered some other call with a non-success status.
    #[error("provider returned unexpected status {0}")]
    UnexpectedStatus(u16),

    /// The provider could not be reached, timed out, or sent an unusable
    /// body.
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Auth settings are unusable (malformed base URL and the like).
    #[error("invalid auth configuration: {0}")]
    Config(String),

    /// A local operation that should not fail did.
    #[error("{0}")]
    Internal(String),
}

pub type OauthResult<T> = std::result::Result<T, OauthError>;
