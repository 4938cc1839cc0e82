//! Error types for session signing and verification.

use thiserror::Error;

/// Errors produced by the session token service.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The presented credential did not verify.
    ///
    /// Deliberately carries no detail: signature, structure, expiry, issuer,
    /// audience, and role-claim failures all collapse into this one variant
    /// so callers cannot probe which check rejected a token. The specific
    /// cause is logged at debug level server-side.
    #[error("invalid session credential")]
    InvalidToken,

    /// Signing a new credential failed.
    #[error("failed to sign session credential: {0}")]
    Signing(String),
}

pub type SessionResult<T> = std::result::Result<T, SessionError>;
