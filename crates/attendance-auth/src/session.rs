// Session credential signing and verification

use attendance_commons::{Role, UserId};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{SessionError, SessionResult};

/// Issuer claim stamped into every session credential.
pub const SESSION_ISSUER: &str = "attendance-hub-api";

/// Audience claim stamped into every session credential.
pub const SESSION_AUDIENCE: &str = "attendance-hub-web";

/// Session lifetime in days.
pub const SESSION_TTL_DAYS: i64 = 7;

/// Identity and role carried by a verified session credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPayload {
    /// Provider-issued user id (the credential subject).
    pub subject: UserId,
    pub email: String,
    pub role: Role,
    pub full_name: Option<String>,
}

/// Wire shape of the signed claims.
///
/// `full_name` is always present as a string, empty when the user has none;
/// `role` deserializes strictly, so a credential carrying a role outside the
/// vocabulary fails verification outright.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    iss: String,
    aud: String,
    exp: usize,
    iat: usize,
    email: String,
    role: Role,
    full_name: String,
}

/// Sign a new session credential for the given payload.
///
/// Issued-at is now, expiry is now + [`SESSION_TTL_DAYS`], issuer and
/// audience are the fixed service constants. HS256 over `secret`.
pub fn sign_session(payload: &SessionPayload, secret: &str) -> SessionResult<String> {
    let now = chrono::Utc::now();
    let exp = now + chrono::Duration::days(SESSION_TTL_DAYS);

    let claims = SessionClaims {
        sub: payload.subject.to_string(),
        iss: SESSION_ISSUER.to_string(),
        aud: SESSION_AUDIENCE.to_string(),
        exp: exp.timestamp() as usize,
        iat: now.timestamp() as usize,
        email: payload.email.clone(),
        role: payload.role,
        full_name: payload.full_name.clone().unwrap_or_default(),
    };

    let header = Header::new(Algorithm::HS256);
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, &claims, &encoding_key)
        .map_err(|e| SessionError::Signing(format!("JWT encoding error: {}", e)))
}

/// Verify a session credential and extract its payload.
///
/// Checks signature, expiry, issuer, and audience, and requires the role
/// claim to be one of the recognized values. Every failure surfaces as the
/// single opaque [`SessionError::InvalidToken`]; the underlying cause is
/// only logged.
pub fn verify_session(token: &str, secret: &str) -> SessionResult<SessionPayload> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[SESSION_ISSUER]);
    validation.set_audience(&[SESSION_AUDIENCE]);
    validation.set_required_spec_claims(&["exp", "iss", "aud"]);

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<SessionClaims>(token, &decoding_key, &validation).map_err(|e| {
        debug!("Session credential rejected: {}", e);
        SessionError::InvalidToken
    })?;

    let claims = token_data.claims;
    Ok(SessionPayload {
        subject: UserId::new(claims.sub),
        email: claims.email,
        role: claims.role,
        full_name: if claims.full_name.is_empty() {
            None
        } else {
            Some(claims.full_name)
        },
    })
}
