//! Current-session response model.

use attendance_auth::session::SessionPayload;
use attendance_commons::Role;
use serde::Serialize;

/// Body of a successful `GET /api/auth/me`.
///
/// The `user` object mirrors the identity provider's user shape so the
/// dashboard can consume either source interchangeably; both metadata name
/// fields carry the session's display name (empty when none was recorded).
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: SessionUser,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub user_metadata: SessionUserMetadata,
}

#[derive(Debug, Serialize)]
pub struct SessionUserMetadata {
    pub full_name: String,
    pub name: String,
}

impl From<SessionPayload> for SessionResponse {
    fn from(payload: SessionPayload) -> Self {
        let display_name = payload.full_name.unwrap_or_default();
        Self {
            user: SessionUser {
                id: payload.subject.into_string(),
                email: payload.email,
                user_metadata: SessionUserMetadata {
                    full_name: display_name.clone(),
                    name: display_name,
                },
            },
            role: payload.role,
        }
    }
}
