//! # attendance-auth
//!
//! Session plumbing for the Attendance Hub backend:
//!
//! - [`cookie`]: a string-level cookie codec (parse `Cookie:` headers, build
//!   `Set-Cookie` lines) plus the two cookie names the browser contract is
//!   built on
//! - [`session`]: HS256-signed session credentials with fixed issuer and
//!   audience, a 7-day lifetime, and a deliberately opaque verify error
//!
//! The crate is framework-free: handlers hand it raw header strings and get
//! raw header strings back.

pub mod cookie;
pub mod error;
pub mod session;

pub use cookie::{CookieOptions, SameSite, FLOW_COOKIE_NAME, SESSION_COOKIE_NAME};
pub use error::{SessionError, SessionResult};
pub use session::{sign_session, verify_session, SessionPayload};
