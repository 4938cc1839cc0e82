//! # attendance-oauth
//!
//! The Google sign-in flow for the Attendance Hub backend, built on the
//! OAuth2 authorization-code grant with PKCE and brokered through Supabase
//! Auth (GoTrue).
//!
//! The server holds no per-flow state: everything a callback needs to finish
//! the login (CSRF state, PKCE verifier, start time) travels in a
//! short-lived browser cookie. [`GoogleOauthFlow`] implements both phases;
//! [`SupabaseClient`] is the production implementation of the two outbound
//! seams ([`IdentityProvider`] for the code exchange, [`RoleStore`] for the
//! role-assignment lookup), which stay trait objects so the flow can be
//! exercised hermetically.

pub mod error;
pub mod flow;
pub mod pkce;
pub mod provider;
pub mod roles;
pub mod supabase;

pub use error::{OauthError, OauthResult};
pub use flow::{CallbackResult, FlowState, GoogleOauthFlow, StartPayload, FLOW_TTL_SECONDS};
pub use provider::{IdentityProvider, ProviderUser};
pub use roles::{resolve_role, RoleStore};
pub use supabase::SupabaseClient;
