//! Core domain models shared across the backend.

pub mod role;
pub mod user_id;

pub use role::Role;
pub use user_id::UserId;
