//! # attendance-commons
//!
//! Shared types and configuration sections for the Attendance Hub backend.
//!
//! This crate provides the foundational types used across all attendance
//! crates (attendance-auth, attendance-oauth, attendance-api) and keeps them
//! free of web-framework and HTTP-client dependencies so they can be reused
//! anywhere without pulling in the server stack.
//!
//! - [`Role`]: the closed set of dashboard roles
//! - [`UserId`]: type-safe wrapper for provider-issued user identifiers
//! - [`config`]: serde-backed configuration sections shared by the server

pub mod config;
pub mod models;

pub use config::{AuthSettings, CorsSettings};
pub use models::{Role, UserId};
