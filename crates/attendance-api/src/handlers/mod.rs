//! HTTP request handlers
//!
//! This module provides the handlers for the Attendance Hub auth endpoints.

pub mod auth;
