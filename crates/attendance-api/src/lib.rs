//! # attendance-api
//!
//! HTTP endpoint adapters for the Attendance Hub backend. Each handler is a
//! thin translation layer: request cookies and query parameters in, calls
//! into `attendance-oauth`/`attendance-auth` in the middle, redirects,
//! cookies, and JSON out. No business rules live here.

pub mod handlers;
pub mod routes;
