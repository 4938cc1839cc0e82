//! Attendance Hub Server Library
//!
//! The server modules live in the library target so integration tests can
//! drive the same wiring the binary runs.

pub mod config;
pub mod lifecycle;
pub mod logging;
pub mod middleware;
pub mod routes;
