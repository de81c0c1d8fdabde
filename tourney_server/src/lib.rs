//! HTTP server for the esports tournament backend.

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
