//! Shared plumbing for ChowLocal services: configuration loading, tracing,
//! HTTP middleware, health probes and the JSON error body.

pub mod config;
pub mod error;
pub mod health;
pub mod middleware;
pub mod tracing;
