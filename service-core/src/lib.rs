//! service-core: Shared infrastructure for the inventory backend.
//!
//! Error surface, configuration loading, tracing setup, and the axum
//! middleware every service in the workspace stacks onto its router.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
