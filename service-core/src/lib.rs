//! service-core: Shared infrastructure for the packet screening backend.
pub mod error;
pub mod middleware;
pub mod observability;
