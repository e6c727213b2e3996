//! HTTP middleware shared by all services.

pub mod tracing;
