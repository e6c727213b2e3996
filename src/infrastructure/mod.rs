//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for persistence, key-value lookups and calls to
//! the other services.
//!
//! # Modules
//!
//! - [`clients`] - `reqwest` adapters for the inter-service capabilities
//! - [`kv`] - Key-value stores (Redis and in-memory)
//! - [`persistence`] - Relational repositories (PostgreSQL and in-memory)

pub mod clients;
pub mod kv;
pub mod persistence;
