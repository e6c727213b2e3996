//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization. The same types
//! are used by the HTTP client adapters, so both sides of every internal call
//! share one wire shape.

pub mod health;
pub mod keygen;
pub mod redirect;
pub mod shorten;
