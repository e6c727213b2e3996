//! Utility functions shared by the services.
//!
//! - [`url_validation`] - Long URL validation and blacklist matching
//! - [`timeout`] - Deadlines for outbound store calls

pub mod timeout;
pub mod url_validation;
