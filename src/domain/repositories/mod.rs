//! Storage trait definitions for the domain layer.
//!
//! Traits define the contract; implementations live in
//! `crate::infrastructure::persistence` (relational) and
//! `crate::infrastructure::kv` (key-value). Mock implementations are generated
//! with `mockall` for unit tests.
//!
//! - [`UrlRepository`] - Conditional insert and lookup of shortened URLs
//! - [`UrlStore`] - Key-value mapping read by the redirect resolver
//! - [`RedirectCounter`] - Best-effort redirect counting

pub mod redirect_counter;
pub mod url_repository;
pub mod url_store;

pub use redirect_counter::RedirectCounter;
pub use url_repository::UrlRepository;
pub use url_store::UrlStore;

#[cfg(test)]
pub use redirect_counter::MockRedirectCounter;
#[cfg(test)]
pub use url_repository::MockUrlRepository;
#[cfg(test)]
pub use url_store::MockUrlStore;
