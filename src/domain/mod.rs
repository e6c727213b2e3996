//! Domain layer containing business entities and contracts.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers; it defines the data model and the traits the other layers
//! implement.
//!
//! - [`entities`] - The [`entities::ShortenedUrl`] record
//! - [`repositories`] - Relational and key-value storage traits
//! - [`clients`] - Capabilities the services consume from each other
//! - [`redirect_event`] - Redirect counting event
//! - [`redirect_worker`] - Asynchronous redirect counter
//!
//! # Redirect Counting Flow
//!
//! 1. [`crate::application::services::RedirectService`] resolves a key
//! 2. A [`redirect_event::RedirectEvent`] is offered to a bounded channel
//! 3. [`redirect_worker::run_redirect_worker`] increments the counter via
//!    [`repositories::RedirectCounter`]

pub mod clients;
pub mod entities;
pub mod redirect_event;
pub mod redirect_worker;
pub mod repositories;
