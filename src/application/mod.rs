//! Application layer services implementing business logic.
//!
//! Services consume domain traits and expose the operations the HTTP handlers
//! call. Each deployed process composes exactly one of them.
//!
//! # Available Services
//!
//! - [`services::KeygenService`] - Short key allocation
//! - [`services::ShortenerService`] - Shortening orchestration
//! - [`services::RedirectService`] - Short key resolution
//! - [`services::GatewayService`] - Public composition of shortener and resolver

pub mod services;
