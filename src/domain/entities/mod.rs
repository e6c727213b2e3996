//! Core domain entities.
//!
//! - [`ShortenedUrl`] - A short key mapped to its original long URL

pub mod shortened_url;

pub use shortened_url::ShortenedUrl;
