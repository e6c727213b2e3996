//! HTTP request handlers.
//!
//! One module per service, plus the health handler shared by all of them.

pub mod gateway;
pub mod health;
pub mod keygen;
pub mod redirect;
pub mod shorten;

pub use health::health_handler;
pub use keygen::generate_key_handler;
pub use redirect::{redirect_handler, resolve_handler};
pub use shorten::shorten_handler;
