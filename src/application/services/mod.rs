//! Business logic services for the application layer.

pub mod gateway_service;
pub mod keygen_service;
pub mod redirect_service;
pub mod shortener_service;

pub use gateway_service::GatewayService;
pub use keygen_service::{KeygenService, SaltSource, SystemSalt};
pub use redirect_service::RedirectService;
pub use shortener_service::{ShortenerService, ShortenerSettings};
