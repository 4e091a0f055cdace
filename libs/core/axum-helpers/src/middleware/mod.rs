//! Cross-cutting HTTP middleware.

pub mod request_logger;
pub mod security;

pub use request_logger::request_logger;
pub use security::security_headers;
