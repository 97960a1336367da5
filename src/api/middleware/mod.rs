pub mod auth;
pub mod cors;
pub mod request_logging;
pub mod validation;

pub use auth::{authenticate, JwtKeys, RequireAdmin};
pub use validation::validate_and_respond;
