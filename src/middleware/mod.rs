pub mod auth;
pub mod error_detail;

pub use auth::{jwt_auth_middleware, AuthAdmin};
pub use error_detail::expose_error_detail;
