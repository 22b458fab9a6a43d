//! HTTP inbound adapter exposing REST endpoints.

pub mod employees;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// JSON extractor configuration reporting malformed bodies as
/// `invalid_request` errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(error::json_error_handler)
}
