//! Employee records backend.
//!
//! Hexagonal layout: [`domain`] holds the record model and ports,
//! [`inbound`] adapts HTTP requests onto them and [`outbound`] stores rows in
//! PostgreSQL or process memory. [`server`] wires the pieces into an Actix
//! application.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
