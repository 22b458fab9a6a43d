//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the employee and health endpoints together with the
//! schema wrappers from [`crate::inbound::http::schemas`], which describe
//! domain types without coupling them to utoipa.
//!
//! The document is served by Swagger UI in debug builds and exported via
//! `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::employees::EmployeeRequest;
use crate::inbound::http::schemas::{EmployeeSchema, ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee records API",
        description = "Create, list, update and delete employee records."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::employees::list_employees,
        crate::inbound::http::employees::create_employee,
        crate::inbound::http::employees::update_employee,
        crate::inbound::http::employees::delete_employee,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(EmployeeSchema, EmployeeRequest, ErrorSchema, ErrorCodeSchema)),
    tags(
        (name = "employees", description = "Employee record operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
