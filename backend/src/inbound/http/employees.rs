//! Employee records API handlers.
//!
//! ```text
//! GET    /api/employee
//! POST   /api/employee       {"name":"Ada","department":"IT","salary":90000}
//! PUT    /api/employee/{id}  {"name":"Ada","department":"IT","salary":95000}
//! DELETE /api/employee/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{Employee, EmployeeDraft, Error, Salary, SalaryValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{EmployeeSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, map_employee_validation_error, map_salary_validation_error, parse_employee_id,
    require,
};

const NAME: FieldName = FieldName::new("name");
const DEPARTMENT: FieldName = FieldName::new("department");
const SALARY: FieldName = FieldName::new("salary");

/// Request body for creating or replacing an employee.
///
/// Every field is required; `salary` may be a JSON number or a numeric
/// string.
///
/// Example JSON:
/// `{"name":"Jane Smith","department":"HR","salary":65000}`
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    #[schema(example = "Jane Smith")]
    pub name: Option<String>,
    #[schema(example = "HR")]
    pub department: Option<String>,
    #[schema(value_type = Option<f64>, example = 65000)]
    pub salary: Option<Value>,
}

fn parse_salary(value: Value) -> Result<Salary, Error> {
    let parsed = match value {
        Value::Number(number) => number.to_string().parse(),
        Value::String(text) => text.parse(),
        _ => Err(SalaryValidationError::Invalid),
    };
    parsed.map_err(map_salary_validation_error)
}

impl TryFrom<EmployeeRequest> for EmployeeDraft {
    type Error = Error;

    fn try_from(value: EmployeeRequest) -> Result<Self, Self::Error> {
        let name = require(value.name, NAME)?;
        let department = require(value.department, DEPARTMENT)?;
        let salary = require(value.salary.filter(|raw| !raw.is_null()), SALARY)?;
        let salary = parse_salary(salary)?;
        EmployeeDraft::try_new(name, department, salary).map_err(map_employee_validation_error)
    }
}

/// List every employee.
#[utoipa::path(
    get,
    path = "/api/employee",
    responses(
        (status = 200, description = "Employees", body = [EmployeeSchema]),
        (status = 503, description = "Record store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "listEmployees"
)]
#[get("/employee")]
pub async fn list_employees(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Employee>>> {
    let employees = state.employees_query.list_employees().await?;
    Ok(web::Json(employees))
}

/// Create an employee; the server assigns the identifier.
#[utoipa::path(
    post,
    path = "/api/employee",
    request_body = EmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = EmployeeSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "createEmployee"
)]
#[post("/employee")]
pub async fn create_employee(
    state: web::Data<HttpState>,
    payload: web::Json<EmployeeRequest>,
) -> ApiResult<HttpResponse> {
    let draft = EmployeeDraft::try_from(payload.into_inner())?;
    let employee = state.employees.create_employee(draft).await?;
    Ok(HttpResponse::Created().json(employee))
}

/// Replace every field of an existing employee.
#[utoipa::path(
    put,
    path = "/api/employee/{id}",
    params(("id" = i32, Path, description = "Employee identifier")),
    request_body = EmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = EmployeeSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Employee not found", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "updateEmployee"
)]
#[put("/employee/{id}")]
pub async fn update_employee(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<EmployeeRequest>,
) -> ApiResult<web::Json<Employee>> {
    let id = parse_employee_id(&path.into_inner())?;
    let draft = EmployeeDraft::try_from(payload.into_inner())?;
    let employee = state.employees.update_employee(id, draft).await?;
    Ok(web::Json(employee))
}

/// Delete an employee.
#[utoipa::path(
    delete,
    path = "/api/employee/{id}",
    params(("id" = i32, Path, description = "Employee identifier")),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Employee not found", body = ErrorSchema),
        (status = 503, description = "Record store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "deleteEmployee"
)]
#[delete("/employee/{id}")]
pub async fn delete_employee(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_employee_id(&path.into_inner())?;
    state.employees.delete_employee(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "employees_tests.rs"]
mod tests;
