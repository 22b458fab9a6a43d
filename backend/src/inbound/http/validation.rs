//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;

use crate::domain::{EmployeeId, EmployeeValidationError, Error, SalaryValidationError};

/// Validation error codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    EmptyField,
    InvalidSalary,
    InvalidId,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::EmptyField => "empty_field",
            ErrorCode::InvalidSalary => "invalid_salary",
            ErrorCode::InvalidId => "invalid_id",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

fn field_error(field: &str, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    field_error(
        field,
        ErrorCode::MissingField,
        format!("missing required field: {field}"),
    )
}

/// Unwrap a required payload field or report it as missing.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

pub(crate) fn map_employee_validation_error(err: EmployeeValidationError) -> Error {
    let code = match err {
        EmployeeValidationError::EmptyName | EmployeeValidationError::EmptyDepartment => {
            ErrorCode::EmptyField
        }
        EmployeeValidationError::Salary(_) => ErrorCode::InvalidSalary,
    };
    field_error(err.field(), code, err.to_string())
}

pub(crate) fn map_salary_validation_error(err: SalaryValidationError) -> Error {
    map_employee_validation_error(EmployeeValidationError::Salary(err))
}

/// Parse an employee identifier taken from the request path.
pub(crate) fn parse_employee_id(raw: &str) -> Result<EmployeeId, Error> {
    raw.parse::<i32>().map(EmployeeId::new).map_err(|_| {
        field_error("id", ErrorCode::InvalidId, "id must be an integer")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn missing_field_error_names_field() {
        let err = missing_field_error(FieldName::new("department"));
        assert_eq!(err.message(), "missing required field: department");
        assert_eq!(
            err.details(),
            Some(&json!({ "field": "department", "code": "missing_field" }))
        );
    }

    #[rstest]
    #[case("7", Some(7))]
    #[case("-1", Some(-1))]
    #[case("seven", None)]
    #[case("99999999999", None)]
    fn parse_employee_id_accepts_integers(#[case] raw: &str, #[case] expected: Option<i32>) {
        assert_eq!(parse_employee_id(raw).ok().map(EmployeeId::get), expected);
    }

    #[rstest]
    fn salary_failures_point_at_salary() {
        let err = map_salary_validation_error(SalaryValidationError::Negative);
        assert_eq!(err.message(), "salary must not be negative");
        assert_eq!(
            err.details(),
            Some(&json!({ "field": "salary", "code": "invalid_salary" }))
        );
    }
}
