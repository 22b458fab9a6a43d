//! Domain primitives, services and ports.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload and category.
//! - Employee, EmployeeDraft, EmployeeId: the employee record and its
//!   validated, not-yet-stored form.
//! - Salary: fixed-point amount with cent precision.
//! - EmployeeRecordsService: list/create/update/delete over a repository.
//! - TraceId: request-scoped correlation identifier.

pub mod employee;
mod employee_records_service;
pub mod error;
pub mod ports;
pub mod salary;
pub mod trace_id;

pub use self::employee::{Employee, EmployeeDraft, EmployeeId, EmployeeValidationError};
pub use self::employee_records_service::EmployeeRecordsService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::salary::{Salary, SalaryValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
