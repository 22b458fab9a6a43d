//! Driving port for employee mutations.

use async_trait::async_trait;

use crate::domain::{Employee, EmployeeDraft, EmployeeId, Error};

/// Domain use-case port for creating, updating and deleting employees.
///
/// Failures use the domain [`Error`]: `not_found` for unknown identifiers,
/// `service_unavailable` or `internal_error` when the store fails.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeesCommand: Send + Sync {
    /// Insert a new employee and return it with its assigned identifier.
    async fn create_employee(&self, draft: EmployeeDraft) -> Result<Employee, Error>;

    /// Replace every field of an existing employee.
    async fn update_employee(&self, id: EmployeeId, draft: EmployeeDraft)
    -> Result<Employee, Error>;

    /// Remove an existing employee.
    async fn delete_employee(&self, id: EmployeeId) -> Result<(), Error>;
}
