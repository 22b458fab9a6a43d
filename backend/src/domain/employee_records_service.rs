//! Employee records service.
//!
//! Implements the [`EmployeesQuery`] and [`EmployeesCommand`] driving ports on
//! top of an [`EmployeeRepository`]. There is no optimistic concurrency:
//! overlapping updates to the same identifier resolve as last-write-wins in
//! the store.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{
    EmployeeRepository, EmployeeRepositoryError, EmployeesCommand, EmployeesQuery,
};
use crate::domain::{Employee, EmployeeDraft, EmployeeId, Error};

/// Records service implementing the employee driving ports.
#[derive(Clone)]
pub struct EmployeeRecordsService<R> {
    repository: Arc<R>,
}

impl<R> EmployeeRecordsService<R> {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_repository_error(error: EmployeeRepositoryError) -> Error {
    match error {
        EmployeeRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("employee repository unavailable: {message}"))
        }
        EmployeeRepositoryError::Query { message } => {
            Error::internal(format!("employee repository error: {message}"))
        }
    }
}

fn employee_not_found(id: EmployeeId) -> Error {
    Error::not_found(format!("employee {id} not found"))
}

#[async_trait]
impl<R> EmployeesQuery for EmployeeRecordsService<R>
where
    R: EmployeeRepository,
{
    async fn list_employees(&self) -> Result<Vec<Employee>, Error> {
        let employees = self.repository.list().await.map_err(map_repository_error)?;
        debug!(count = employees.len(), "listed employees");
        Ok(employees)
    }
}

#[async_trait]
impl<R> EmployeesCommand for EmployeeRecordsService<R>
where
    R: EmployeeRepository,
{
    async fn create_employee(&self, draft: EmployeeDraft) -> Result<Employee, Error> {
        let employee = self
            .repository
            .insert(&draft)
            .await
            .map_err(map_repository_error)?;
        info!(employee_id = %employee.id(), "employee created");
        Ok(employee)
    }

    async fn update_employee(&self, id: EmployeeId, draft: EmployeeDraft) -> Result<Employee, Error> {
        let updated = self
            .repository
            .update(id, &draft)
            .await
            .map_err(map_repository_error)?;
        let employee = updated.ok_or_else(|| employee_not_found(id))?;
        info!(employee_id = %id, "employee updated");
        Ok(employee)
    }

    async fn delete_employee(&self, id: EmployeeId) -> Result<(), Error> {
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(employee_not_found(id));
        }
        info!(employee_id = %id, "employee deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "employee_records_service_tests.rs"]
mod tests;
