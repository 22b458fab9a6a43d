//! Driving port for employee listings.
//!
//! Inbound adapters (HTTP handlers) use this port to read the employee table
//! without importing outbound persistence concerns.

use async_trait::async_trait;

use crate::domain::{Employee, Error};

/// Domain use-case port for listing employees.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeesQuery: Send + Sync {
    /// Return every employee; no filtering or pagination.
    async fn list_employees(&self) -> Result<Vec<Employee>, Error>;
}
