//! Driven port for the employee record store.
//!
//! The store is the sole source of truth for employee rows. It allocates
//! identifiers on insert and applies updates in place; concurrent updates to
//! the same row resolve as last-write-wins.

use async_trait::async_trait;

use crate::domain::{Employee, EmployeeDraft, EmployeeId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by employee repository adapters.
    pub enum EmployeeRepositoryError {
        /// Repository connection could not be established.
        Connection => "employee repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "employee repository query failed: {message}",
    }
}

/// Port for employee row storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Return every stored employee ordered by ascending identifier.
    async fn list(&self) -> Result<Vec<Employee>, EmployeeRepositoryError>;

    /// Insert a new row and return it with its allocated identifier.
    async fn insert(&self, draft: &EmployeeDraft) -> Result<Employee, EmployeeRepositoryError>;

    /// Replace the fields of an existing row.
    ///
    /// Returns `None` when no row has the given identifier.
    async fn update(
        &self,
        id: EmployeeId,
        draft: &EmployeeDraft,
    ) -> Result<Option<Employee>, EmployeeRepositoryError>;

    /// Remove a row.
    ///
    /// Returns `false` when no row has the given identifier.
    async fn delete(&self, id: EmployeeId) -> Result<bool, EmployeeRepositoryError>;
}
