//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{EmployeesCommand, EmployeesQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub employees: Arc<dyn EmployeesCommand>,
    pub employees_query: Arc<dyn EmployeesQuery>,
}

impl HttpState {
    /// Construct state from the command and query ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use records_backend::domain::EmployeeRecordsService;
    /// use records_backend::inbound::http::state::HttpState;
    /// use records_backend::outbound::persistence::InMemoryEmployeeRepository;
    ///
    /// let service = Arc::new(EmployeeRecordsService::new(Arc::new(
    ///     InMemoryEmployeeRepository::seeded(),
    /// )));
    /// let state = HttpState::new(service.clone(), service);
    /// let _query = state.employees_query.clone();
    /// ```
    pub fn new(
        employees: Arc<dyn EmployeesCommand>,
        employees_query: Arc<dyn EmployeesQuery>,
    ) -> Self {
        Self {
            employees,
            employees_query,
        }
    }
}
