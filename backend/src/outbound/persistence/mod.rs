//! Employee record persistence adapters.
//!
//! Two implementations of the `EmployeeRepository` port live here:
//!
//! - [`DieselEmployeeRepository`] stores rows in PostgreSQL through Diesel,
//!   with async support from `diesel-async` and `bb8` connection pooling.
//! - [`InMemoryEmployeeRepository`] keeps rows in process memory and backs
//!   the server when no database URL is configured.
//!
//! Diesel row structs (`models.rs`) and table definitions (`schema.rs`) are
//! internal and never exposed to the domain layer.
//!
//! # Example
//!
//! ```no_run
//! use records_backend::outbound::persistence::{DbPool, DieselEmployeeRepository, PoolConfig};
//!
//! # async fn connect() -> Result<(), records_backend::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/employees")).await?;
//! let repo = DieselEmployeeRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_employee_repository;
mod in_memory_employee_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_employee_repository::DieselEmployeeRepository;
pub use in_memory_employee_repository::InMemoryEmployeeRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
