//! PostgreSQL-backed `EmployeeRepository` implementation using Diesel ORM.
//!
//! Updates are applied with `UPDATE ... RETURNING` and deletes report the
//! affected row count, so a missing identifier is detected in the same round
//! trip as the mutation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::ports::{EmployeeRepository, EmployeeRepositoryError};
use crate::domain::{Employee, EmployeeDraft, EmployeeId, Salary};

use super::models::{EmployeeRow, EmployeeUpdate, NewEmployeeRow};
use super::pool::{DbPool, PoolError};
use super::schema::employees;

/// Diesel-backed implementation of the `EmployeeRepository` port.
#[derive(Clone)]
pub struct DieselEmployeeRepository {
    pool: DbPool,
}

impl DieselEmployeeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EmployeeRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            EmployeeRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> EmployeeRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => EmployeeRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => {
            EmployeeRepositoryError::query("database query error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            EmployeeRepositoryError::connection("database connection error")
        }
        _ => EmployeeRepositoryError::query("database error"),
    }
}

/// Convert a database row to a domain employee.
///
/// Rows are written through this adapter, so a salary that fails to parse
/// indicates the table was edited out of band.
fn row_to_employee(row: EmployeeRow) -> Result<Employee, EmployeeRepositoryError> {
    let salary = row.salary.parse::<Salary>().map_err(|err| {
        warn!(employee_id = row.id, value = %row.salary, "stored salary is not a valid amount");
        EmployeeRepositoryError::query(format!("invalid stored salary: {err}"))
    })?;
    let draft = EmployeeDraft::try_new(row.name, row.department, salary).map_err(|err| {
        warn!(employee_id = row.id, "stored employee row failed validation");
        EmployeeRepositoryError::query(format!("invalid stored employee: {err}"))
    })?;
    Ok(Employee::new(EmployeeId::new(row.id), draft))
}

#[async_trait]
impl EmployeeRepository for DieselEmployeeRepository {
    async fn list(&self) -> Result<Vec<Employee>, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<EmployeeRow> = employees::table
            .order(employees::id.asc())
            .select(EmployeeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_employee).collect()
    }

    async fn insert(&self, draft: &EmployeeDraft) -> Result<Employee, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewEmployeeRow {
            name: draft.name(),
            department: draft.department(),
            salary: draft.salary().to_string(),
        };

        let row: EmployeeRow = diesel::insert_into(employees::table)
            .values(&new_row)
            .returning(EmployeeRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_employee(row)
    }

    async fn update(
        &self,
        id: EmployeeId,
        draft: &EmployeeDraft,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = EmployeeUpdate {
            name: draft.name(),
            department: draft.department(),
            salary: draft.salary().to_string(),
        };

        let row: Option<EmployeeRow> = diesel::update(employees::table.find(id.get()))
            .set(&changes)
            .returning(EmployeeRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_employee).transpose()
    }

    async fn delete(&self, id: EmployeeId) -> Result<bool, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(employees::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion and error mapping coverage; queries run against an
    //! embedded cluster in `tests/diesel_employee_repository.rs`.

    use super::*;
    use rstest::rstest;

    fn row(salary: &str) -> EmployeeRow {
        EmployeeRow {
            id: 4,
            name: "Ada".to_owned(),
            department: "IT".to_owned(),
            salary: salary.to_owned(),
        }
    }

    #[rstest]
    fn row_converts_to_employee() {
        let employee = row_to_employee(row("75000.00")).expect("valid row");
        assert_eq!(employee.id(), EmployeeId::new(4));
        assert_eq!(employee.salary(), Salary::from_units(75_000));
    }

    #[rstest]
    fn corrupt_salary_is_a_query_error() {
        let err = row_to_employee(row("n/a")).expect_err("corrupt salary");
        assert!(matches!(err, EmployeeRepositoryError::Query { .. }));
    }

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, EmployeeRepositoryError::connection("timed out"));
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert_eq!(err, EmployeeRepositoryError::query("record not found"));
    }
}
