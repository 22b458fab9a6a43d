//! Process-local `EmployeeRepository` used when no database is configured.
//!
//! Rows live in a `BTreeMap` keyed by identifier so listing is ordered like
//! the PostgreSQL adapter. Identifiers are never reused after a delete.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{EmployeeRepository, EmployeeRepositoryError};
use crate::domain::{Employee, EmployeeDraft, EmployeeId, Salary};

#[derive(Debug)]
struct Rows {
    next_id: i32,
    employees: BTreeMap<EmployeeId, Employee>,
}

/// In-memory implementation of the `EmployeeRepository` port.
#[derive(Debug)]
pub struct InMemoryEmployeeRepository {
    rows: Mutex<Rows>,
}

impl Default for InMemoryEmployeeRepository {
    fn default() -> Self {
        Self {
            rows: Mutex::new(Rows {
                next_id: 1,
                employees: BTreeMap::new(),
            }),
        }
    }
}

impl InMemoryEmployeeRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding the two default employees also seeded by
    /// the database migration.
    ///
    /// # Examples
    /// ```
    /// use records_backend::outbound::persistence::InMemoryEmployeeRepository;
    ///
    /// let repo = InMemoryEmployeeRepository::seeded();
    /// assert_eq!(repo.len(), 2);
    /// ```
    pub fn seeded() -> Self {
        let repo = Self::new();
        if let Ok(mut rows) = repo.rows.lock() {
            for (name, department, units) in [("John Doe", "IT", 75_000), ("Jane Smith", "HR", 65_000)]
            {
                if let Ok(draft) = EmployeeDraft::try_new(name, department, Salary::from_units(units))
                {
                    rows.push(draft);
                }
            }
        }
        repo
    }

    /// Number of stored employees.
    pub fn len(&self) -> usize {
        self.rows.lock().map(|rows| rows.employees.len()).unwrap_or(0)
    }

    /// Whether the repository holds no employees.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn rows(&self) -> Result<MutexGuard<'_, Rows>, EmployeeRepositoryError> {
        self.rows
            .lock()
            .map_err(|_| EmployeeRepositoryError::query("employee store lock poisoned"))
    }
}

impl Rows {
    fn push(&mut self, draft: EmployeeDraft) -> Employee {
        let id = EmployeeId::new(self.next_id);
        self.next_id += 1;
        let employee = draft.into_employee(id);
        self.employees.insert(id, employee.clone());
        employee
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn list(&self) -> Result<Vec<Employee>, EmployeeRepositoryError> {
        Ok(self.rows()?.employees.values().cloned().collect())
    }

    async fn insert(&self, draft: &EmployeeDraft) -> Result<Employee, EmployeeRepositoryError> {
        Ok(self.rows()?.push(draft.clone()))
    }

    async fn update(
        &self,
        id: EmployeeId,
        draft: &EmployeeDraft,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        let mut rows = self.rows()?;
        Ok(rows.employees.get_mut(&id).map(|slot| {
            *slot = draft.clone().into_employee(id);
            slot.clone()
        }))
    }

    async fn delete(&self, id: EmployeeId) -> Result<bool, EmployeeRepositoryError> {
        Ok(self.rows()?.employees.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn repo() -> InMemoryEmployeeRepository {
        InMemoryEmployeeRepository::seeded()
    }

    fn draft(name: &str) -> EmployeeDraft {
        EmployeeDraft::try_new(name, "Ops", Salary::from_units(1_000)).expect("valid draft")
    }

    #[rstest]
    #[tokio::test]
    async fn seeded_rows_are_listed_in_id_order(repo: InMemoryEmployeeRepository) {
        let names: Vec<_> = repo
            .list()
            .await
            .expect("list")
            .iter()
            .map(|employee| employee.name().to_owned())
            .collect();
        assert_eq!(names, ["John Doe", "Jane Smith"]);
    }

    #[rstest]
    #[tokio::test]
    async fn identifiers_are_not_reused(repo: InMemoryEmployeeRepository) {
        let created = repo.insert(&draft("Ada")).await.expect("insert");
        assert_eq!(created.id(), EmployeeId::new(3));
        assert!(repo.delete(created.id()).await.expect("delete"));

        let next = repo.insert(&draft("Grace")).await.expect("insert");
        assert_eq!(next.id(), EmployeeId::new(4));
    }

    #[rstest]
    #[tokio::test]
    async fn update_reports_missing_rows(repo: InMemoryEmployeeRepository) {
        let missing = repo
            .update(EmployeeId::new(99), &draft("Nobody"))
            .await
            .expect("update");
        assert!(missing.is_none());

        let updated = repo
            .update(EmployeeId::new(1), &draft("John Roe"))
            .await
            .expect("update")
            .expect("row exists");
        assert_eq!(updated.name(), "John Roe");
        assert_eq!(repo.len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_missing_rows(repo: InMemoryEmployeeRepository) {
        assert!(!repo.delete(EmployeeId::new(99)).await.expect("delete"));
        assert!(repo.delete(EmployeeId::new(2)).await.expect("delete"));
        assert_eq!(repo.len(), 1);
    }
}
