//! Client-side mirror of the employee list.
//!
//! The directory never patches its list after a mutation. A successful
//! create, update or delete invalidates the mirror and reloads the full list
//! from the service. A failed call logs the error and leaves the mirror as it
//! was.
//!
//! A mutation that the service accepted is reported as a success even when
//! the reload after it fails. The mirror then stays [`Freshness::Invalidated`]
//! with its previous contents until the next successful [`EmployeeDirectory::refresh`].

use tracing::{debug, error, warn};

use crate::gateway::{ClientError, EmployeeGateway};
use crate::record::{EmployeeInput, EmployeeRecord};

/// Synchronisation state of the mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// The list matches the service as of the last reload.
    Fresh,
    /// A mutation succeeded, or the list was never loaded, and no reload has
    /// completed since.
    Invalidated,
}

/// Store object holding the employee list mirrored from the service.
pub struct EmployeeDirectory<G> {
    gateway: G,
    employees: Vec<EmployeeRecord>,
    freshness: Freshness,
}

impl<G> EmployeeDirectory<G>
where
    G: EmployeeGateway,
{
    /// Create an empty, invalidated directory. Call [`Self::refresh`] to
    /// load it.
    #[must_use]
    pub const fn new(gateway: G) -> Self {
        Self {
            gateway,
            employees: Vec::new(),
            freshness: Freshness::Invalidated,
        }
    }

    /// Mirrored employees in service order.
    #[must_use]
    pub fn employees(&self) -> &[EmployeeRecord] {
        &self.employees
    }

    /// Gateway the directory talks through.
    #[must_use]
    pub const fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Whether the mirror reflects the service as of the last reload.
    #[must_use]
    pub const fn freshness(&self) -> Freshness {
        self.freshness
    }

    /// Look up a mirrored employee by identifier.
    #[must_use]
    pub fn find(&self, id: i32) -> Option<&EmployeeRecord> {
        self.employees.iter().find(|employee| employee.id == id)
    }

    /// Replace the mirror with the service's current list.
    ///
    /// # Errors
    /// Returns the gateway failure; the previous list and freshness are kept.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        match self.gateway.list().await {
            Ok(employees) => {
                debug!(count = employees.len(), "employee list reloaded");
                self.employees = employees;
                self.freshness = Freshness::Fresh;
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "failed to fetch employees");
                Err(err)
            }
        }
    }

    /// Create an employee, then reload.
    ///
    /// # Errors
    /// Returns the create failure. A failed reload after a successful create
    /// is logged and leaves the mirror invalidated rather than failing the
    /// call.
    pub async fn create(&mut self, input: &EmployeeInput) -> Result<EmployeeRecord, ClientError> {
        let created = self
            .gateway
            .create(input)
            .await
            .inspect_err(|err| error!(error = %err, "failed to add employee"))?;
        self.invalidate_and_reload().await;
        Ok(created)
    }

    /// Update an employee, then reload.
    ///
    /// # Errors
    /// Returns the update failure. A failed reload after a successful update
    /// is logged and leaves the mirror invalidated rather than failing the
    /// call.
    pub async fn update(
        &mut self,
        id: i32,
        input: &EmployeeInput,
    ) -> Result<EmployeeRecord, ClientError> {
        let updated = self
            .gateway
            .update(id, input)
            .await
            .inspect_err(|err| error!(error = %err, employee_id = id, "failed to update employee"))?;
        self.invalidate_and_reload().await;
        Ok(updated)
    }

    /// Delete an employee, then reload.
    ///
    /// # Errors
    /// Returns the delete failure. A failed reload after a successful delete
    /// is logged and leaves the mirror invalidated rather than failing the
    /// call.
    pub async fn delete(&mut self, id: i32) -> Result<(), ClientError> {
        self.gateway
            .delete(id)
            .await
            .inspect_err(|err| error!(error = %err, employee_id = id, "failed to delete employee"))?;
        self.invalidate_and_reload().await;
        Ok(())
    }

    async fn invalidate_and_reload(&mut self) {
        self.freshness = Freshness::Invalidated;
        if self.refresh().await.is_err() {
            warn!(
                count = self.employees.len(),
                "employee list left stale until the next refresh"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MockEmployeeGateway;
    use crate::record::Salary;
    use mockall::Sequence;
    use rstest::{fixture, rstest};

    fn record(id: i32, name: &str, department: &str, salary: u32) -> EmployeeRecord {
        EmployeeRecord {
            id,
            name: name.to_owned(),
            department: department.to_owned(),
            salary: Salary::from_units(salary),
        }
    }

    fn seeded() -> Vec<EmployeeRecord> {
        vec![
            record(1, "John Doe", "IT", 75_000),
            record(2, "Jane Smith", "HR", 65_000),
        ]
    }

    fn transport_error() -> ClientError {
        ClientError::Transport {
            url: "http://records.test/api/employee".to_owned(),
            message: "connection refused".to_owned(),
        }
    }

    #[fixture]
    fn input() -> EmployeeInput {
        EmployeeInput {
            name: "Ada".to_owned(),
            department: "R&D".to_owned(),
            salary: Salary::from_units(90_000),
        }
    }

    /// Expect the initial load that every test starts from.
    fn expect_initial_list(gateway: &mut MockEmployeeGateway, seq: &mut Sequence) {
        gateway
            .expect_list()
            .times(1)
            .in_sequence(seq)
            .returning(|| Ok(seeded()));
    }

    #[tokio::test]
    async fn new_directory_starts_invalidated() {
        let directory = EmployeeDirectory::new(MockEmployeeGateway::new());
        assert_eq!(directory.freshness(), Freshness::Invalidated);
        assert!(directory.employees().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn create_reloads_instead_of_patching(input: EmployeeInput) {
        let mut seq = Sequence::new();
        let mut gateway = MockEmployeeGateway::new();
        expect_initial_list(&mut gateway, &mut seq);
        gateway
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(record(3, "Ada", "R&D", 90_000)));
        gateway
            .expect_list()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| {
                let mut all = seeded();
                all.push(record(3, "Ada", "R&D", 90_000));
                Ok(all)
            });

        let mut directory = EmployeeDirectory::new(gateway);
        directory.refresh().await.expect("initial load");
        let created = directory.create(&input).await.expect("create");

        assert_eq!(created.id, 3);
        assert_eq!(directory.employees().len(), 3);
        assert_eq!(directory.find(3).map(|e| e.name.as_str()), Some("Ada"));
        assert_eq!(directory.freshness(), Freshness::Fresh);
    }

    #[rstest]
    #[tokio::test]
    async fn failed_mutations_leave_state_unchanged(input: EmployeeInput) {
        let mut seq = Sequence::new();
        let mut gateway = MockEmployeeGateway::new();
        expect_initial_list(&mut gateway, &mut seq);
        gateway
            .expect_update()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Err(transport_error()));
        gateway
            .expect_delete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Err(ClientError::Status {
                    method: "DELETE".to_owned(),
                    url: "http://records.test/api/employee/9".to_owned(),
                    status: 404,
                    message: "employee 9 not found".to_owned(),
                })
            });

        let mut directory = EmployeeDirectory::new(gateway);
        directory.refresh().await.expect("initial load");
        let update = directory.update(1, &input).await;
        let delete = directory.delete(9).await;

        assert_eq!(update, Err(transport_error()));
        assert!(delete.expect_err("delete fails").is_not_found());
        assert_eq!(directory.employees(), seeded().as_slice());
        assert_eq!(directory.freshness(), Freshness::Fresh);
    }

    #[tokio::test]
    async fn failed_reload_after_delete_still_reports_success() {
        let mut seq = Sequence::new();
        let mut gateway = MockEmployeeGateway::new();
        expect_initial_list(&mut gateway, &mut seq);
        gateway
            .expect_delete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        gateway
            .expect_list()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Err(transport_error()));

        let mut directory = EmployeeDirectory::new(gateway);
        directory.refresh().await.expect("initial load");
        let result = directory.delete(2).await;

        assert_eq!(result, Ok(()));
        assert_eq!(directory.employees(), seeded().as_slice());
        assert_eq!(directory.freshness(), Freshness::Invalidated);
    }

    #[rstest]
    #[tokio::test]
    async fn failed_reload_after_create_returns_created_record(input: EmployeeInput) {
        let mut seq = Sequence::new();
        let mut gateway = MockEmployeeGateway::new();
        expect_initial_list(&mut gateway, &mut seq);
        gateway
            .expect_create()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(record(3, "Ada", "R&D", 90_000)));
        gateway
            .expect_list()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Err(transport_error()));
        gateway
            .expect_list()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| {
                let mut all = seeded();
                all.push(record(3, "Ada", "R&D", 90_000));
                Ok(all)
            });

        let mut directory = EmployeeDirectory::new(gateway);
        directory.refresh().await.expect("initial load");
        let created = directory.create(&input).await.expect("create accepted");

        assert_eq!(created.id, 3);
        assert_eq!(directory.freshness(), Freshness::Invalidated);
        assert!(directory.find(3).is_none());

        directory.refresh().await.expect("later refresh");
        assert_eq!(directory.freshness(), Freshness::Fresh);
        assert_eq!(directory.employees().len(), 3);
    }
}
