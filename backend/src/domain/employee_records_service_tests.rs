//! Tests for the employee records service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockEmployeeRepository;
use crate::domain::{ErrorCode, Salary};

#[fixture]
fn draft() -> EmployeeDraft {
    EmployeeDraft::try_new("Grace Hopper", "Engineering", Salary::from_units(120_000))
        .expect("valid draft")
}

fn make_service(repo: MockEmployeeRepository) -> EmployeeRecordsService<MockEmployeeRepository> {
    EmployeeRecordsService::new(Arc::new(repo))
}

#[rstest]
#[tokio::test]
async fn create_returns_record_with_assigned_id(draft: EmployeeDraft) {
    let mut repo = MockEmployeeRepository::new();
    repo.expect_insert()
        .times(1)
        .returning(|draft| Ok(draft.clone().into_employee(EmployeeId::new(3))));

    let employee = make_service(repo)
        .create_employee(draft)
        .await
        .expect("create succeeds");

    assert_eq!(employee.id(), EmployeeId::new(3));
    assert_eq!(employee.name(), "Grace Hopper");
}

#[rstest]
#[tokio::test]
async fn update_returns_replaced_record(draft: EmployeeDraft) {
    let mut repo = MockEmployeeRepository::new();
    repo.expect_update()
        .with(eq(EmployeeId::new(1)), eq(draft.clone()))
        .times(1)
        .returning(|id, draft| Ok(Some(draft.clone().into_employee(id))));

    let employee = make_service(repo)
        .update_employee(EmployeeId::new(1), draft)
        .await
        .expect("update succeeds");

    assert_eq!(employee.id(), EmployeeId::new(1));
    assert_eq!(employee.salary(), Salary::from_units(120_000));
}

#[rstest]
#[tokio::test]
async fn update_of_unknown_id_is_not_found(draft: EmployeeDraft) {
    let mut repo = MockEmployeeRepository::new();
    repo.expect_update().times(1).returning(|_, _| Ok(None));

    let err = make_service(repo)
        .update_employee(EmployeeId::new(42), draft)
        .await
        .expect_err("missing row");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), "employee 42 not found");
}

#[rstest]
#[case(true, None)]
#[case(false, Some(ErrorCode::NotFound))]
#[tokio::test]
async fn delete_reports_missing_rows(#[case] removed: bool, #[case] expected: Option<ErrorCode>) {
    let mut repo = MockEmployeeRepository::new();
    repo.expect_delete()
        .with(eq(EmployeeId::new(2)))
        .times(1)
        .return_once(move |_| Ok(removed));

    let result = make_service(repo).delete_employee(EmployeeId::new(2)).await;

    assert_eq!(result.err().map(|err| err.code()), expected);
}

#[rstest]
#[case(
    EmployeeRepositoryError::connection("pool exhausted"),
    ErrorCode::ServiceUnavailable
)]
#[case(EmployeeRepositoryError::query("syntax error"), ErrorCode::InternalError)]
#[tokio::test]
async fn list_maps_repository_failures(
    #[case] failure: EmployeeRepositoryError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockEmployeeRepository::new();
    repo.expect_list().times(1).return_once(move || Err(failure));

    let err = make_service(repo)
        .list_employees()
        .await
        .expect_err("repository failure propagates");

    assert_eq!(err.code(), expected);
}
