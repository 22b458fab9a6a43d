//! Employee record model.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Salary, SalaryValidationError};

/// Validation errors returned by [`EmployeeDraft::try_new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EmployeeValidationError {
    /// The name was empty once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// The department was empty once trimmed.
    #[error("department must not be empty")]
    EmptyDepartment,
    /// The salary failed to parse.
    #[error(transparent)]
    Salary(#[from] SalaryValidationError),
}

impl EmployeeValidationError {
    /// Name of the payload field the failure relates to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::EmptyDepartment => "department",
            Self::Salary(_) => "salary",
        }
    }
}

/// Server-assigned employee identifier.
///
/// Identifiers are allocated by the record store on insert and never change
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(i32);

impl EmployeeId {
    /// Wrap a raw store identifier.
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Access the raw store identifier.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated employee fields awaiting an identifier.
///
/// ## Invariants
/// - `name` and `department` are trimmed and non-empty.
/// - `salary` is non-negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDraft {
    name: String,
    department: String,
    salary: Salary,
}

impl EmployeeDraft {
    /// Validate and construct a draft from raw field values.
    ///
    /// # Examples
    /// ```
    /// use records_backend::domain::{EmployeeDraft, Salary};
    ///
    /// let draft = EmployeeDraft::try_new("  Ada ", "Research", Salary::from_units(90_000))
    ///     .expect("valid draft");
    /// assert_eq!(draft.name(), "Ada");
    /// ```
    pub fn try_new(
        name: impl AsRef<str>,
        department: impl AsRef<str>,
        salary: Salary,
    ) -> Result<Self, EmployeeValidationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(EmployeeValidationError::EmptyName);
        }
        let department = department.as_ref().trim();
        if department.is_empty() {
            return Err(EmployeeValidationError::EmptyDepartment);
        }
        Ok(Self {
            name: name.to_owned(),
            department: department.to_owned(),
            salary,
        })
    }

    /// Validate a draft whose salary is still unparsed text.
    pub fn try_from_parts(
        name: impl AsRef<str>,
        department: impl AsRef<str>,
        salary: &str,
    ) -> Result<Self, EmployeeValidationError> {
        let salary = salary.parse::<Salary>()?;
        Self::try_new(name, department, salary)
    }

    /// Employee's full name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Department the employee belongs to.
    pub fn department(&self) -> &str {
        &self.department
    }

    /// Annual salary.
    pub fn salary(&self) -> Salary {
        self.salary
    }

    /// Attach a store-assigned identifier.
    pub fn into_employee(self, id: EmployeeId) -> Employee {
        let Self {
            name,
            department,
            salary,
        } = self;
        Employee {
            id,
            name,
            department,
            salary,
        }
    }
}

/// Persisted employee record.
///
/// Serialises as `{"id", "name", "department", "salary"}` with `salary` as a
/// JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    id: EmployeeId,
    name: String,
    department: String,
    salary: Salary,
}

impl Employee {
    /// Build a record from an identifier and validated fields.
    pub fn new(id: EmployeeId, draft: EmployeeDraft) -> Self {
        draft.into_employee(id)
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> EmployeeId {
        self.id
    }

    /// Employee's full name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Department the employee belongs to.
    pub fn department(&self) -> &str {
        &self.department
    }

    /// Annual salary.
    pub fn salary(&self) -> Salary {
        self.salary
    }
}
