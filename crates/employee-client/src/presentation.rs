//! Presentation logic for the employee management screen.
//!
//! [`EmployeeManagementView`] owns an [`EmployeeDirectory`] and layers the
//! search box, summary statistics and add/edit/delete dialogs on top of it.
//! Everything here is derived on demand from the directory's list; nothing is
//! cached between renders.

use std::collections::HashSet;

use crate::directory::{EmployeeDirectory, Freshness};
use crate::gateway::{ClientError, EmployeeGateway};
use crate::record::{EmployeeInput, EmployeeRecord, Salary};

/// Statistics over the full, unfiltered employee list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Number of employees.
    pub total_employees: usize,
    /// Exact sum of every salary.
    pub total_salary: Salary,
    /// Number of distinct department labels.
    pub departments: usize,
}

impl Summary {
    /// Compute the summary of `employees`.
    ///
    /// # Examples
    /// ```
    /// use employee_client::{EmployeeRecord, Salary, Summary};
    ///
    /// let employees = [
    ///     EmployeeRecord { id: 1, name: "John Doe".into(), department: "IT".into(), salary: Salary::from_units(75_000) },
    ///     EmployeeRecord { id: 2, name: "Jane Smith".into(), department: "HR".into(), salary: Salary::from_units(65_000) },
    /// ];
    /// let summary = Summary::of(&employees);
    /// assert_eq!(summary.total_salary, Salary::from_units(140_000));
    /// assert_eq!(summary.departments, 2);
    /// ```
    #[must_use]
    pub fn of(employees: &[EmployeeRecord]) -> Self {
        let departments: HashSet<&str> = employees
            .iter()
            .map(|employee| employee.department.as_str())
            .collect();
        Self {
            total_employees: employees.len(),
            total_salary: employees.iter().map(|employee| employee.salary).sum(),
            departments: departments.len(),
        }
    }
}

/// Case-insensitive substring match over name and department.
///
/// A blank query matches every employee.
#[must_use]
pub fn filter_employees<'a>(employees: &'a [EmployeeRecord], query: &str) -> Vec<&'a EmployeeRecord> {
    let needle = query.trim().to_lowercase();
    employees
        .iter()
        .filter(|employee| {
            needle.is_empty()
                || employee.name.to_lowercase().contains(&needle)
                || employee.department.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Format an amount like `$75,000` or `$91,000.5`.
#[must_use]
pub fn format_salary(amount: Salary) -> String {
    let plain = amount.to_string();
    let (whole, fraction) = plain
        .split_once('.')
        .map_or((plain.as_str(), None), |(units, cents)| (units, Some(cents)));
    let digits: Vec<char> = whole.chars().collect();
    let groups: Vec<String> = digits
        .rchunks(3)
        .rev()
        .map(|chunk| chunk.iter().collect())
        .collect();
    let grouped = groups.join(",");
    fraction.map_or_else(
        || format!("${grouped}"),
        |cents| format!("${grouped}.{cents}"),
    )
}

/// Validation failures caught before a request is sent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// A required field was left blank.
    #[error("{0} is required")]
    MissingField(&'static str),
    /// The salary text is not a non-negative amount with at most two
    /// decimal places.
    #[error("salary must be a non-negative number with at most two decimal places")]
    InvalidSalary,
}

/// Text fields of the add/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeForm {
    /// Name text as typed.
    pub name: String,
    /// Department text as typed.
    pub department: String,
    /// Salary text as typed.
    pub salary: String,
}

impl EmployeeForm {
    /// Pre-fill the form from an existing record.
    #[must_use]
    pub fn from_record(record: &EmployeeRecord) -> Self {
        Self {
            name: record.name.clone(),
            department: record.department.clone(),
            salary: record.salary.to_string(),
        }
    }

    /// Check required fields and parse the salary.
    ///
    /// # Errors
    /// Returns the first blank field in name, department, salary order, or
    /// [`FormError::InvalidSalary`] when the salary is not a valid amount.
    pub fn to_input(&self) -> Result<EmployeeInput, FormError> {
        let name = required(&self.name, "name")?;
        let department = required(&self.department, "department")?;
        let salary_text = required(&self.salary, "salary")?;
        let salary = salary_text
            .parse::<Salary>()
            .map_err(|_| FormError::InvalidSalary)?;
        Ok(EmployeeInput {
            name: name.to_owned(),
            department: department.to_owned(),
            salary,
        })
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FormError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}

/// Which dialog, if any, is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// No dialog is shown.
    Closed,
    /// Add dialog with its form.
    Add(EmployeeForm),
    /// Edit dialog for an existing employee.
    Edit {
        /// Employee being edited.
        id: i32,
        /// Form pre-filled from the record.
        form: EmployeeForm,
    },
    /// Delete confirmation for an employee.
    ConfirmDelete {
        /// Employee to delete.
        id: i32,
        /// Name shown in the prompt.
        name: String,
    },
}

/// Failures reported by view actions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// The form failed validation; nothing was sent.
    #[error(transparent)]
    Form(#[from] FormError),
    /// The service call failed.
    #[error(transparent)]
    Client(#[from] ClientError),
    /// The action needs a dialog that is not open.
    #[error("no matching dialog is open")]
    NoDialog,
    /// The selected employee is not in the mirrored list.
    #[error("employee {0} is not in the list")]
    UnknownEmployee(i32),
}

/// Employee management screen state.
pub struct EmployeeManagementView<G> {
    directory: EmployeeDirectory<G>,
    search: String,
    dialog: Dialog,
}

impl<G> EmployeeManagementView<G>
where
    G: EmployeeGateway,
{
    /// Wrap a directory with an empty search box and no dialog open.
    #[must_use]
    pub const fn new(directory: EmployeeDirectory<G>) -> Self {
        Self {
            directory,
            search: String::new(),
            dialog: Dialog::Closed,
        }
    }

    /// Directory backing the view.
    #[must_use]
    pub const fn directory(&self) -> &EmployeeDirectory<G> {
        &self.directory
    }

    /// Reload the list from the service.
    ///
    /// # Errors
    /// Returns the directory's reload failure.
    pub async fn load(&mut self) -> Result<(), ViewError> {
        Ok(self.directory.refresh().await?)
    }

    /// Replace the search box text.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Current search box text.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Employees matching the search box.
    #[must_use]
    pub fn visible(&self) -> Vec<&EmployeeRecord> {
        filter_employees(self.directory.employees(), &self.search)
    }

    /// Summary over every employee, ignoring the search box.
    #[must_use]
    pub fn summary(&self) -> Summary {
        Summary::of(self.directory.employees())
    }

    /// Dialog currently open.
    #[must_use]
    pub const fn dialog(&self) -> &Dialog {
        &self.dialog
    }

    /// Open the add dialog with an empty form.
    pub fn open_add(&mut self) {
        self.dialog = Dialog::Add(EmployeeForm::default());
    }

    /// Open the edit dialog pre-filled from employee `id`.
    ///
    /// # Errors
    /// Returns [`ViewError::UnknownEmployee`] when `id` is not listed.
    pub fn open_edit(&mut self, id: i32) -> Result<(), ViewError> {
        let record = self
            .directory
            .find(id)
            .ok_or(ViewError::UnknownEmployee(id))?;
        self.dialog = Dialog::Edit {
            id,
            form: EmployeeForm::from_record(record),
        };
        Ok(())
    }

    /// Mutable access to the open add/edit form.
    pub fn form_mut(&mut self) -> Option<&mut EmployeeForm> {
        match &mut self.dialog {
            Dialog::Add(form) | Dialog::Edit { form, .. } => Some(form),
            Dialog::Closed | Dialog::ConfirmDelete { .. } => None,
        }
    }

    /// Submit the open add/edit form.
    ///
    /// The dialog closes once the service accepts the request, even if the
    /// list reload after it fails; the directory is then left
    /// [`Freshness::Invalidated`]. On a validation or service failure the
    /// dialog stays open with the form intact.
    ///
    /// # Errors
    /// Returns form validation failures, client failures, or
    /// [`ViewError::NoDialog`] when no form is open.
    pub async fn submit(&mut self) -> Result<EmployeeRecord, ViewError> {
        let saved = match &self.dialog {
            Dialog::Add(form) => {
                let input = form.to_input()?;
                self.directory.create(&input).await?
            }
            Dialog::Edit { id, form } => {
                let input = form.to_input()?;
                self.directory.update(*id, &input).await?
            }
            Dialog::Closed | Dialog::ConfirmDelete { .. } => return Err(ViewError::NoDialog),
        };
        self.dialog = Dialog::Closed;
        Ok(saved)
    }

    /// Close any dialog, discarding the form.
    pub fn cancel(&mut self) {
        self.dialog = Dialog::Closed;
    }

    /// Open the delete confirmation for employee `id`.
    ///
    /// # Errors
    /// Returns [`ViewError::UnknownEmployee`] when `id` is not listed.
    pub fn request_delete(&mut self, id: i32) -> Result<(), ViewError> {
        let record = self
            .directory
            .find(id)
            .ok_or(ViewError::UnknownEmployee(id))?;
        self.dialog = Dialog::ConfirmDelete {
            id,
            name: record.name.clone(),
        };
        Ok(())
    }

    /// Prompt shown by the delete confirmation dialog.
    #[must_use]
    pub fn confirmation_prompt(&self) -> Option<String> {
        match &self.dialog {
            Dialog::ConfirmDelete { name, .. } => {
                Some(format!("Are you sure you want to delete {name}?"))
            }
            _ => None,
        }
    }

    /// Issue the delete awaiting confirmation.
    ///
    /// # Errors
    /// Returns client failures from the delete itself, leaving the dialog
    /// open, or [`ViewError::NoDialog`] when no confirmation is pending.
    pub async fn confirm_delete(&mut self) -> Result<(), ViewError> {
        let Dialog::ConfirmDelete { id, .. } = &self.dialog else {
            return Err(ViewError::NoDialog);
        };
        self.directory.delete(*id).await?;
        self.dialog = Dialog::Closed;
        Ok(())
    }

    /// Whether the list on screen may be out of date because a reload after
    /// a mutation failed.
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.directory.freshness() == Freshness::Invalidated
    }

    /// Render the visible rows and the summary as a text table.
    #[must_use]
    pub fn render(&self) -> String {
        render_table(&self.visible(), &self.summary())
    }
}

const HEADERS: [&str; 4] = ["ID", "Name", "Department", "Salary"];

/// Lay out `rows` in aligned columns followed by the summary line.
#[must_use]
pub fn render_table(rows: &[&EmployeeRecord], summary: &Summary) -> String {
    let cells: Vec<[String; 4]> = rows
        .iter()
        .map(|employee| {
            [
                employee.id.to_string(),
                employee.name.clone(),
                employee.department.clone(),
                format_salary(employee.salary),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(str::to_owned), widths);
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');
    if cells.is_empty() {
        out.push_str("(no matching employees)\n");
    }
    for row in &cells {
        push_row(&mut out, row, widths);
    }
    out.push_str(&format!(
        "\nTotal employees: {} | Total salary: {} | Departments: {}",
        summary.total_employees,
        format_salary(summary.total_salary),
        summary.departments
    ));
    out
}

fn push_row(out: &mut String, row: &[String; 4], widths: [usize; 4]) {
    let [id, name, department, salary] = row;
    let [id_width, name_width, department_width, salary_width] = widths;
    out.push_str(&format!(
        "{id:>id_width$} | {name:<name_width$} | {department:<department_width$} | {salary:>salary_width$}\n"
    ));
}

#[cfg(test)]
#[path = "presentation_tests.rs"]
mod tests;
