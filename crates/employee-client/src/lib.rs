//! Client for the employee records API.
//!
//! [`HttpEmployeeGateway`] issues the REST calls, [`EmployeeDirectory`]
//! mirrors the employee list and reloads it after every successful mutation,
//! and [`EmployeeManagementView`] derives the search results, summary and
//! dialogs shown by the `employee-cli` front end.

pub mod directory;
pub mod gateway;
pub mod presentation;
pub mod record;
pub mod settings;

pub use directory::{EmployeeDirectory, Freshness};
pub use gateway::{ClientError, EmployeeGateway, HttpEmployeeGateway};
pub use presentation::{
    Dialog, EmployeeForm, EmployeeManagementView, FormError, Summary, ViewError, filter_employees,
    format_salary, render_table,
};
pub use record::{EmployeeInput, EmployeeRecord, Salary, SalaryError};
pub use settings::{ClientSettings, DEFAULT_API_URL};
