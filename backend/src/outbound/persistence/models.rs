//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use super::schema::employees;

/// Row struct for reading from the employees table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = employees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EmployeeRow {
    pub id: i32,
    pub name: String,
    pub department: String,
    pub salary: String,
}

/// Insertable struct for creating employee records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = employees)]
pub(crate) struct NewEmployeeRow<'a> {
    pub name: &'a str,
    pub department: &'a str,
    pub salary: String,
}

/// Changeset replacing every mutable employee column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = employees)]
pub(crate) struct EmployeeUpdate<'a> {
    pub name: &'a str,
    pub department: &'a str,
    pub salary: String,
}
