//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. When the
//! migrations change, regenerate this file with `diesel print-schema`.

diesel::table! {
    /// Employee records.
    ///
    /// `salary` holds a fixed two-decimal string such as `75000.00` so no
    /// precision is lost between the API and the store.
    employees (id) {
        /// Primary key allocated from an identity sequence.
        id -> Int4,
        name -> Text,
        department -> Text,
        salary -> Text,
    }
}
