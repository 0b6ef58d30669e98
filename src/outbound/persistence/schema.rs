//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the statements in [`super::setup`] exactly;
//! the server creates its tables on startup rather than shipping separate
//! migrations. Diesel uses them for compile-time query validation and
//! type-safe SQL generation.

diesel::table! {
    /// Managers table.
    ///
    /// Each row may name another manager as its parent, forming the
    /// reporting hierarchy the path resolver walks.
    managers (id) {
        /// Primary key, assigned by the database.
        id -> Int4,
        /// Display name, also the key bulk upload matches on.
        name -> Text,
        /// Contact email, unique across managers.
        email -> Text,
        /// Free-form role title.
        role -> Text,
        /// Parent manager, if any.
        manager_id -> Nullable<Int4>,
    }
}

diesel::table! {
    /// Employees table.
    employees (id) {
        /// Primary key, assigned by the database.
        id -> Int4,
        /// Display name.
        name -> Text,
        /// Contact email, unique across employees.
        email -> Text,
        /// Free-form role title.
        role -> Text,
        /// The employee's manager, if any.
        manager_id -> Nullable<Int4>,
        /// Country of residence.
        country -> Text,
    }
}

diesel::table! {
    /// Annotations table, at most one row per employee.
    ///
    /// Coordinates are nullable as a group: a row with a cleared region
    /// keeps its metadata while all five coordinate columns sit at NULL.
    annotations (id) {
        /// Primary key, assigned by the database.
        id -> Int4,
        /// Owning employee; unique, so writes can upsert on it.
        employee_id -> Int4,
        /// Left edge of the highlight rectangle, in page points.
        x0 -> Nullable<Float8>,
        /// Right edge of the highlight rectangle.
        x1 -> Nullable<Float8>,
        /// Top edge of the highlight rectangle.
        y0 -> Nullable<Float8>,
        /// Bottom edge of the highlight rectangle.
        y1 -> Nullable<Float8>,
        /// Zero-based page index the rectangle sits on.
        page -> Nullable<Int4>,
        /// Text excerpt the rectangle covers.
        snippet -> Nullable<Text>,
        /// Opaque client document stored alongside the region.
        metadata -> Nullable<Jsonb>,
        /// Last write timestamp, maintained in SQL.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(annotations -> employees (employee_id));
diesel::joinable!(employees -> managers (manager_id));

diesel::allow_tables_to_appear_in_same_query!(annotations, employees, managers);
