//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use diesel::prelude::*;
use serde_json::Value;

use crate::domain::annotations::Annotation;

use super::schema::{annotations, employees, managers};

/// Row struct for reading from the managers table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = managers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ManagerRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub manager_id: Option<i32>,
}

/// Insertable struct for creating manager records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = managers)]
pub(crate) struct NewManagerRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
    pub manager_id: Option<i32>,
}

/// Changeset struct for overwriting manager records.
///
/// `treat_none_as_null` makes an absent parent clear the column instead of
/// leaving the old value behind.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = managers)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ManagerUpdate<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
    pub manager_id: Option<i32>,
}

/// Row struct for reading from the employees table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = employees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EmployeeRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub manager_id: Option<i32>,
    pub country: String,
}

/// Insertable struct for creating employee records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = employees)]
pub(crate) struct NewEmployeeRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
    pub manager_id: Option<i32>,
    pub country: &'a str,
}

/// Changeset struct for overwriting employee records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = employees)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct EmployeeUpdate<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
    pub manager_id: Option<i32>,
    pub country: &'a str,
}

/// Row struct for reading annotation state, minus bookkeeping columns.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = annotations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AnnotationRow {
    pub x0: Option<f64>,
    pub x1: Option<f64>,
    pub y0: Option<f64>,
    pub y1: Option<f64>,
    pub page: Option<i32>,
    pub snippet: Option<String>,
    pub metadata: Option<Value>,
}

// Shared by the annotation adapter and the employee search join.
impl From<AnnotationRow> for Annotation {
    fn from(row: AnnotationRow) -> Self {
        Self {
            x0: row.x0,
            x1: row.x1,
            y0: row.y0,
            y1: row.y1,
            page: row.page,
            snippet: row.snippet,
            metadata: row.metadata,
        }
    }
}

/// Insertable struct for the region half of an annotation upsert.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = annotations)]
pub(crate) struct NewRegionRow<'a> {
    pub employee_id: i32,
    pub x0: Option<f64>,
    pub x1: Option<f64>,
    pub y0: Option<f64>,
    pub y1: Option<f64>,
    pub page: Option<i32>,
    pub snippet: Option<&'a str>,
}

/// Changeset struct replacing a stored region wholesale.
///
/// Metadata is not part of the changeset, so region writes leave it
/// untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = annotations)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct RegionUpdate<'a> {
    pub x0: Option<f64>,
    pub x1: Option<f64>,
    pub y0: Option<f64>,
    pub y1: Option<f64>,
    pub page: Option<i32>,
    pub snippet: Option<&'a str>,
}

/// Insertable struct for the metadata half of an annotation upsert.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = annotations)]
pub(crate) struct NewMetadataRow<'a> {
    pub employee_id: i32,
    pub metadata: &'a Value,
}
