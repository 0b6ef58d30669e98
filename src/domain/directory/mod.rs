//! Managers, employees, and hierarchy resolution.
//!
//! The directory is the relational heart of the service: employees link to
//! managers, managers optionally link to a parent manager, and every read
//! that surfaces a record also surfaces its hierarchy path. Paths are never
//! stored; they are recomputed per request by [`ManagerDirectory`].

pub mod hierarchy;
pub mod service;

pub use hierarchy::ManagerDirectory;
pub use service::DirectoryService;

use crate::domain::annotations::Annotation;

/// Country applied when a record omits one.
pub const DEFAULT_COUNTRY: &str = "India";

/// A stored manager record.
///
/// `manager_id` optionally links to a parent manager, which is what makes
/// hierarchy chains deeper than two levels possible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manager {
    /// Surrogate key.
    pub id: i32,
    /// Display name, also the lookup key used by bulk upload.
    pub name: String,
    /// Unique contact address.
    pub email: String,
    /// Free-form role title.
    pub role: String,
    /// Optional parent manager.
    pub manager_id: Option<i32>,
}

/// A stored employee record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    /// Surrogate key.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Unique contact address.
    pub email: String,
    /// Free-form role title.
    pub role: String,
    /// Direct manager, when assigned.
    pub manager_id: Option<i32>,
    /// Country of residence, defaulting to [`DEFAULT_COUNTRY`].
    pub country: String,
}

/// Fields persisted when inserting or overwriting a manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewManager {
    /// Display name.
    pub name: String,
    /// Unique contact address.
    pub email: String,
    /// Free-form role title.
    pub role: String,
    /// Optional parent manager.
    pub manager_id: Option<i32>,
}

/// Fields persisted when inserting or overwriting an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    /// Display name.
    pub name: String,
    /// Unique contact address.
    pub email: String,
    /// Free-form role title.
    pub role: String,
    /// Direct manager, when assigned.
    pub manager_id: Option<i32>,
    /// Country of residence.
    pub country: String,
}

/// Incoming fields for creating or overwriting a manager.
///
/// Unlike [`NewManager`] this is pre-resolution: the service validates the
/// parent link before anything is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerDraft {
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// Free-form role title.
    pub role: String,
    /// Parent manager to validate and set; `None` keeps the current link.
    pub manager_id: Option<i32>,
}

/// Incoming fields for creating or overwriting an employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDraft {
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// Free-form role title.
    pub role: String,
    /// Manager to validate and set; `None` keeps the current link.
    pub manager_id: Option<i32>,
    /// Country of residence; `None` applies [`DEFAULT_COUNTRY`].
    pub country: Option<String>,
}

/// One record of a bulk upload.
///
/// `path[0]` names the record's manager; deeper elements are ignored because
/// paths are derived from manager links rather than stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRecord {
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// Free-form role title.
    pub role: String,
    /// Country of residence; `None` applies [`DEFAULT_COUNTRY`].
    pub country: Option<String>,
    /// Hierarchy path naming the manager in its first element.
    pub path: Vec<String>,
}

/// Counts reported after a bulk upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadSummary {
    /// Employees inserted by this upload.
    pub employees_created: usize,
    /// Managers created on demand for previously unseen names.
    pub managers_created: usize,
}

/// An employee row joined with its manager's name and annotation record.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeWithContext {
    /// The employee itself.
    pub employee: Employee,
    /// Name of the direct manager, when one is linked.
    pub manager_name: Option<String>,
    /// The employee's annotation row, when one exists.
    pub annotation: Option<Annotation>,
}

/// Highlight-rectangle data derived from a complete bounding box.
///
/// Only complete boxes produce a highlight; partially cleared coordinates
/// yield none rather than a half-formed rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionHighlight {
    /// Zero-based PDF page index.
    pub page: i32,
    /// Left edge of the rectangle.
    pub left: f64,
    /// Top edge of the rectangle.
    pub top: f64,
    /// Rectangle width (`x1 - x0`).
    pub width: f64,
    /// Rectangle height (`y1 - y0`).
    pub height: f64,
    /// Palette colour chosen for this rendering.
    pub color: String,
    /// Stable identifier derived from the employee id.
    pub id: String,
}

/// One `/api/search` hit shaped by the directory service.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRecord {
    /// The matching employee.
    pub employee: Employee,
    /// Name of the direct manager, when one is linked.
    pub manager_name: Option<String>,
    /// Hierarchy path, topmost ancestor first.
    pub path: Vec<String>,
    /// Stored snippet from the employee's annotation, when present.
    pub snippet: Option<String>,
    /// Rendering highlight for a complete bounding box.
    pub highlight: Option<RegionHighlight>,
}

/// One row of the org chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgChartEntry {
    /// The employee itself.
    pub employee: Employee,
    /// Name of the direct manager, when one is linked.
    pub manager_name: Option<String>,
    /// Hierarchy path, topmost ancestor first.
    pub path: Vec<String>,
}
