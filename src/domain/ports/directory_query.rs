//! Driving port for directory queries.
//!
//! Inbound adapters (HTTP handlers) use this port to fetch search results,
//! the org chart, and raw directory listings without importing outbound
//! persistence concerns.

use async_trait::async_trait;

use crate::domain::directory::{Employee, Manager, OrgChartEntry, SearchRecord};
use crate::domain::Error;

/// Domain use-case port for reading the directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryQuery: Send + Sync {
    /// Employees with manager context, hierarchy path, and viewer overlay.
    ///
    /// When `filter` is present, restricts results to employees whose own
    /// name or manager's name contains the needle, case-insensitively.
    async fn search<'a>(&self, filter: Option<&'a str>) -> Result<Vec<SearchRecord>, Error>;

    /// Every employee with their resolved reporting chain.
    async fn org_chart(&self) -> Result<Vec<OrgChartEntry>, Error>;

    /// Every manager, ordered by id.
    async fn list_managers(&self) -> Result<Vec<Manager>, Error>;

    /// Every employee, ordered by id.
    async fn list_employees(&self) -> Result<Vec<Employee>, Error>;

    /// Fetch a single employee.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no employee exists with the given id.
    async fn find_employee(&self, id: i32) -> Result<Employee, Error>;
}
