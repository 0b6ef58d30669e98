//! Driving port for annotation queries.
//!
//! Inbound adapters use this port to read an employee's highlight region and
//! stored metadata document without importing outbound persistence concerns.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::annotations::RegionSnapshot;
use crate::domain::Error;

/// Domain use-case port for reading annotations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnnotationsQuery: Send + Sync {
    /// Fetch an employee's annotation state.
    ///
    /// An employee who has never been annotated yields a snapshot with an
    /// empty record rather than an error.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no employee exists with the given id.
    async fn region(&self, employee_id: i32) -> Result<RegionSnapshot, Error>;

    /// Fetch the metadata document stored for an employee.
    ///
    /// Returns `None` when the employee has no stored metadata. The employee
    /// itself is not checked; absent employees read as absent metadata.
    async fn metadata(&self, employee_id: i32) -> Result<Option<Value>, Error>;
}
