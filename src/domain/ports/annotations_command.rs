//! Driving port for annotation mutations.
//!
//! The [`AnnotationsCommand`] trait defines the inbound contract for writing
//! highlight regions and metadata documents against an employee record.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::annotations::{RegionSnapshot, RegionWrite};
use crate::domain::Error;

/// Driving port for annotation mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnnotationsCommand: Send + Sync {
    /// Store a highlight region, replacing any previous coordinates.
    ///
    /// Partial coordinate sets are stored as given; callers wanting
    /// all-or-nothing semantics use [`Self::create_region`].
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no employee exists with the given id.
    async fn replace_region(
        &self,
        employee_id: i32,
        region: RegionWrite,
    ) -> Result<RegionSnapshot, Error>;

    /// Store a complete highlight region, rejecting partial coordinates.
    ///
    /// # Errors
    ///
    /// Returns an invalid-request error naming the missing fields when any
    /// of the five coordinates is absent, and a not-found error when no
    /// employee exists with the given id. Nothing is stored on rejection.
    async fn create_region(
        &self,
        employee_id: i32,
        region: RegionWrite,
    ) -> Result<RegionSnapshot, Error>;

    /// Null out an employee's highlight region.
    ///
    /// Snippet and metadata survive the clear. Clearing an employee who was
    /// never annotated succeeds and reports an empty record.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no employee exists with the given id.
    async fn clear_region(&self, employee_id: i32) -> Result<RegionSnapshot, Error>;

    /// Store a metadata document, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no employee exists with the given id.
    async fn save_metadata(&self, employee_id: i32, metadata: Value) -> Result<(), Error>;
}
