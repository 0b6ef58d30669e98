//! Port for annotation persistence.
//!
//! Each employee holds at most one annotation row carrying a rectangular
//! highlight region and an opaque metadata document. The
//! [`AnnotationRepository`] trait exposes the upsert-style writes the
//! annotation endpoints rely on.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::annotations::{Annotation, RegionWrite};

use super::define_port_error;

define_port_error! {
    /// Errors raised by annotation repository adapters.
    pub enum AnnotationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "annotation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "annotation repository query failed: {message}",
        /// The referenced employee does not exist.
        EmployeeMissing { employee_id: i32 } =>
            "no employee {employee_id} to annotate",
    }
}

/// Port for annotation storage keyed by employee.
///
/// Writes follow upsert semantics so callers never need to distinguish
/// between first-time annotation and replacement. Adapters surface a missing
/// employee through [`AnnotationRepositoryError::EmployeeMissing`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnnotationRepository: Send + Sync {
    /// Fetch the annotation stored for an employee.
    ///
    /// Returns `None` when the employee has never been annotated.
    async fn find(&self, employee_id: i32)
        -> Result<Option<Annotation>, AnnotationRepositoryError>;

    /// Store a highlight region, replacing any previous coordinates.
    ///
    /// Creates the annotation row when absent. Stored metadata survives the
    /// write untouched.
    async fn upsert_region(
        &self,
        employee_id: i32,
        region: RegionWrite,
    ) -> Result<Annotation, AnnotationRepositoryError>;

    /// Null out the highlight region while keeping snippet and metadata.
    ///
    /// Returns `None` when the employee has never been annotated.
    async fn clear_region(
        &self,
        employee_id: i32,
    ) -> Result<Option<Annotation>, AnnotationRepositoryError>;

    /// Store a metadata document, replacing any previous one.
    ///
    /// Creates the annotation row when absent. Stored coordinates survive
    /// the write untouched.
    async fn upsert_metadata(
        &self,
        employee_id: i32,
        metadata: Value,
    ) -> Result<(), AnnotationRepositoryError>;
}

/// Fixture implementation for running without a real database.
///
/// Reads return nothing and writes silently succeed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAnnotationRepository;

#[async_trait]
impl AnnotationRepository for FixtureAnnotationRepository {
    async fn find(
        &self,
        _employee_id: i32,
    ) -> Result<Option<Annotation>, AnnotationRepositoryError> {
        Ok(None)
    }

    async fn upsert_region(
        &self,
        _employee_id: i32,
        region: RegionWrite,
    ) -> Result<Annotation, AnnotationRepositoryError> {
        Ok(Annotation {
            x0: region.x0,
            x1: region.x1,
            y0: region.y0,
            y1: region.y1,
            page: region.page,
            snippet: region.snippet,
            metadata: None,
        })
    }

    async fn clear_region(
        &self,
        _employee_id: i32,
    ) -> Result<Option<Annotation>, AnnotationRepositoryError> {
        Ok(None)
    }

    async fn upsert_metadata(
        &self,
        _employee_id: i32,
        _metadata: Value,
    ) -> Result<(), AnnotationRepositoryError> {
        Ok(())
    }
}
