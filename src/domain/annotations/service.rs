//! Annotations domain service.
//!
//! Implements the annotation driving ports over the annotation and employee
//! repositories. The employee repository supplies existence checks and names
//! for response shaping; all annotation state lives behind
//! [`AnnotationRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::domain::annotations::{RegionSnapshot, RegionWrite};
use crate::domain::ports::{
    AnnotationRepository, AnnotationRepositoryError, AnnotationsCommand, AnnotationsQuery,
    EmployeeRepository, EmployeeRepositoryError,
};
use crate::domain::Error;

/// Annotations service implementing the driving ports.
#[derive(Clone)]
pub struct AnnotationsService<A, E> {
    annotations: Arc<A>,
    employees: Arc<E>,
}

impl<A, E> AnnotationsService<A, E> {
    /// Create a new service with the given repositories.
    pub fn new(annotations: Arc<A>, employees: Arc<E>) -> Self {
        Self {
            annotations,
            employees,
        }
    }
}

impl<A, E> AnnotationsService<A, E>
where
    A: AnnotationRepository,
    E: EmployeeRepository,
{
    fn map_annotation_error(error: AnnotationRepositoryError) -> Error {
        match error {
            AnnotationRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("annotation repository unavailable: {message}"))
            }
            AnnotationRepositoryError::Query { message } => {
                Error::internal(format!("annotation repository error: {message}"))
            }
            AnnotationRepositoryError::EmployeeMissing { employee_id } => {
                Error::not_found("Employee not found").with_details(json!({
                    "employeeId": employee_id,
                }))
            }
        }
    }

    fn map_employee_error(error: EmployeeRepositoryError) -> Error {
        match error {
            EmployeeRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("employee repository unavailable: {message}"))
            }
            EmployeeRepositoryError::Query { message } => {
                Error::internal(format!("employee repository error: {message}"))
            }
            EmployeeRepositoryError::DuplicateEmail { email } => {
                Error::conflict("Email already in use").with_details(json!({ "email": email }))
            }
        }
    }

    async fn require_employee_name(&self, employee_id: i32) -> Result<String, Error> {
        self.employees
            .find(employee_id)
            .await
            .map_err(Self::map_employee_error)?
            .map(|employee| employee.name)
            .ok_or_else(|| Error::not_found("Employee not found"))
    }

    async fn store_region(
        &self,
        employee_id: i32,
        region: RegionWrite,
    ) -> Result<RegionSnapshot, Error> {
        let employee_name = self.require_employee_name(employee_id).await?;
        let record = self
            .annotations
            .upsert_region(employee_id, region)
            .await
            .map_err(Self::map_annotation_error)?;
        Ok(RegionSnapshot {
            employee_id,
            employee_name,
            record,
        })
    }
}

#[async_trait]
impl<A, E> AnnotationsQuery for AnnotationsService<A, E>
where
    A: AnnotationRepository,
    E: EmployeeRepository,
{
    async fn region(&self, employee_id: i32) -> Result<RegionSnapshot, Error> {
        let employee_name = self.require_employee_name(employee_id).await?;
        let record = self
            .annotations
            .find(employee_id)
            .await
            .map_err(Self::map_annotation_error)?
            .unwrap_or_default();
        Ok(RegionSnapshot {
            employee_id,
            employee_name,
            record,
        })
    }

    async fn metadata(&self, employee_id: i32) -> Result<Option<Value>, Error> {
        let record = self
            .annotations
            .find(employee_id)
            .await
            .map_err(Self::map_annotation_error)?;
        Ok(record.and_then(|annotation| annotation.metadata))
    }
}

#[async_trait]
impl<A, E> AnnotationsCommand for AnnotationsService<A, E>
where
    A: AnnotationRepository,
    E: EmployeeRepository,
{
    async fn replace_region(
        &self,
        employee_id: i32,
        region: RegionWrite,
    ) -> Result<RegionSnapshot, Error> {
        self.store_region(employee_id, region).await
    }

    async fn create_region(
        &self,
        employee_id: i32,
        region: RegionWrite,
    ) -> Result<RegionSnapshot, Error> {
        let missing = region.missing_fields();
        if !missing.is_empty() {
            return Err(Error::invalid_request(
                "All coordinates (x0, x1, y0, y1, page) are required for creating annotation",
            )
            .with_details(json!({ "missing": missing })));
        }
        self.store_region(employee_id, region).await
    }

    async fn clear_region(&self, employee_id: i32) -> Result<RegionSnapshot, Error> {
        let employee_name = self.require_employee_name(employee_id).await?;
        let record = self
            .annotations
            .clear_region(employee_id)
            .await
            .map_err(Self::map_annotation_error)?
            .unwrap_or_default();
        Ok(RegionSnapshot {
            employee_id,
            employee_name,
            record,
        })
    }

    async fn save_metadata(&self, employee_id: i32, metadata: Value) -> Result<(), Error> {
        self.annotations
            .upsert_metadata(employee_id, metadata)
            .await
            .map_err(Self::map_annotation_error)
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod service_tests;
