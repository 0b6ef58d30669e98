//! Annotation HTTP handlers.
//!
//! ```text
//! GET /employee/{employee_id}/annotation
//! PUT /employee/{employee_id}/annotation
//! POST /employee/{employee_id}/annotation
//! DELETE /employee/{employee_id}/annotation
//! POST /api/annotations/save
//! GET /api/annotations/get/{employee_id}
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::annotations::{Annotation, RegionSnapshot, RegionWrite};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require_field};

const FIELD_EMPLOYEE_ID: FieldName = FieldName::new("employee_id");
const FIELD_ANNOTATIONS: FieldName = FieldName::new("annotations");

/// Request payload carrying the five region coordinates plus snippet.
///
/// Every field is optional: `PUT` stores whatever is given (nulls clear),
/// while `POST` insists on a complete coordinate set.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct RegionPayload {
    pub x0: Option<f64>,
    pub x1: Option<f64>,
    pub y0: Option<f64>,
    pub y1: Option<f64>,
    pub page: Option<i32>,
    pub snippet: Option<String>,
}

impl From<RegionPayload> for RegionWrite {
    fn from(payload: RegionPayload) -> Self {
        Self {
            x0: payload.x0,
            x1: payload.x1,
            y0: payload.y0,
            y1: payload.y1,
            page: payload.page,
            snippet: payload.snippet,
        }
    }
}

/// Stored coordinate set, including the extracted snippet.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegionDto {
    pub x0: Option<f64>,
    pub x1: Option<f64>,
    pub y0: Option<f64>,
    pub y1: Option<f64>,
    pub page: Option<i32>,
    pub snippet: Option<String>,
}

impl From<&Annotation> for RegionDto {
    fn from(record: &Annotation) -> Self {
        Self {
            x0: record.x0,
            x1: record.x1,
            y0: record.y0,
            y1: record.y1,
            page: record.page,
            snippet: record.snippet.clone(),
        }
    }
}

/// Annotation status for one employee.
///
/// `coordinates` is populated only when the stored region is complete.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnnotationStatusDto {
    pub employee_id: i32,
    pub employee_name: String,
    pub has_annotation: bool,
    pub coordinates: Option<RegionDto>,
}

impl From<RegionSnapshot> for AnnotationStatusDto {
    fn from(snapshot: RegionSnapshot) -> Self {
        let has_annotation = snapshot.record.has_region();
        Self {
            employee_id: snapshot.employee_id,
            employee_name: snapshot.employee_name,
            has_annotation,
            coordinates: has_annotation.then(|| RegionDto::from(&snapshot.record)),
        }
    }
}

/// Coordinate echo embedded in region mutation responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct CoordinatesDto {
    pub x0: Option<f64>,
    pub x1: Option<f64>,
    pub y0: Option<f64>,
    pub y1: Option<f64>,
    pub page: Option<i32>,
}

/// Response payload confirming a region write.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegionMutationDto {
    pub message: String,
    pub employee_id: i32,
    pub employee_name: String,
    pub coordinates: CoordinatesDto,
    pub snippet: Option<String>,
}

impl RegionMutationDto {
    fn new(message: impl Into<String>, snapshot: RegionSnapshot) -> Self {
        Self {
            message: message.into(),
            employee_id: snapshot.employee_id,
            employee_name: snapshot.employee_name,
            coordinates: CoordinatesDto {
                x0: snapshot.record.x0,
                x1: snapshot.record.x1,
                y0: snapshot.record.y0,
                y1: snapshot.record.y1,
                page: snapshot.record.page,
            },
            snippet: snapshot.record.snippet,
        }
    }
}

/// Response payload confirming a region clear.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegionClearedDto {
    pub message: String,
    pub employee_id: i32,
    pub employee_name: String,
}

/// Request payload for storing a metadata document.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct MetadataSaveRequest {
    pub employee_id: Option<i32>,
    pub annotations: Option<Value>,
}

/// Response payload confirming a metadata save.
#[derive(Debug, Serialize, ToSchema)]
pub struct MetadataSavedDto {
    pub status: String,
    pub message: String,
}

/// Wrapper around the stored metadata document.
#[derive(Debug, Serialize, ToSchema)]
pub struct MetadataDto {
    pub annotations: Option<Value>,
}

fn parse_metadata_request(payload: MetadataSaveRequest) -> Result<(i32, Value), Error> {
    let employee_id = require_field(payload.employee_id, FIELD_EMPLOYEE_ID)?;
    let annotations = require_field(payload.annotations, FIELD_ANNOTATIONS)?;
    Ok((employee_id, annotations))
}

/// Read the stored region annotation for an employee.
#[utoipa::path(
    get,
    path = "/employee/{employee_id}/annotation",
    params(
        ("employee_id" = i32, Path, description = "Employee identifier")
    ),
    responses(
        (status = 200, description = "Annotation status", body = AnnotationStatusDto),
        (status = 404, description = "Employee not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["annotations"],
    operation_id = "getEmployeeAnnotation"
)]
#[get("/employee/{employee_id}/annotation")]
pub async fn get_annotation(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<AnnotationStatusDto>> {
    let employee_id = path.into_inner();
    let snapshot = state.annotations.region(employee_id).await?;
    Ok(web::Json(AnnotationStatusDto::from(snapshot)))
}

/// Replace the region annotation, treating nulls as clears.
#[utoipa::path(
    put,
    path = "/employee/{employee_id}/annotation",
    request_body = RegionPayload,
    params(
        ("employee_id" = i32, Path, description = "Employee identifier")
    ),
    responses(
        (status = 200, description = "Region stored", body = RegionMutationDto),
        (status = 404, description = "Employee not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["annotations"],
    operation_id = "replaceEmployeeAnnotation"
)]
#[put("/employee/{employee_id}/annotation")]
pub async fn replace_annotation(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<RegionPayload>,
) -> ApiResult<web::Json<RegionMutationDto>> {
    let employee_id = path.into_inner();
    let payload = payload.into_inner();
    let action = if payload.x0.is_none() { "cleared" } else { "updated" };
    let snapshot = state
        .annotations_command
        .replace_region(employee_id, payload.into())
        .await?;
    Ok(web::Json(RegionMutationDto::new(
        format!("Annotation {action} successfully"),
        snapshot,
    )))
}

/// Create a region annotation, rejecting incomplete coordinate sets.
#[utoipa::path(
    post,
    path = "/employee/{employee_id}/annotation",
    request_body = RegionPayload,
    params(
        ("employee_id" = i32, Path, description = "Employee identifier")
    ),
    responses(
        (status = 200, description = "Region stored", body = RegionMutationDto),
        (status = 400, description = "Incomplete coordinates", body = ErrorSchema),
        (status = 404, description = "Employee not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["annotations"],
    operation_id = "createEmployeeAnnotation"
)]
#[post("/employee/{employee_id}/annotation")]
pub async fn create_annotation(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<RegionPayload>,
) -> ApiResult<web::Json<RegionMutationDto>> {
    let employee_id = path.into_inner();
    let snapshot = state
        .annotations_command
        .create_region(employee_id, payload.into_inner().into())
        .await?;
    Ok(web::Json(RegionMutationDto::new(
        "Annotation created successfully",
        snapshot,
    )))
}

/// Null out the region annotation, keeping snippet and metadata.
#[utoipa::path(
    delete,
    path = "/employee/{employee_id}/annotation",
    params(
        ("employee_id" = i32, Path, description = "Employee identifier")
    ),
    responses(
        (status = 200, description = "Region cleared", body = RegionClearedDto),
        (status = 404, description = "Employee not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["annotations"],
    operation_id = "deleteEmployeeAnnotation"
)]
#[delete("/employee/{employee_id}/annotation")]
pub async fn delete_annotation(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<RegionClearedDto>> {
    let employee_id = path.into_inner();
    let snapshot = state.annotations_command.clear_region(employee_id).await?;
    Ok(web::Json(RegionClearedDto {
        message: "Annotation deleted successfully".to_owned(),
        employee_id: snapshot.employee_id,
        employee_name: snapshot.employee_name,
    }))
}

/// Store an opaque metadata document for an employee.
#[utoipa::path(
    post,
    path = "/api/annotations/save",
    request_body = MetadataSaveRequest,
    responses(
        (status = 200, description = "Metadata stored", body = MetadataSavedDto),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Employee not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["annotations"],
    operation_id = "saveAnnotationMetadata"
)]
#[post("/api/annotations/save")]
pub async fn save_metadata(
    state: web::Data<HttpState>,
    payload: web::Json<MetadataSaveRequest>,
) -> ApiResult<web::Json<MetadataSavedDto>> {
    let (employee_id, annotations) = parse_metadata_request(payload.into_inner())?;
    state
        .annotations_command
        .save_metadata(employee_id, annotations)
        .await?;
    Ok(web::Json(MetadataSavedDto {
        status: "success".to_owned(),
        message: "Annotations saved successfully".to_owned(),
    }))
}

/// Read the stored metadata document, degrading to null on any failure.
#[utoipa::path(
    get,
    path = "/api/annotations/get/{employee_id}",
    params(
        ("employee_id" = i32, Path, description = "Employee identifier")
    ),
    responses(
        (status = 200, description = "Stored metadata, or null when absent", body = MetadataDto)
    ),
    tags = ["annotations"],
    operation_id = "getAnnotationMetadata"
)]
#[get("/api/annotations/get/{employee_id}")]
pub async fn get_metadata(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> web::Json<MetadataDto> {
    let employee_id = path.into_inner();
    let annotations = match state.annotations.metadata(employee_id).await {
        Ok(stored) => stored,
        Err(err) => {
            warn!(employee_id, error = %err, "metadata read failed; returning null");
            None
        }
    };
    web::Json(MetadataDto { annotations })
}

#[cfg(test)]
#[path = "annotations_tests.rs"]
mod tests;
