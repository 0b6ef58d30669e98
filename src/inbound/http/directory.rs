//! Directory HTTP handlers: search, org chart, manager and employee CRUD,
//! and bulk upload.
//!
//! ```text
//! GET /api/search
//! GET /org-chart
//! GET /api/managers
//! POST /api/managers
//! PUT /api/managers/{manager_id}
//! DELETE /api/managers/{manager_id}
//! GET /api/employees
//! GET /api/employees/{employee_id}
//! POST /api/employees
//! PUT /api/employees/{employee_id}
//! DELETE /api/employees/{employee_id}
//! POST /upload/
//! ```

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Error;
use crate::domain::directory::{
    Employee, EmployeeDraft, Manager, ManagerDraft, OrgChartEntry, RegionHighlight, SearchRecord,
    UploadRecord,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require_field, require_field_at};

const FIELD_NAME: FieldName = FieldName::new("name");
const FIELD_EMAIL: FieldName = FieldName::new("email");
const FIELD_ROLE: FieldName = FieldName::new("role");

/// Type marker the viewer expects on every rendering overlay.
const OVERLAY_KIND: &str = "pspdfkit/rectangle/highlight";

#[derive(Debug, Deserialize)]
struct SearchQuery {
    name: Option<String>,
}

/// Manager summary.
#[derive(Debug, Serialize, ToSchema)]
pub struct ManagerDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub manager_id: Option<i32>,
}

impl From<Manager> for ManagerDto {
    fn from(manager: Manager) -> Self {
        Self {
            id: manager.id,
            name: manager.name,
            email: manager.email,
            role: manager.role,
            manager_id: manager.manager_id,
        }
    }
}

/// Employee summary.
#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub manager_id: Option<i32>,
    pub country: String,
}

impl From<Employee> for EmployeeDto {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name,
            email: employee.email,
            role: employee.role,
            manager_id: employee.manager_id,
            country: employee.country,
        }
    }
}

/// Bounding box of a rendering overlay, in page coordinates.
#[derive(Debug, Serialize, ToSchema)]
pub struct BoundingBoxDto {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Rendering overlay emitted for complete bounding boxes.
///
/// This object keeps the viewer contract of the data it feeds: camelCase
/// keys and a `pspdfkit/rectangle/highlight` type marker, unlike the rest of
/// the snake_case API surface.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverlayDto {
    pub page_index: i32,
    pub bounding_box: BoundingBoxDto,
    pub color: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

impl From<RegionHighlight> for OverlayDto {
    fn from(highlight: RegionHighlight) -> Self {
        Self {
            page_index: highlight.page,
            bounding_box: BoundingBoxDto {
                left: highlight.left,
                top: highlight.top,
                width: highlight.width,
                height: highlight.height,
            },
            color: highlight.color,
            kind: OVERLAY_KIND.to_owned(),
            id: highlight.id,
        }
    }
}

/// One row of the search listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct SearchRecordDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub manager_id: Option<i32>,
    pub country: String,
    pub manager_name: Option<String>,
    pub is_manager: bool,
    pub path: Vec<String>,
    pub snippet: Option<String>,
    pub annotation: Option<OverlayDto>,
}

impl From<SearchRecord> for SearchRecordDto {
    fn from(record: SearchRecord) -> Self {
        let SearchRecord {
            employee,
            manager_name,
            path,
            snippet,
            highlight,
        } = record;
        Self {
            id: employee.id,
            name: employee.name,
            email: employee.email,
            role: employee.role,
            manager_id: employee.manager_id,
            country: employee.country,
            manager_name,
            // Rows are always leaf employees; grouping happens client-side.
            is_manager: false,
            path,
            snippet,
            annotation: highlight.map(OverlayDto::from),
        }
    }
}

/// One row of the org chart.
#[derive(Debug, Serialize, ToSchema)]
pub struct OrgChartEntryDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub manager_id: Option<i32>,
    pub country: String,
    pub manager_name: Option<String>,
    pub path: Vec<String>,
}

impl From<OrgChartEntry> for OrgChartEntryDto {
    fn from(entry: OrgChartEntry) -> Self {
        let OrgChartEntry {
            employee,
            manager_name,
            path,
        } = entry;
        Self {
            id: employee.id,
            name: employee.name,
            email: employee.email,
            role: employee.role,
            manager_id: employee.manager_id,
            country: employee.country,
            manager_name,
            path,
        }
    }
}

/// Request payload for creating or updating an employee.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct EmployeePayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub manager_id: Option<i32>,
    pub country: Option<String>,
}

/// Request payload for creating or updating a manager.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct ManagerPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub manager_id: Option<i32>,
}

/// One record of the bulk upload payload.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct UploadItem {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub country: Option<String>,
    #[serde(default)]
    pub path: Vec<String>,
}

/// Managers wrapped the way the dropdown consumer expects.
#[derive(Debug, Serialize, ToSchema)]
pub struct ManagersResponse {
    pub managers: Vec<ManagerDto>,
}

/// Employees wrapped for symmetry with [`ManagersResponse`].
#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeesResponse {
    pub employees: Vec<EmployeeDto>,
}

/// Response payload confirming an employee write.
#[derive(Debug, Serialize, ToSchema)]
pub struct EmployeeMutationDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub manager_id: Option<i32>,
    pub country: String,
    pub message: String,
}

impl EmployeeMutationDto {
    fn new(employee: Employee, message: impl Into<String>) -> Self {
        Self {
            id: employee.id,
            name: employee.name,
            email: employee.email,
            role: employee.role,
            manager_id: employee.manager_id,
            country: employee.country,
            message: message.into(),
        }
    }
}

/// Response payload confirming a manager write.
#[derive(Debug, Serialize, ToSchema)]
pub struct ManagerMutationDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: String,
    pub manager_id: Option<i32>,
    pub message: String,
}

impl ManagerMutationDto {
    fn new(manager: Manager, message: impl Into<String>) -> Self {
        Self {
            id: manager.id,
            name: manager.name,
            email: manager.email,
            role: manager.role,
            manager_id: manager.manager_id,
            message: message.into(),
        }
    }
}

/// Response payload confirming a delete.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedDto {
    pub id: i32,
    pub name: String,
    pub message: String,
}

/// Response payload summarising a bulk upload.
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadedDto {
    pub message: String,
    pub employees_created: usize,
    pub managers_created: usize,
}

fn parse_employee_payload(payload: EmployeePayload) -> Result<EmployeeDraft, Error> {
    Ok(EmployeeDraft {
        name: require_field(payload.name, FIELD_NAME)?,
        email: require_field(payload.email, FIELD_EMAIL)?,
        role: require_field(payload.role, FIELD_ROLE)?,
        manager_id: payload.manager_id,
        country: payload.country,
    })
}

fn parse_manager_payload(payload: ManagerPayload) -> Result<ManagerDraft, Error> {
    Ok(ManagerDraft {
        name: require_field(payload.name, FIELD_NAME)?,
        email: require_field(payload.email, FIELD_EMAIL)?,
        role: require_field(payload.role, FIELD_ROLE)?,
        manager_id: payload.manager_id,
    })
}

fn parse_upload_items(items: Vec<UploadItem>) -> Result<Vec<UploadRecord>, Error> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            Ok(UploadRecord {
                name: require_field_at(item.name, FIELD_NAME, index)?,
                email: require_field_at(item.email, FIELD_EMAIL, index)?,
                role: require_field_at(item.role, FIELD_ROLE, index)?,
                country: item.country,
                path: item.path,
            })
        })
        .collect()
}

/// Search employees by employee or manager name.
#[utoipa::path(
    get,
    path = "/api/search",
    params(
        ("name" = Option<String>, Query, description = "Case-insensitive substring filter")
    ),
    responses(
        (status = 200, description = "Matching employees with hierarchy context", body = [SearchRecordDto]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["directory"],
    operation_id = "searchEmployees"
)]
#[get("/api/search")]
pub async fn search(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<Vec<SearchRecordDto>>> {
    let needle = query.into_inner().name;
    let needle = needle.as_deref().filter(|name| !name.is_empty());
    let records = state.directory.search(needle).await?;
    Ok(web::Json(
        records.into_iter().map(SearchRecordDto::from).collect(),
    ))
}

/// Dump every employee with their resolved reporting chain.
#[utoipa::path(
    get,
    path = "/org-chart",
    responses(
        (status = 200, description = "All employees with hierarchy paths", body = [OrgChartEntryDto]),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["directory"],
    operation_id = "getOrgChart"
)]
#[get("/org-chart")]
pub async fn org_chart(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<OrgChartEntryDto>>> {
    let entries = state.directory.org_chart().await?;
    Ok(web::Json(
        entries.into_iter().map(OrgChartEntryDto::from).collect(),
    ))
}

/// List all managers.
#[utoipa::path(
    get,
    path = "/api/managers",
    responses(
        (status = 200, description = "All managers", body = ManagersResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["managers"],
    operation_id = "listManagers"
)]
#[get("/api/managers")]
pub async fn list_managers(state: web::Data<HttpState>) -> ApiResult<web::Json<ManagersResponse>> {
    let managers = state.directory.list_managers().await?;
    Ok(web::Json(ManagersResponse {
        managers: managers.into_iter().map(ManagerDto::from).collect(),
    }))
}

/// Create a manager.
#[utoipa::path(
    post,
    path = "/api/managers",
    request_body = ManagerPayload,
    responses(
        (status = 200, description = "Manager created", body = ManagerMutationDto),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Parent manager not found", body = ErrorSchema),
        (status = 409, description = "Email already in use", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["managers"],
    operation_id = "createManager"
)]
#[post("/api/managers")]
pub async fn create_manager(
    state: web::Data<HttpState>,
    payload: web::Json<ManagerPayload>,
) -> ApiResult<web::Json<ManagerMutationDto>> {
    let draft = parse_manager_payload(payload.into_inner())?;
    let manager = state.directory_command.create_manager(draft).await?;
    Ok(web::Json(ManagerMutationDto::new(
        manager,
        "Manager created successfully",
    )))
}

/// Overwrite a manager's fields.
#[utoipa::path(
    put,
    path = "/api/managers/{manager_id}",
    request_body = ManagerPayload,
    params(
        ("manager_id" = i32, Path, description = "Manager identifier")
    ),
    responses(
        (status = 200, description = "Manager updated", body = ManagerMutationDto),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Manager not found", body = ErrorSchema),
        (status = 409, description = "Email already in use", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["managers"],
    operation_id = "updateManager"
)]
#[put("/api/managers/{manager_id}")]
pub async fn update_manager(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<ManagerPayload>,
) -> ApiResult<web::Json<ManagerMutationDto>> {
    let manager_id = path.into_inner();
    let draft = parse_manager_payload(payload.into_inner())?;
    let manager = state
        .directory_command
        .update_manager(manager_id, draft)
        .await?;
    Ok(web::Json(ManagerMutationDto::new(
        manager,
        "Manager updated successfully",
    )))
}

/// Delete a manager with no remaining reports.
#[utoipa::path(
    delete,
    path = "/api/managers/{manager_id}",
    params(
        ("manager_id" = i32, Path, description = "Manager identifier")
    ),
    responses(
        (status = 200, description = "Manager deleted", body = DeletedDto),
        (status = 404, description = "Manager not found", body = ErrorSchema),
        (status = 409, description = "Manager still has direct reports", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["managers"],
    operation_id = "deleteManager"
)]
#[delete("/api/managers/{manager_id}")]
pub async fn delete_manager(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<DeletedDto>> {
    let manager_id = path.into_inner();
    let manager = state.directory_command.delete_manager(manager_id).await?;
    let message = format!("Manager {} deleted successfully", manager.name);
    Ok(web::Json(DeletedDto {
        id: manager.id,
        name: manager.name,
        message,
    }))
}

/// List all employees.
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees", body = EmployeesResponse),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "listEmployees"
)]
#[get("/api/employees")]
pub async fn list_employees(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<EmployeesResponse>> {
    let employees = state.directory.list_employees().await?;
    Ok(web::Json(EmployeesResponse {
        employees: employees.into_iter().map(EmployeeDto::from).collect(),
    }))
}

/// Fetch a single employee.
#[utoipa::path(
    get,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id" = i32, Path, description = "Employee identifier")
    ),
    responses(
        (status = 200, description = "The employee", body = EmployeeDto),
        (status = 404, description = "Employee not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "getEmployee"
)]
#[get("/api/employees/{employee_id}")]
pub async fn get_employee(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<EmployeeDto>> {
    let employee_id = path.into_inner();
    let employee = state.directory.find_employee(employee_id).await?;
    Ok(web::Json(EmployeeDto::from(employee)))
}

/// Create an employee.
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = EmployeePayload,
    responses(
        (status = 200, description = "Employee created", body = EmployeeMutationDto),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Manager not found", body = ErrorSchema),
        (status = 409, description = "Email already in use", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "createEmployee"
)]
#[post("/api/employees")]
pub async fn create_employee(
    state: web::Data<HttpState>,
    payload: web::Json<EmployeePayload>,
) -> ApiResult<web::Json<EmployeeMutationDto>> {
    let draft = parse_employee_payload(payload.into_inner())?;
    let employee = state.directory_command.create_employee(draft).await?;
    Ok(web::Json(EmployeeMutationDto::new(
        employee,
        "Employee created successfully",
    )))
}

/// Overwrite an employee's fields.
#[utoipa::path(
    put,
    path = "/api/employees/{employee_id}",
    request_body = EmployeePayload,
    params(
        ("employee_id" = i32, Path, description = "Employee identifier")
    ),
    responses(
        (status = 200, description = "Employee updated", body = EmployeeMutationDto),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Employee or manager not found", body = ErrorSchema),
        (status = 409, description = "Email already in use", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "updateEmployee"
)]
#[put("/api/employees/{employee_id}")]
pub async fn update_employee(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<EmployeePayload>,
) -> ApiResult<web::Json<EmployeeMutationDto>> {
    let employee_id = path.into_inner();
    let draft = parse_employee_payload(payload.into_inner())?;
    let employee = state
        .directory_command
        .update_employee(employee_id, draft)
        .await?;
    Ok(web::Json(EmployeeMutationDto::new(
        employee,
        "Employee updated successfully",
    )))
}

/// Delete an employee, cascading their annotation row.
#[utoipa::path(
    delete,
    path = "/api/employees/{employee_id}",
    params(
        ("employee_id" = i32, Path, description = "Employee identifier")
    ),
    responses(
        (status = 200, description = "Employee deleted", body = DeletedDto),
        (status = 404, description = "Employee not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["employees"],
    operation_id = "deleteEmployee"
)]
#[delete("/api/employees/{employee_id}")]
pub async fn delete_employee(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<DeletedDto>> {
    let employee_id = path.into_inner();
    let employee = state.directory_command.delete_employee(employee_id).await?;
    let message = format!("Employee {} deleted successfully", employee.name);
    Ok(web::Json(DeletedDto {
        id: employee.id,
        name: employee.name,
        message,
    }))
}

/// Bulk-create employees, creating referenced managers on demand.
#[utoipa::path(
    post,
    path = "/upload/",
    request_body = Vec<UploadItem>,
    responses(
        (status = 200, description = "Upload applied", body = UploadedDto),
        (status = 400, description = "Invalid record", body = ErrorSchema),
        (status = 409, description = "Email already in use", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["directory"],
    operation_id = "uploadEmployees"
)]
#[post("/upload/")]
pub async fn upload(
    state: web::Data<HttpState>,
    payload: web::Json<Vec<UploadItem>>,
) -> ApiResult<web::Json<UploadedDto>> {
    let records = parse_upload_items(payload.into_inner())?;
    let summary = state.directory_command.upload(records).await?;
    Ok(web::Json(UploadedDto {
        message: "Data uploaded successfully".to_owned(),
        employees_created: summary.employees_created,
        managers_created: summary.managers_created,
    }))
}

#[cfg(test)]
#[path = "directory_tests.rs"]
mod tests;
