//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (directory,
//!   managers, employees, annotations, health)
//! - **Schemas**: Request and response DTOs plus the domain error wrappers
//!   ([`ErrorSchema`], [`ErrorCodeSchema`]) that provide OpenAPI definitions
//!   without coupling domain types to the utoipa framework
//!
//! The generated specification is served by Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::inbound::http::annotations::{
    AnnotationStatusDto, CoordinatesDto, MetadataDto, MetadataSaveRequest, MetadataSavedDto,
    RegionClearedDto, RegionDto, RegionMutationDto, RegionPayload,
};
use crate::inbound::http::directory::{
    BoundingBoxDto, DeletedDto, EmployeeDto, EmployeeMutationDto, EmployeePayload,
    EmployeesResponse, ManagerDto, ManagerMutationDto, ManagerPayload, ManagersResponse,
    OrgChartEntryDto, OverlayDto, SearchRecordDto, UploadItem, UploadedDto,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Organisation directory API",
        description = "HTTP interface for the employee directory, hierarchy views, and PDF region annotations.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::directory::search,
        crate::inbound::http::directory::org_chart,
        crate::inbound::http::directory::list_managers,
        crate::inbound::http::directory::create_manager,
        crate::inbound::http::directory::update_manager,
        crate::inbound::http::directory::delete_manager,
        crate::inbound::http::directory::list_employees,
        crate::inbound::http::directory::get_employee,
        crate::inbound::http::directory::create_employee,
        crate::inbound::http::directory::update_employee,
        crate::inbound::http::directory::delete_employee,
        crate::inbound::http::directory::upload,
        crate::inbound::http::annotations::get_annotation,
        crate::inbound::http::annotations::replace_annotation,
        crate::inbound::http::annotations::create_annotation,
        crate::inbound::http::annotations::delete_annotation,
        crate::inbound::http::annotations::save_metadata,
        crate::inbound::http::annotations::get_metadata,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        ManagerDto,
        EmployeeDto,
        BoundingBoxDto,
        OverlayDto,
        SearchRecordDto,
        OrgChartEntryDto,
        EmployeePayload,
        ManagerPayload,
        UploadItem,
        ManagersResponse,
        EmployeesResponse,
        EmployeeMutationDto,
        ManagerMutationDto,
        DeletedDto,
        UploadedDto,
        RegionPayload,
        RegionDto,
        AnnotationStatusDto,
        CoordinatesDto,
        RegionMutationDto,
        RegionClearedDto,
        MetadataSaveRequest,
        MetadataSavedDto,
        MetadataDto,
    )),
    tags(
        (name = "directory", description = "Search and hierarchy views"),
        (name = "managers", description = "Manager CRUD"),
        (name = "employees", description = "Employee CRUD and bulk upload"),
        (name = "annotations", description = "PDF region annotations and viewer metadata"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
