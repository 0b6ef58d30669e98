//! Builders for the HTTP state ports.

use std::sync::Arc;

use actix_web::web;

use crate::domain::annotations::AnnotationsService;
use crate::domain::directory::DirectoryService;
use crate::domain::ports::{
    AnnotationRepository, EmployeeRepository, FixtureAnnotationRepository,
    FixtureEmployeeRepository, FixtureManagerRepository, ManagerRepository,
};
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::persistence::{
    DieselAnnotationRepository, DieselEmployeeRepository, DieselManagerRepository,
};

use super::ServerConfig;

/// Wire the directory and annotation services over a repository set and wrap
/// them as shared HTTP state.
///
/// Each service implements both its command and query port, so one instance
/// backs both `Arc` slots.
fn assemble_state<M, E, A>(
    managers: Arc<M>,
    employees: Arc<E>,
    annotations: Arc<A>,
) -> web::Data<HttpState>
where
    M: ManagerRepository + 'static,
    E: EmployeeRepository + 'static,
    A: AnnotationRepository + 'static,
{
    let directory = Arc::new(DirectoryService::new(managers, employees.clone()));
    let annotations = Arc::new(AnnotationsService::new(annotations, employees));
    web::Data::new(HttpState::new(HttpStatePorts {
        directory: directory.clone(),
        directory_command: directory,
        annotations: annotations.clone(),
        annotations_command: annotations,
    }))
}

/// Build HTTP state over database-backed repositories when a pool is
/// available, otherwise over fixture implementations.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    match &config.db_pool {
        Some(pool) => assemble_state(
            Arc::new(DieselManagerRepository::new(pool.clone())),
            Arc::new(DieselEmployeeRepository::new(pool.clone())),
            Arc::new(DieselAnnotationRepository::new(pool.clone())),
        ),
        None => assemble_state(
            Arc::new(FixtureManagerRepository),
            Arc::new(FixtureEmployeeRepository),
            Arc::new(FixtureAnnotationRepository),
        ),
    }
}
