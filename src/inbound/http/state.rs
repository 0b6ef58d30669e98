//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AnnotationsCommand, AnnotationsQuery, DirectoryCommand, DirectoryQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub directory: Arc<dyn DirectoryQuery>,
    pub directory_command: Arc<dyn DirectoryCommand>,
    pub annotations: Arc<dyn AnnotationsQuery>,
    pub annotations_command: Arc<dyn AnnotationsCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub directory: Arc<dyn DirectoryQuery>,
    pub directory_command: Arc<dyn DirectoryCommand>,
    pub annotations: Arc<dyn AnnotationsQuery>,
    pub annotations_command: Arc<dyn AnnotationsCommand>,
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use orgdir::domain::annotations::AnnotationsService;
    /// use orgdir::domain::directory::DirectoryService;
    /// use orgdir::domain::ports::{
    ///     FixtureAnnotationRepository, FixtureEmployeeRepository, FixtureManagerRepository,
    /// };
    /// use orgdir::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let directory = Arc::new(DirectoryService::new(
    ///     Arc::new(FixtureManagerRepository),
    ///     Arc::new(FixtureEmployeeRepository),
    /// ));
    /// let annotations = Arc::new(AnnotationsService::new(
    ///     Arc::new(FixtureAnnotationRepository),
    ///     Arc::new(FixtureEmployeeRepository),
    /// ));
    /// let state = HttpState::new(HttpStatePorts {
    ///     directory: directory.clone(),
    ///     directory_command: directory,
    ///     annotations: annotations.clone(),
    ///     annotations_command: annotations,
    /// });
    /// let _directory = state.directory.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            directory,
            directory_command,
            annotations,
            annotations_command,
        } = ports;
        Self {
            directory,
            directory_command,
            annotations,
            annotations_command,
        }
    }
}
