//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod annotation_repository;
mod annotations_command;
mod annotations_query;
mod directory_command;
mod directory_query;
mod employee_repository;
mod manager_repository;

#[cfg(test)]
pub use annotation_repository::MockAnnotationRepository;
pub use annotation_repository::{
    AnnotationRepository, AnnotationRepositoryError, FixtureAnnotationRepository,
};
#[cfg(test)]
pub use annotations_command::MockAnnotationsCommand;
pub use annotations_command::AnnotationsCommand;
#[cfg(test)]
pub use annotations_query::MockAnnotationsQuery;
pub use annotations_query::AnnotationsQuery;
#[cfg(test)]
pub use directory_command::MockDirectoryCommand;
pub use directory_command::DirectoryCommand;
#[cfg(test)]
pub use directory_query::MockDirectoryQuery;
pub use directory_query::DirectoryQuery;
#[cfg(test)]
pub use employee_repository::MockEmployeeRepository;
pub use employee_repository::{
    EmployeeRepository, EmployeeRepositoryError, FixtureEmployeeRepository,
};
#[cfg(test)]
pub use manager_repository::MockManagerRepository;
pub use manager_repository::{
    FixtureManagerRepository, ManagerRepository, ManagerRepositoryError,
};
