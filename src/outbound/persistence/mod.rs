//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the repository ports, backed by PostgreSQL
//! through `diesel-async` with `bb8` connection pooling.
//!
//! The adapters stay thin: they translate between Diesel rows and domain
//! types and map database errors onto the port error variants. Row structs
//! (`models`) and table definitions (`schema`) never leave this module.

mod diesel_annotation_repository;
mod diesel_employee_repository;
pub(crate) mod diesel_helpers;
mod diesel_manager_repository;
mod models;
mod pool;
mod schema;
mod setup;

pub use diesel_annotation_repository::DieselAnnotationRepository;
pub use diesel_employee_repository::DieselEmployeeRepository;
pub use diesel_manager_repository::DieselManagerRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
pub use setup::{SchemaError, ensure_schema, reset_schema};
