//! Employee/manager directory service with PDF region annotations.
//!
//! A thin HTTP facade over PostgreSQL. Hexagonal ports keep the handlers
//! transport-only: domain services own hierarchy resolution and annotation
//! semantics, diesel adapters own the SQL, and composition in [`server`]
//! decides whether requests hit the database or fixture data.

pub mod bootstrap;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::trace::Trace;
