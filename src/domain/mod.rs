//! Domain entities, services, and ports.
//!
//! Purpose: keep every business rule of the directory transport-agnostic.
//! Inbound adapters translate HTTP into calls on the driving ports defined
//! under [`ports`]; outbound adapters implement the driven ports over
//! PostgreSQL. Types here document their invariants and serialisation
//! contracts in Rustdoc.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: transport-agnostic error envelope.
//! - [`TraceId`](trace_id::TraceId): request-scoped correlation id.
//! - [`directory`]: managers, employees, hierarchy paths, bulk upload.
//! - [`annotations`]: per-employee bounding boxes and opaque metadata.

pub mod annotations;
pub mod directory;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::TraceId;

/// Response header carrying the request's trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use orgdir::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("nobody here"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
