//! HTTP inbound adapter exposing REST endpoints.

pub mod annotations;
pub mod directory;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod validation;

pub use crate::domain::ApiResult;
