//! Startup wiring for settings and database preparation.

mod config;
mod startup;

pub use config::AppSettings;
pub use startup::{StartupError, prepare_database};
