//! Schema bootstrap executed at startup.
//!
//! The server owns its schema: tables are created on boot with idempotent
//! DDL instead of a separate migration step. [`reset_schema`] additionally
//! drops everything first, which the bootstrap exposes behind an explicit
//! configuration flag for demo and test databases.

use diesel_async::SimpleAsyncConnection;
use tracing::info;

use super::pool::{DbPool, PoolError};

/// Idempotent DDL matching the definitions in [`super::schema`].
const ENSURE_SCHEMA_SQL: &str = r"
CREATE TABLE IF NOT EXISTS managers (
    id SERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    role TEXT NOT NULL,
    manager_id INTEGER REFERENCES managers(id)
);

CREATE TABLE IF NOT EXISTS employees (
    id SERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    role TEXT NOT NULL,
    manager_id INTEGER REFERENCES managers(id),
    country TEXT NOT NULL DEFAULT 'India'
);

CREATE TABLE IF NOT EXISTS annotations (
    id SERIAL PRIMARY KEY,
    employee_id INTEGER NOT NULL UNIQUE REFERENCES employees(id) ON DELETE CASCADE,
    x0 DOUBLE PRECISION,
    x1 DOUBLE PRECISION,
    y0 DOUBLE PRECISION,
    y1 DOUBLE PRECISION,
    page INTEGER,
    snippet TEXT,
    metadata JSONB,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_employees_manager_id ON employees(manager_id);
";

const DROP_SCHEMA_SQL: &str = "DROP TABLE IF EXISTS annotations, employees, managers CASCADE;";

/// Errors raised while bootstrapping the schema.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// No connection could be checked out for the DDL.
    #[error("schema bootstrap could not get a connection: {0}")]
    Connection(#[from] PoolError),

    /// A DDL statement failed.
    #[error("schema bootstrap statement failed: {0}")]
    Statement(#[from] diesel::result::Error),
}

/// Create any missing tables.
///
/// Safe to run on every startup; existing tables and their data are left
/// alone.
///
/// # Errors
///
/// Returns [`SchemaError`] when no connection is available or a statement
/// is rejected.
pub async fn ensure_schema(pool: &DbPool) -> Result<(), SchemaError> {
    let mut conn = pool.get().await?;
    conn.batch_execute(ENSURE_SCHEMA_SQL).await?;
    info!("database schema ensured");
    Ok(())
}

/// Drop and recreate every table, discarding all data.
///
/// # Errors
///
/// Returns [`SchemaError`] when no connection is available or a statement
/// is rejected.
pub async fn reset_schema(pool: &DbPool) -> Result<(), SchemaError> {
    let mut conn = pool.get().await?;
    conn.batch_execute(DROP_SCHEMA_SQL).await?;
    conn.batch_execute(ENSURE_SCHEMA_SQL).await?;
    info!("database schema reset");
    Ok(())
}
