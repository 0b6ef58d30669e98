//! Startup database preparation.

use thiserror::Error;
use tracing::warn;

use crate::bootstrap::config::AppSettings;
use crate::outbound::persistence::{DbPool, PoolError, SchemaError, ensure_schema, reset_schema};

/// Errors returned while preparing the database at start-up.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Connection pool could not be built.
    #[error("database pool creation failed: {0}")]
    Pool(#[from] PoolError),
    /// Schema bootstrap failed.
    #[error("schema preparation failed: {0}")]
    Schema(#[from] SchemaError),
}

/// Build the connection pool and bring the schema up to date.
///
/// Returns `None` when no database URL is configured; the server then runs
/// on fixture repositories.
///
/// # Errors
///
/// Returns [`StartupError`] when the pool cannot be built or the DDL is
/// rejected.
pub async fn prepare_database(settings: &AppSettings) -> Result<Option<DbPool>, StartupError> {
    let Some(pool_config) = settings.pool_config() else {
        warn!("ORGDIR_DATABASE_URL is not set; serving fixture data");
        return Ok(None);
    };

    let pool = DbPool::new(pool_config).await?;
    if settings.reset_schema {
        reset_schema(&pool).await?;
    } else {
        ensure_schema(&pool).await?;
    }
    Ok(Some(pool))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn settings_without_database() -> AppSettings {
        AppSettings {
            database_url: None,
            reset_schema: false,
            listen_addr: None,
            pool_max_size: None,
        }
    }

    #[tokio::test]
    async fn missing_database_url_skips_preparation() {
        let pool = prepare_database(&settings_without_database())
            .await
            .expect("preparation should succeed without a database");
        assert!(pool.is_none());
    }

    #[rstest]
    fn startup_errors_name_their_stage() {
        let pool_error = StartupError::from(PoolError::build("bad connection string"));
        assert!(
            pool_error
                .to_string()
                .contains("database pool creation failed")
        );

        let schema_error = StartupError::from(SchemaError::from(PoolError::checkout("timed out")));
        assert!(schema_error.to_string().contains("schema preparation"));
    }
}
