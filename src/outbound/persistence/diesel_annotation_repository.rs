//! PostgreSQL-backed annotation repository using Diesel.
//!
//! Annotation state lives in one row per employee, keyed by a unique
//! `employee_id`, so both region and metadata writes are upserts on that
//! column. Region writes leave the metadata column untouched and vice
//! versa; only `updated_at` moves on every write.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde_json::Value;

use crate::domain::annotations::{Annotation, RegionWrite};
use crate::domain::ports::{AnnotationRepository, AnnotationRepositoryError};

use super::diesel_helpers::{is_foreign_key_violation, map_diesel_error, map_pool_error};
use super::models::{AnnotationRow, NewMetadataRow, NewRegionRow, RegionUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::annotations;

/// Diesel-backed implementation of the annotation repository port.
#[derive(Clone)]
pub struct DieselAnnotationRepository {
    pool: DbPool,
}

impl DieselAnnotationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain repository errors.
fn map_checkout_error(error: PoolError) -> AnnotationRepositoryError {
    map_pool_error(error, |message| {
        AnnotationRepositoryError::connection(message)
    })
}

/// Map Diesel errors to domain repository errors.
fn map_read_error(error: diesel::result::Error) -> AnnotationRepositoryError {
    map_diesel_error(
        error,
        AnnotationRepositoryError::query,
        AnnotationRepositoryError::connection,
    )
}

/// Map Diesel errors on upserts, surfacing the missing employee.
///
/// The only foreign key on this table points at employees, so a violation
/// means the annotated employee does not exist.
fn map_write_error(error: diesel::result::Error, employee_id: i32) -> AnnotationRepositoryError {
    if is_foreign_key_violation(&error) {
        return AnnotationRepositoryError::employee_missing(employee_id);
    }
    map_read_error(error)
}

#[async_trait]
impl AnnotationRepository for DieselAnnotationRepository {
    async fn find(
        &self,
        employee_id: i32,
    ) -> Result<Option<Annotation>, AnnotationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let row: Option<AnnotationRow> = annotations::table
            .filter(annotations::employee_id.eq(employee_id))
            .select(AnnotationRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        Ok(row.map(Annotation::from))
    }

    async fn upsert_region(
        &self,
        employee_id: i32,
        region: RegionWrite,
    ) -> Result<Annotation, AnnotationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let row: AnnotationRow = diesel::insert_into(annotations::table)
            .values(NewRegionRow {
                employee_id,
                x0: region.x0,
                x1: region.x1,
                y0: region.y0,
                y1: region.y1,
                page: region.page,
                snippet: region.snippet.as_deref(),
            })
            .on_conflict(annotations::employee_id)
            .do_update()
            .set((
                RegionUpdate {
                    x0: region.x0,
                    x1: region.x1,
                    y0: region.y0,
                    y1: region.y1,
                    page: region.page,
                    snippet: region.snippet.as_deref(),
                },
                annotations::updated_at.eq(diesel::dsl::now),
            ))
            .returning(AnnotationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| map_write_error(error, employee_id))?;

        Ok(Annotation::from(row))
    }

    async fn clear_region(
        &self,
        employee_id: i32,
    ) -> Result<Option<Annotation>, AnnotationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let row: Option<AnnotationRow> = diesel::update(
            annotations::table.filter(annotations::employee_id.eq(employee_id)),
        )
        .set((
            annotations::x0.eq(None::<f64>),
            annotations::x1.eq(None::<f64>),
            annotations::y0.eq(None::<f64>),
            annotations::y1.eq(None::<f64>),
            annotations::page.eq(None::<i32>),
            annotations::snippet.eq(None::<String>),
            annotations::updated_at.eq(diesel::dsl::now),
        ))
        .returning(AnnotationRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_read_error)?;

        Ok(row.map(Annotation::from))
    }

    async fn upsert_metadata(
        &self,
        employee_id: i32,
        metadata: Value,
    ) -> Result<(), AnnotationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        diesel::insert_into(annotations::table)
            .values(NewMetadataRow {
                employee_id,
                metadata: &metadata,
            })
            .on_conflict(annotations::employee_id)
            .do_update()
            .set((
                annotations::metadata.eq(&metadata),
                annotations::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|error| map_write_error(error, employee_id))
    }
}

#[cfg(test)]
mod tests {
    use diesel::result::DatabaseErrorKind;
    use rstest::rstest;
    use serde_json::json;

    use crate::outbound::persistence::diesel_helpers::tests::database_error;

    use super::*;

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let mapped = map_checkout_error(PoolError::checkout("pool exhausted"));

        assert!(matches!(
            mapped,
            AnnotationRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn foreign_key_violations_map_to_employee_missing() {
        let error = database_error(
            DatabaseErrorKind::ForeignKeyViolation,
            "violates foreign key constraint",
        );
        let mapped = map_write_error(error, 7);

        assert_eq!(mapped, AnnotationRepositoryError::employee_missing(7));
    }

    #[rstest]
    fn other_errors_fall_back_to_query_errors() {
        let mapped = map_write_error(diesel::result::Error::NotFound, 7);

        assert!(matches!(mapped, AnnotationRepositoryError::Query { .. }));
    }

    #[rstest]
    fn rows_convert_to_domain_annotations() {
        let row = AnnotationRow {
            x0: Some(100.0),
            x1: Some(300.0),
            y0: Some(150.0),
            y1: Some(250.0),
            page: Some(0),
            snippet: Some("Ravi Kumar".to_owned()),
            metadata: Some(json!({"reviewed": true})),
        };

        let annotation = Annotation::from(row);

        assert!(annotation.has_region());
        assert_eq!(annotation.metadata, Some(json!({"reviewed": true})));
    }

    #[rstest]
    fn cleared_rows_convert_without_a_region() {
        let row = AnnotationRow {
            x0: None,
            x1: None,
            y0: None,
            y1: None,
            page: None,
            snippet: None,
            metadata: Some(json!({"kept": true})),
        };

        let annotation = Annotation::from(row);

        assert!(!annotation.has_region());
        assert_eq!(annotation.metadata, Some(json!({"kept": true})));
    }
}
