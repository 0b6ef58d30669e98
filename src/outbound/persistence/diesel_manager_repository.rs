//! PostgreSQL-backed manager repository using Diesel.
//!
//! Translates between manager rows and domain types. The email uniqueness
//! and referential constraints live in the database; this adapter maps
//! their violations onto the port's dedicated error variants.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::directory::{Manager, NewManager};
use crate::domain::ports::{ManagerRepository, ManagerRepositoryError};

use super::diesel_helpers::{
    is_foreign_key_violation, is_unique_violation, map_diesel_error, map_pool_error,
};
use super::models::{ManagerRow, ManagerUpdate, NewManagerRow};
use super::pool::{DbPool, PoolError};
use super::schema::managers;

/// Diesel-backed implementation of the manager repository port.
#[derive(Clone)]
pub struct DieselManagerRepository {
    pool: DbPool,
}

impl DieselManagerRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_manager(row: ManagerRow) -> Manager {
    Manager {
        id: row.id,
        name: row.name,
        email: row.email,
        role: row.role,
        manager_id: row.manager_id,
    }
}

/// Map pool errors to domain repository errors.
fn map_checkout_error(error: PoolError) -> ManagerRepositoryError {
    map_pool_error(error, |message| {
        ManagerRepositoryError::connection(message)
    })
}

/// Map Diesel errors to domain repository errors.
fn map_read_error(error: diesel::result::Error) -> ManagerRepositoryError {
    map_diesel_error(
        error,
        ManagerRepositoryError::query,
        ManagerRepositoryError::connection,
    )
}

/// Map Diesel errors on inserts and updates, surfacing duplicate emails.
fn map_write_error(error: diesel::result::Error, email: &str) -> ManagerRepositoryError {
    if is_unique_violation(&error) {
        return ManagerRepositoryError::duplicate_email(email);
    }
    map_read_error(error)
}

/// Map Diesel errors on deletes, surfacing held references.
fn map_delete_error(error: diesel::result::Error, manager_id: i32) -> ManagerRepositoryError {
    if is_foreign_key_violation(&error) {
        return ManagerRepositoryError::in_use(manager_id);
    }
    map_read_error(error)
}

#[async_trait]
impl ManagerRepository for DieselManagerRepository {
    async fn list(&self) -> Result<Vec<Manager>, ManagerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let rows: Vec<ManagerRow> = managers::table
            .select(ManagerRow::as_select())
            .order_by(managers::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        Ok(rows.into_iter().map(row_to_manager).collect())
    }

    async fn find(&self, id: i32) -> Result<Option<Manager>, ManagerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let row: Option<ManagerRow> = managers::table
            .filter(managers::id.eq(id))
            .select(ManagerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        Ok(row.map(row_to_manager))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Manager>, ManagerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        // Names are not unique; the lowest id wins so repeat uploads resolve
        // to the same manager.
        let row: Option<ManagerRow> = managers::table
            .filter(managers::name.eq(name))
            .order_by(managers::id.asc())
            .select(ManagerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        Ok(row.map(row_to_manager))
    }

    async fn insert(&self, manager: NewManager) -> Result<Manager, ManagerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let row: ManagerRow = diesel::insert_into(managers::table)
            .values(NewManagerRow {
                name: &manager.name,
                email: &manager.email,
                role: &manager.role,
                manager_id: manager.manager_id,
            })
            .returning(ManagerRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| map_write_error(error, &manager.email))?;

        Ok(row_to_manager(row))
    }

    async fn update(
        &self,
        id: i32,
        manager: NewManager,
    ) -> Result<Option<Manager>, ManagerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let row: Option<ManagerRow> = diesel::update(managers::table.filter(managers::id.eq(id)))
            .set(&ManagerUpdate {
                name: &manager.name,
                email: &manager.email,
                role: &manager.role,
                manager_id: manager.manager_id,
            })
            .returning(ManagerRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|error| map_write_error(error, &manager.email))?;

        Ok(row.map(row_to_manager))
    }

    async fn delete(&self, id: i32) -> Result<Option<Manager>, ManagerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let row: Option<ManagerRow> =
            diesel::delete(managers::table.filter(managers::id.eq(id)))
                .returning(ManagerRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(|error| map_delete_error(error, id))?;

        Ok(row.map(row_to_manager))
    }
}

#[cfg(test)]
mod tests {
    use diesel::result::DatabaseErrorKind;
    use rstest::rstest;

    use crate::outbound::persistence::diesel_helpers::tests::database_error;

    use super::*;

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let mapped = map_checkout_error(PoolError::checkout("pool exhausted"));

        assert!(matches!(
            mapped,
            ManagerRepositoryError::Connection { .. }
        ));
        assert!(mapped.to_string().contains("pool exhausted"));
    }

    #[rstest]
    fn unique_violations_map_to_duplicate_email() {
        let error = database_error(DatabaseErrorKind::UniqueViolation, "duplicate key");
        let mapped = map_write_error(error, "asha@example.com");

        assert_eq!(
            mapped,
            ManagerRepositoryError::duplicate_email("asha@example.com")
        );
    }

    #[rstest]
    fn foreign_key_violations_on_delete_map_to_in_use() {
        let error = database_error(
            DatabaseErrorKind::ForeignKeyViolation,
            "violates foreign key constraint",
        );
        let mapped = map_delete_error(error, 4);

        assert_eq!(mapped, ManagerRepositoryError::in_use(4));
    }

    #[rstest]
    fn other_errors_fall_back_to_query_errors() {
        let mapped = map_write_error(diesel::result::Error::NotFound, "asha@example.com");

        assert!(matches!(mapped, ManagerRepositoryError::Query { .. }));
    }

    #[rstest]
    fn rows_convert_to_domain_managers() {
        let row = ManagerRow {
            id: 3,
            name: "Asha".to_owned(),
            email: "asha@example.com".to_owned(),
            role: "Manager".to_owned(),
            manager_id: Some(1),
        };

        let manager = row_to_manager(row);

        assert_eq!(manager.id, 3);
        assert_eq!(manager.manager_id, Some(1));
        assert_eq!(manager.email, "asha@example.com");
    }
}
