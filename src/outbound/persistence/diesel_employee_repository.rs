//! PostgreSQL-backed employee repository using Diesel.
//!
//! Besides plain CRUD, this adapter owns the consolidated search query: one
//! round trip joining employees to their manager's name and any stored
//! annotation, so the service layer never issues follow-up lookups per row.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::annotations::Annotation;
use crate::domain::directory::{Employee, EmployeeWithContext, NewEmployee};
use crate::domain::ports::{EmployeeRepository, EmployeeRepositoryError};

use super::diesel_helpers::{
    is_foreign_key_violation, is_unique_violation, map_diesel_error, map_pool_error,
};
use super::models::{AnnotationRow, EmployeeRow, EmployeeUpdate, NewEmployeeRow};
use super::pool::{DbPool, PoolError};
use super::schema::{annotations, employees, managers};

/// Diesel-backed implementation of the employee repository port.
#[derive(Clone)]
pub struct DieselEmployeeRepository {
    pool: DbPool,
}

impl DieselEmployeeRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_employee(row: EmployeeRow) -> Employee {
    Employee {
        id: row.id,
        name: row.name,
        email: row.email,
        role: row.role,
        manager_id: row.manager_id,
        country: row.country,
    }
}

fn row_to_context(
    (employee, manager_name, annotation): (EmployeeRow, Option<String>, Option<AnnotationRow>),
) -> EmployeeWithContext {
    EmployeeWithContext {
        employee: row_to_employee(employee),
        manager_name,
        annotation: annotation.map(Annotation::from),
    }
}

/// Map pool errors to domain repository errors.
fn map_checkout_error(error: PoolError) -> EmployeeRepositoryError {
    map_pool_error(error, |message| {
        EmployeeRepositoryError::connection(message)
    })
}

/// Map Diesel errors to domain repository errors.
fn map_read_error(error: diesel::result::Error) -> EmployeeRepositoryError {
    map_diesel_error(
        error,
        EmployeeRepositoryError::query,
        EmployeeRepositoryError::connection,
    )
}

/// Map Diesel errors on inserts and updates, surfacing duplicate emails.
///
/// A foreign key violation can still slip past the service's manager check
/// when the manager is deleted concurrently; it surfaces as a query error
/// naming the missing manager.
fn map_write_error(error: diesel::result::Error, email: &str) -> EmployeeRepositoryError {
    if is_unique_violation(&error) {
        return EmployeeRepositoryError::duplicate_email(email);
    }
    if is_foreign_key_violation(&error) {
        return EmployeeRepositoryError::query("employee references a missing manager");
    }
    map_read_error(error)
}

#[async_trait]
impl EmployeeRepository for DieselEmployeeRepository {
    async fn search<'a>(
        &self,
        filter: Option<&'a str>,
    ) -> Result<Vec<EmployeeWithContext>, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let mut query = employees::table
            .left_join(managers::table)
            .left_join(annotations::table)
            .select((
                EmployeeRow::as_select(),
                managers::name.nullable(),
                Option::<AnnotationRow>::as_select(),
            ))
            .order_by(employees::id.asc())
            .into_boxed();

        if let Some(needle) = filter {
            let pattern = format!("%{needle}%");
            query = query.filter(
                employees::name
                    .ilike(pattern.clone())
                    .or(managers::name.ilike(pattern)),
            );
        }

        let rows: Vec<(EmployeeRow, Option<String>, Option<AnnotationRow>)> =
            query.load(&mut conn).await.map_err(map_read_error)?;

        Ok(rows.into_iter().map(row_to_context).collect())
    }

    async fn list(&self) -> Result<Vec<Employee>, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let rows: Vec<EmployeeRow> = employees::table
            .select(EmployeeRow::as_select())
            .order_by(employees::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_read_error)?;

        Ok(rows.into_iter().map(row_to_employee).collect())
    }

    async fn find(&self, id: i32) -> Result<Option<Employee>, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let row: Option<EmployeeRow> = employees::table
            .filter(employees::id.eq(id))
            .select(EmployeeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_read_error)?;

        Ok(row.map(row_to_employee))
    }

    async fn insert(&self, employee: NewEmployee) -> Result<Employee, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let row: EmployeeRow = diesel::insert_into(employees::table)
            .values(NewEmployeeRow {
                name: &employee.name,
                email: &employee.email,
                role: &employee.role,
                manager_id: employee.manager_id,
                country: &employee.country,
            })
            .returning(EmployeeRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|error| map_write_error(error, &employee.email))?;

        Ok(row_to_employee(row))
    }

    async fn update(
        &self,
        id: i32,
        employee: NewEmployee,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        let row: Option<EmployeeRow> =
            diesel::update(employees::table.filter(employees::id.eq(id)))
                .set(&EmployeeUpdate {
                    name: &employee.name,
                    email: &employee.email,
                    role: &employee.role,
                    manager_id: employee.manager_id,
                    country: &employee.country,
                })
                .returning(EmployeeRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(|error| map_write_error(error, &employee.email))?;

        Ok(row.map(row_to_employee))
    }

    async fn delete(&self, id: i32) -> Result<Option<Employee>, EmployeeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;

        // The annotation row, if any, goes with the employee via ON DELETE
        // CASCADE.
        let row: Option<EmployeeRow> =
            diesel::delete(employees::table.filter(employees::id.eq(id)))
                .returning(EmployeeRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(map_read_error)?;

        Ok(row.map(row_to_employee))
    }
}

#[cfg(test)]
mod tests {
    use diesel::result::DatabaseErrorKind;
    use rstest::rstest;

    use crate::outbound::persistence::diesel_helpers::tests::database_error;

    use super::*;

    fn ravi_row() -> EmployeeRow {
        EmployeeRow {
            id: 7,
            name: "Ravi".to_owned(),
            email: "ravi@example.com".to_owned(),
            role: "Engineer".to_owned(),
            manager_id: Some(1),
            country: "India".to_owned(),
        }
    }

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let mapped = map_checkout_error(PoolError::build("bad connection string"));

        assert!(matches!(
            mapped,
            EmployeeRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn unique_violations_map_to_duplicate_email() {
        let error = database_error(DatabaseErrorKind::UniqueViolation, "duplicate key");
        let mapped = map_write_error(error, "ravi@example.com");

        assert_eq!(
            mapped,
            EmployeeRepositoryError::duplicate_email("ravi@example.com")
        );
    }

    #[rstest]
    fn foreign_key_violations_read_as_query_errors() {
        let error = database_error(
            DatabaseErrorKind::ForeignKeyViolation,
            "violates foreign key constraint",
        );
        let mapped = map_write_error(error, "ravi@example.com");

        assert!(matches!(mapped, EmployeeRepositoryError::Query { .. }));
        assert!(mapped.to_string().contains("missing manager"));
    }

    #[rstest]
    fn rows_convert_to_domain_employees() {
        let employee = row_to_employee(ravi_row());

        assert_eq!(employee.id, 7);
        assert_eq!(employee.country, "India");
    }

    #[rstest]
    fn join_rows_convert_to_context() {
        let annotation = AnnotationRow {
            x0: Some(100.0),
            x1: Some(300.0),
            y0: Some(150.0),
            y1: Some(250.0),
            page: Some(0),
            snippet: Some("Ravi Kumar".to_owned()),
            metadata: None,
        };

        let context = row_to_context((ravi_row(), Some("Asha".to_owned()), Some(annotation)));

        assert_eq!(context.manager_name.as_deref(), Some("Asha"));
        let stored = context.annotation.expect("annotation should convert");
        assert!(stored.has_region());
        assert_eq!(stored.snippet.as_deref(), Some("Ravi Kumar"));
    }

    #[rstest]
    fn join_rows_without_annotation_convert_to_bare_context() {
        let context = row_to_context((ravi_row(), None, None));

        assert!(context.manager_name.is_none());
        assert!(context.annotation.is_none());
    }
}
