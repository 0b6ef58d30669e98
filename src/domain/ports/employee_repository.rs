//! Port for employee persistence.
//!
//! The [`EmployeeRepository`] trait covers CRUD on employee records plus the
//! consolidated search query, which returns each employee alongside their
//! manager's name and any stored annotation so the service layer can shape
//! responses without issuing follow-up queries.

use async_trait::async_trait;

use crate::domain::directory::{Employee, EmployeeWithContext, NewEmployee};

use super::define_port_error;

define_port_error! {
    /// Errors raised by employee repository adapters.
    pub enum EmployeeRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "employee repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "employee repository query failed: {message}",
        /// Another employee already uses this email address.
        DuplicateEmail { email: String } =>
            "employee email already in use: {email}",
    }
}

/// Port for employee storage and retrieval.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Employees with their manager name and annotation, ordered by id.
    ///
    /// When `filter` is present, restricts the result to employees whose own
    /// name or manager's name contains the needle, case-insensitively.
    async fn search<'a>(
        &self,
        filter: Option<&'a str>,
    ) -> Result<Vec<EmployeeWithContext>, EmployeeRepositoryError>;

    /// Every employee, ordered by id.
    async fn list(&self) -> Result<Vec<Employee>, EmployeeRepositoryError>;

    /// Fetch an employee by id.
    ///
    /// Returns `None` if no employee exists with the given id.
    async fn find(&self, id: i32) -> Result<Option<Employee>, EmployeeRepositoryError>;

    /// Insert an employee and return the stored record.
    async fn insert(&self, employee: NewEmployee) -> Result<Employee, EmployeeRepositoryError>;

    /// Overwrite an employee's fields.
    ///
    /// Returns `None` if no employee exists with the given id.
    async fn update(
        &self,
        id: i32,
        employee: NewEmployee,
    ) -> Result<Option<Employee>, EmployeeRepositoryError>;

    /// Delete an employee and return the removed record.
    ///
    /// Returns `None` if no employee exists with the given id. Any annotation
    /// row for the employee goes with it.
    async fn delete(&self, id: i32) -> Result<Option<Employee>, EmployeeRepositoryError>;
}

/// Fixture implementation for running without a real database.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureEmployeeRepository;

#[async_trait]
impl EmployeeRepository for FixtureEmployeeRepository {
    async fn search<'a>(
        &self,
        _filter: Option<&'a str>,
    ) -> Result<Vec<EmployeeWithContext>, EmployeeRepositoryError> {
        Ok(Vec::new())
    }

    async fn list(&self) -> Result<Vec<Employee>, EmployeeRepositoryError> {
        Ok(Vec::new())
    }

    async fn find(&self, _id: i32) -> Result<Option<Employee>, EmployeeRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, employee: NewEmployee) -> Result<Employee, EmployeeRepositoryError> {
        Ok(Employee {
            id: 0,
            name: employee.name,
            email: employee.email,
            role: employee.role,
            manager_id: employee.manager_id,
            country: employee.country,
        })
    }

    async fn update(
        &self,
        _id: i32,
        _employee: NewEmployee,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        Ok(None)
    }

    async fn delete(&self, _id: i32) -> Result<Option<Employee>, EmployeeRepositoryError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[tokio::test]
    async fn fixture_repository_search_returns_empty() {
        let repo = FixtureEmployeeRepository;
        let rows = repo
            .search(Some("Asha"))
            .await
            .expect("fixture search should succeed");
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn fixture_repository_lookups_return_none() {
        let repo = FixtureEmployeeRepository;
        assert!(repo.find(1).await.expect("find should succeed").is_none());
        assert!(repo
            .delete(1)
            .await
            .expect("delete should succeed")
            .is_none());
    }

    #[tokio::test]
    async fn fixture_repository_insert_echoes_the_record() {
        let repo = FixtureEmployeeRepository;
        let stored = repo
            .insert(NewEmployee {
                name: "Ravi".to_owned(),
                email: "ravi@example.com".to_owned(),
                role: "Engineer".to_owned(),
                manager_id: Some(1),
                country: "India".to_owned(),
            })
            .await
            .expect("fixture insert should succeed");

        assert_eq!(stored.name, "Ravi");
        assert_eq!(stored.manager_id, Some(1));
    }

    #[rstest]
    fn duplicate_email_error_formats_correctly() {
        let error = EmployeeRepositoryError::duplicate_email("ravi@example.com");
        assert!(error.to_string().contains("ravi@example.com"));
    }

    #[rstest]
    fn connection_error_formats_correctly() {
        let error = EmployeeRepositoryError::connection("pool exhausted");
        assert_eq!(
            error.to_string(),
            "employee repository connection failed: pool exhausted"
        );
    }
}
