//! Port for manager persistence.
//!
//! The [`ManagerRepository`] trait defines the contract for storing and
//! retrieving manager records, including the by-name lookup that bulk upload
//! relies on to create managers on demand.

use async_trait::async_trait;

use crate::domain::directory::{Manager, NewManager};

use super::define_port_error;

define_port_error! {
    /// Errors raised by manager repository adapters.
    pub enum ManagerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "manager repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "manager repository query failed: {message}",
        /// Another manager already uses this email address.
        DuplicateEmail { email: String } =>
            "manager email already in use: {email}",
        /// The manager is still referenced by employees or other managers.
        InUse { manager_id: i32 } =>
            "manager {manager_id} still has direct reports",
    }
}

/// Port for manager storage and retrieval.
///
/// Adapters must keep emails unique and refuse to delete a manager that is
/// still referenced, surfacing those constraint failures through
/// [`ManagerRepositoryError::DuplicateEmail`] and
/// [`ManagerRepositoryError::InUse`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ManagerRepository: Send + Sync {
    /// Every manager, ordered by id.
    async fn list(&self) -> Result<Vec<Manager>, ManagerRepositoryError>;

    /// Fetch a manager by id.
    ///
    /// Returns `None` if no manager exists with the given id.
    async fn find(&self, id: i32) -> Result<Option<Manager>, ManagerRepositoryError>;

    /// Fetch the first manager with the given name, lowest id winning.
    async fn find_by_name(&self, name: &str) -> Result<Option<Manager>, ManagerRepositoryError>;

    /// Insert a manager and return the stored record.
    async fn insert(&self, manager: NewManager) -> Result<Manager, ManagerRepositoryError>;

    /// Overwrite a manager's fields.
    ///
    /// Returns `None` if no manager exists with the given id.
    async fn update(
        &self,
        id: i32,
        manager: NewManager,
    ) -> Result<Option<Manager>, ManagerRepositoryError>;

    /// Delete a manager and return the removed record.
    ///
    /// Returns `None` if no manager exists with the given id.
    async fn delete(&self, id: i32) -> Result<Option<Manager>, ManagerRepositoryError>;
}

/// Fixture implementation for running without a real database.
///
/// Lookups return empty results, inserts echo the record with a placeholder
/// id, and overwrites report the target as absent.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureManagerRepository;

#[async_trait]
impl ManagerRepository for FixtureManagerRepository {
    async fn list(&self) -> Result<Vec<Manager>, ManagerRepositoryError> {
        Ok(Vec::new())
    }

    async fn find(&self, _id: i32) -> Result<Option<Manager>, ManagerRepositoryError> {
        Ok(None)
    }

    async fn find_by_name(&self, _name: &str) -> Result<Option<Manager>, ManagerRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, manager: NewManager) -> Result<Manager, ManagerRepositoryError> {
        Ok(Manager {
            id: 0,
            name: manager.name,
            email: manager.email,
            role: manager.role,
            manager_id: manager.manager_id,
        })
    }

    async fn update(
        &self,
        _id: i32,
        _manager: NewManager,
    ) -> Result<Option<Manager>, ManagerRepositoryError> {
        Ok(None)
    }

    async fn delete(&self, _id: i32) -> Result<Option<Manager>, ManagerRepositoryError> {
        Ok(None)
    }
}
