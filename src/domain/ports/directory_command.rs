//! Driving port for directory mutations.
//!
//! The [`DirectoryCommand`] trait defines the inbound contract for creating,
//! updating, and deleting employees and managers, plus the bulk upload that
//! seeds both tables from hierarchy records.

use async_trait::async_trait;

use crate::domain::directory::{
    Employee, EmployeeDraft, Manager, ManagerDraft, UploadRecord, UploadSummary,
};
use crate::domain::Error;

/// Driving port for directory mutations.
///
/// Implementations validate manager references against the managers table
/// before writing, so a draft naming an unknown manager never reaches the
/// store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryCommand: Send + Sync {
    /// Create an employee from a draft.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The draft references a manager that does not exist.
    /// - The email is already in use.
    /// - A database or connection error occurs.
    async fn create_employee(&self, draft: EmployeeDraft) -> Result<Employee, Error>;

    /// Overwrite an employee's fields from a draft.
    ///
    /// An absent `manager_id` keeps the current assignment; an absent
    /// `country` resets it to the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee or referenced manager does not
    /// exist, or the email is already in use.
    async fn update_employee(&self, id: i32, draft: EmployeeDraft) -> Result<Employee, Error>;

    /// Delete an employee and return the removed record.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no employee exists with the given id.
    async fn delete_employee(&self, id: i32) -> Result<Employee, Error>;

    /// Create a manager from a draft.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft references a parent manager that does
    /// not exist, or the email is already in use.
    async fn create_manager(&self, draft: ManagerDraft) -> Result<Manager, Error>;

    /// Overwrite a manager's fields from a draft.
    ///
    /// # Errors
    ///
    /// Returns an error if the manager or referenced parent does not exist,
    /// the draft names the manager as their own parent, or the email is
    /// already in use.
    async fn update_manager(&self, id: i32, draft: ManagerDraft) -> Result<Manager, Error>;

    /// Delete a manager and return the removed record.
    ///
    /// # Errors
    ///
    /// Returns a conflict error while employees or managers still report to
    /// the target, and a not-found error when no manager exists with the
    /// given id.
    async fn delete_manager(&self, id: i32) -> Result<Manager, Error>;

    /// Bulk-create employees, creating referenced managers on demand.
    ///
    /// Each record's first path element names the employee's manager; a
    /// manager unseen so far is created with placeholder contact details.
    /// Records are processed in order and the upload is not atomic, so
    /// earlier rows survive a mid-batch failure.
    async fn upload(&self, records: Vec<UploadRecord>) -> Result<UploadSummary, Error>;
}
