//! Directory domain service.
//!
//! Implements the directory driving ports over the manager and employee
//! repositories. Reads join employees with manager context and resolve
//! hierarchy paths through [`ManagerDirectory`]; writes validate manager
//! references before touching the employee table.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde_json::json;

use crate::domain::annotations::Annotation;
use crate::domain::directory::hierarchy::ManagerDirectory;
use crate::domain::directory::{
    Employee, EmployeeDraft, Manager, ManagerDraft, NewEmployee, NewManager, OrgChartEntry,
    RegionHighlight, SearchRecord, UploadRecord, UploadSummary, DEFAULT_COUNTRY,
};
use crate::domain::ports::{
    DirectoryCommand, DirectoryQuery, EmployeeRepository, EmployeeRepositoryError,
    ManagerRepository, ManagerRepositoryError,
};
use crate::domain::Error;

/// Fallback highlight colour, also first in the palette.
const DEFAULT_HIGHLIGHT: &str = "#FFEB3B";

/// Palette the search overlay draws highlight colours from.
const HIGHLIGHT_COLOURS: [&str; 5] = [
    DEFAULT_HIGHLIGHT,
    "#FFCDD2",
    "#C8E6C9",
    "#BBDEFB",
    "#E1BEE7",
];

/// Directory service implementing the driving ports.
#[derive(Clone)]
pub struct DirectoryService<M, E> {
    managers: Arc<M>,
    employees: Arc<E>,
}

impl<M, E> DirectoryService<M, E> {
    /// Create a new service with the given repositories.
    pub fn new(managers: Arc<M>, employees: Arc<E>) -> Self {
        Self {
            managers,
            employees,
        }
    }
}

/// Viewer overlay for a stored region, or `None` while any coordinate is
/// absent.
fn highlight_for(
    employee_id: i32,
    record: &Annotation,
    rng: &mut impl Rng,
) -> Option<RegionHighlight> {
    let x0 = record.x0?;
    let x1 = record.x1?;
    let y0 = record.y0?;
    let y1 = record.y1?;
    let page = record.page?;
    let colour = HIGHLIGHT_COLOURS
        .choose(rng)
        .copied()
        .unwrap_or(DEFAULT_HIGHLIGHT);
    Some(RegionHighlight {
        page,
        left: x0,
        top: y0,
        width: x1 - x0,
        height: y1 - y0,
        color: colour.to_owned(),
        id: format!("highlight-{employee_id}"),
    })
}

impl<M, E> DirectoryService<M, E>
where
    M: ManagerRepository,
    E: EmployeeRepository,
{
    fn map_manager_error(error: ManagerRepositoryError) -> Error {
        match error {
            ManagerRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("manager repository unavailable: {message}"))
            }
            ManagerRepositoryError::Query { message } => {
                Error::internal(format!("manager repository error: {message}"))
            }
            ManagerRepositoryError::DuplicateEmail { email } => {
                Error::conflict("Email already in use").with_details(json!({ "email": email }))
            }
            ManagerRepositoryError::InUse { manager_id } => {
                Error::conflict("Manager still has direct reports").with_details(json!({
                    "managerId": manager_id,
                }))
            }
        }
    }

    fn map_employee_error(error: EmployeeRepositoryError) -> Error {
        match error {
            EmployeeRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("employee repository unavailable: {message}"))
            }
            EmployeeRepositoryError::Query { message } => {
                Error::internal(format!("employee repository error: {message}"))
            }
            EmployeeRepositoryError::DuplicateEmail { email } => {
                Error::conflict("Email already in use").with_details(json!({ "email": email }))
            }
        }
    }

    async fn manager_directory(&self) -> Result<ManagerDirectory, Error> {
        let managers = self
            .managers
            .list()
            .await
            .map_err(Self::map_manager_error)?;
        Ok(ManagerDirectory::new(&managers))
    }

    async fn require_manager(&self, id: i32) -> Result<Manager, Error> {
        self.managers
            .find(id)
            .await
            .map_err(Self::map_manager_error)?
            .ok_or_else(|| Error::not_found("Manager not found"))
    }

    async fn require_employee(&self, id: i32) -> Result<Employee, Error> {
        self.employees
            .find(id)
            .await
            .map_err(Self::map_employee_error)?
            .ok_or_else(|| Error::not_found("Employee not found"))
    }

    /// Resolve a manager named in a bulk upload, creating one on first sight.
    ///
    /// Created managers get placeholder contact details derived from the
    /// name; the upload records only hierarchy, not manager emails.
    async fn resolve_or_create_manager(
        &self,
        name: &str,
        summary: &mut UploadSummary,
    ) -> Result<i32, Error> {
        if let Some(manager) = self
            .managers
            .find_by_name(name)
            .await
            .map_err(Self::map_manager_error)?
        {
            return Ok(manager.id);
        }
        let created = self
            .managers
            .insert(NewManager {
                name: name.to_owned(),
                email: format!("{}@example.com", name.to_lowercase()),
                role: "Manager".to_owned(),
                manager_id: None,
            })
            .await
            .map_err(Self::map_manager_error)?;
        summary.managers_created += 1;
        Ok(created.id)
    }
}

#[async_trait]
impl<M, E> DirectoryQuery for DirectoryService<M, E>
where
    M: ManagerRepository,
    E: EmployeeRepository,
{
    async fn search<'a>(&self, filter: Option<&'a str>) -> Result<Vec<SearchRecord>, Error> {
        let rows = self
            .employees
            .search(filter)
            .await
            .map_err(Self::map_employee_error)?;
        let directory = self.manager_directory().await?;
        let mut rng = SmallRng::from_entropy();
        let records = rows
            .into_iter()
            .map(|row| {
                let path = directory.path_for(&row.employee.name, row.employee.manager_id);
                let snippet = row
                    .annotation
                    .as_ref()
                    .and_then(|record| record.snippet.clone());
                let highlight = row
                    .annotation
                    .as_ref()
                    .and_then(|record| highlight_for(row.employee.id, record, &mut rng));
                SearchRecord {
                    employee: row.employee,
                    manager_name: row.manager_name,
                    path,
                    snippet,
                    highlight,
                }
            })
            .collect();
        Ok(records)
    }

    async fn org_chart(&self) -> Result<Vec<OrgChartEntry>, Error> {
        let employees = self
            .employees
            .list()
            .await
            .map_err(Self::map_employee_error)?;
        let directory = self.manager_directory().await?;
        let entries = employees
            .into_iter()
            .map(|employee| {
                let manager_name = employee
                    .manager_id
                    .and_then(|id| directory.name_of(id))
                    .map(ToOwned::to_owned);
                let path = directory.path_for(&employee.name, employee.manager_id);
                OrgChartEntry {
                    employee,
                    manager_name,
                    path,
                }
            })
            .collect();
        Ok(entries)
    }

    async fn list_managers(&self) -> Result<Vec<Manager>, Error> {
        self.managers
            .list()
            .await
            .map_err(Self::map_manager_error)
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, Error> {
        self.employees
            .list()
            .await
            .map_err(Self::map_employee_error)
    }

    async fn find_employee(&self, id: i32) -> Result<Employee, Error> {
        self.require_employee(id).await
    }
}

#[async_trait]
impl<M, E> DirectoryCommand for DirectoryService<M, E>
where
    M: ManagerRepository,
    E: EmployeeRepository,
{
    async fn create_employee(&self, draft: EmployeeDraft) -> Result<Employee, Error> {
        if let Some(manager_id) = draft.manager_id {
            self.require_manager(manager_id).await?;
        }
        let country = draft
            .country
            .unwrap_or_else(|| DEFAULT_COUNTRY.to_owned());
        self.employees
            .insert(NewEmployee {
                name: draft.name,
                email: draft.email,
                role: draft.role,
                manager_id: draft.manager_id,
                country,
            })
            .await
            .map_err(Self::map_employee_error)
    }

    async fn update_employee(&self, id: i32, draft: EmployeeDraft) -> Result<Employee, Error> {
        let current = self.require_employee(id).await?;
        if let Some(manager_id) = draft.manager_id {
            self.require_manager(manager_id).await?;
        }
        let manager_id = draft.manager_id.or(current.manager_id);
        let country = draft
            .country
            .unwrap_or_else(|| DEFAULT_COUNTRY.to_owned());
        self.employees
            .update(
                id,
                NewEmployee {
                    name: draft.name,
                    email: draft.email,
                    role: draft.role,
                    manager_id,
                    country,
                },
            )
            .await
            .map_err(Self::map_employee_error)?
            .ok_or_else(|| Error::not_found("Employee not found"))
    }

    async fn delete_employee(&self, id: i32) -> Result<Employee, Error> {
        self.employees
            .delete(id)
            .await
            .map_err(Self::map_employee_error)?
            .ok_or_else(|| Error::not_found("Employee not found"))
    }

    async fn create_manager(&self, draft: ManagerDraft) -> Result<Manager, Error> {
        if let Some(parent_id) = draft.manager_id {
            self.require_manager(parent_id).await?;
        }
        self.managers
            .insert(NewManager {
                name: draft.name,
                email: draft.email,
                role: draft.role,
                manager_id: draft.manager_id,
            })
            .await
            .map_err(Self::map_manager_error)
    }

    async fn update_manager(&self, id: i32, draft: ManagerDraft) -> Result<Manager, Error> {
        let current = self.require_manager(id).await?;
        if draft.manager_id == Some(id) {
            return Err(Error::invalid_request(
                "A manager cannot report to themselves",
            ));
        }
        if let Some(parent_id) = draft.manager_id {
            self.require_manager(parent_id).await?;
        }
        let manager_id = draft.manager_id.or(current.manager_id);
        self.managers
            .update(
                id,
                NewManager {
                    name: draft.name,
                    email: draft.email,
                    role: draft.role,
                    manager_id,
                },
            )
            .await
            .map_err(Self::map_manager_error)?
            .ok_or_else(|| Error::not_found("Manager not found"))
    }

    async fn delete_manager(&self, id: i32) -> Result<Manager, Error> {
        self.managers
            .delete(id)
            .await
            .map_err(Self::map_manager_error)?
            .ok_or_else(|| Error::not_found("Manager not found"))
    }

    async fn upload(&self, records: Vec<UploadRecord>) -> Result<UploadSummary, Error> {
        let mut summary = UploadSummary::default();
        let mut manager_cache: HashMap<String, i32> = HashMap::new();
        for (index, record) in records.into_iter().enumerate() {
            let Some(manager_name) = record.path.first().cloned() else {
                return Err(Error::invalid_request(format!(
                    "Record {index} is missing a manager path"
                ))
                .with_details(json!({ "index": index, "field": "path" })));
            };
            let manager_id = match manager_cache.get(&manager_name) {
                Some(&id) => id,
                None => {
                    let id = self
                        .resolve_or_create_manager(&manager_name, &mut summary)
                        .await?;
                    manager_cache.insert(manager_name, id);
                    id
                }
            };
            let country = record
                .country
                .unwrap_or_else(|| DEFAULT_COUNTRY.to_owned());
            self.employees
                .insert(NewEmployee {
                    name: record.name,
                    email: record.email,
                    role: record.role,
                    manager_id: Some(manager_id),
                    country,
                })
                .await
                .map_err(Self::map_employee_error)?;
            summary.employees_created += 1;
        }
        Ok(summary)
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod service_tests;
