//! Tests for the directory service.

use std::sync::Arc;

use serde_json::json;

use super::DirectoryService;
use crate::domain::annotations::Annotation;
use crate::domain::directory::{
    Employee, EmployeeDraft, EmployeeWithContext, Manager, ManagerDraft, UploadRecord,
    DEFAULT_COUNTRY,
};
use crate::domain::ports::{
    DirectoryCommand, DirectoryQuery, EmployeeRepositoryError, ManagerRepositoryError,
    MockEmployeeRepository, MockManagerRepository,
};
use crate::domain::ErrorCode;

fn make_service(
    managers: MockManagerRepository,
    employees: MockEmployeeRepository,
) -> DirectoryService<MockManagerRepository, MockEmployeeRepository> {
    DirectoryService::new(Arc::new(managers), Arc::new(employees))
}

fn asha() -> Manager {
    Manager {
        id: 1,
        name: "Asha".to_owned(),
        email: "asha@example.com".to_owned(),
        role: "Manager".to_owned(),
        manager_id: None,
    }
}

fn ravi() -> Employee {
    Employee {
        id: 2,
        name: "Ravi".to_owned(),
        email: "ravi@example.com".to_owned(),
        role: "Engineer".to_owned(),
        manager_id: Some(1),
        country: "India".to_owned(),
    }
}

fn employee_draft() -> EmployeeDraft {
    EmployeeDraft {
        name: "Ravi".to_owned(),
        email: "ravi@example.com".to_owned(),
        role: "Engineer".to_owned(),
        manager_id: Some(1),
        country: None,
    }
}

#[tokio::test]
async fn search_resolves_manager_names_and_paths() {
    let mut managers = MockManagerRepository::new();
    managers.expect_list().times(1).return_once(|| Ok(vec![asha()]));
    let mut employees = MockEmployeeRepository::new();
    employees.expect_search().times(1).return_once(|_| {
        Ok(vec![EmployeeWithContext {
            employee: ravi(),
            manager_name: Some("Asha".to_owned()),
            annotation: None,
        }])
    });

    let service = make_service(managers, employees);
    let records = service.search(None).await.expect("search");

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.manager_name.as_deref(), Some("Asha"));
    assert_eq!(record.path, vec!["Asha", "Ravi"]);
    assert!(record.snippet.is_none());
    assert!(record.highlight.is_none());
}

#[tokio::test]
async fn search_passes_the_filter_through() {
    let mut managers = MockManagerRepository::new();
    managers.expect_list().times(1).return_once(|| Ok(Vec::new()));
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_search()
        .times(1)
        .withf(|filter| *filter == Some("asha"))
        .return_once(|_| Ok(Vec::new()));

    let service = make_service(managers, employees);
    let records = service.search(Some("asha")).await.expect("search");

    assert!(records.is_empty());
}

#[tokio::test]
async fn search_builds_a_highlight_for_complete_regions() {
    let mut managers = MockManagerRepository::new();
    managers.expect_list().times(1).return_once(|| Ok(vec![asha()]));
    let mut employees = MockEmployeeRepository::new();
    employees.expect_search().times(1).return_once(|_| {
        Ok(vec![EmployeeWithContext {
            employee: ravi(),
            manager_name: Some("Asha".to_owned()),
            annotation: Some(Annotation {
                x0: Some(100.0),
                x1: Some(300.0),
                y0: Some(150.0),
                y1: Some(250.0),
                page: Some(0),
                snippet: Some("…higher than expected…".to_owned()),
                metadata: None,
            }),
        }])
    });

    let service = make_service(managers, employees);
    let records = service.search(None).await.expect("search");

    let record = &records[0];
    assert_eq!(record.snippet.as_deref(), Some("…higher than expected…"));
    let highlight = record.highlight.as_ref().expect("highlight present");
    assert_eq!(highlight.page, 0);
    assert!((highlight.left - 100.0).abs() < f64::EPSILON);
    assert!((highlight.top - 150.0).abs() < f64::EPSILON);
    assert!((highlight.width - 200.0).abs() < f64::EPSILON);
    assert!((highlight.height - 100.0).abs() < f64::EPSILON);
    assert_eq!(highlight.id, "highlight-2");
    assert!(super::HIGHLIGHT_COLOURS.contains(&highlight.color.as_str()));
}

#[tokio::test]
async fn search_omits_the_highlight_for_partial_regions() {
    let mut managers = MockManagerRepository::new();
    managers.expect_list().times(1).return_once(|| Ok(vec![asha()]));
    let mut employees = MockEmployeeRepository::new();
    employees.expect_search().times(1).return_once(|_| {
        Ok(vec![EmployeeWithContext {
            employee: ravi(),
            manager_name: Some("Asha".to_owned()),
            annotation: Some(Annotation {
                x0: Some(100.0),
                snippet: Some("kept".to_owned()),
                ..Annotation::default()
            }),
        }])
    });

    let service = make_service(managers, employees);
    let records = service.search(None).await.expect("search");

    let record = &records[0];
    assert!(record.highlight.is_none());
    assert_eq!(record.snippet.as_deref(), Some("kept"));
}

#[tokio::test]
async fn org_chart_resolves_the_full_chain() {
    let mut managers = MockManagerRepository::new();
    managers.expect_list().times(1).return_once(|| {
        Ok(vec![
            asha(),
            Manager {
                id: 2,
                name: "Bina".to_owned(),
                email: "bina@example.com".to_owned(),
                role: "Manager".to_owned(),
                manager_id: Some(1),
            },
        ])
    });
    let mut employees = MockEmployeeRepository::new();
    employees.expect_list().times(1).return_once(|| {
        Ok(vec![Employee {
            manager_id: Some(2),
            ..ravi()
        }])
    });

    let service = make_service(managers, employees);
    let entries = service.org_chart().await.expect("org chart");

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].manager_name.as_deref(), Some("Bina"));
    assert_eq!(entries[0].path, vec!["Asha", "Bina", "Ravi"]);
}

#[tokio::test]
async fn find_employee_reports_missing_ids() {
    let managers = MockManagerRepository::new();
    let mut employees = MockEmployeeRepository::new();
    employees.expect_find().times(1).return_once(|_| Ok(None));

    let service = make_service(managers, employees);
    let error = service.find_employee(99).await.expect_err("missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Employee not found");
}

#[tokio::test]
async fn create_employee_rejects_an_unknown_manager() {
    let mut managers = MockManagerRepository::new();
    managers.expect_find().times(1).return_once(|_| Ok(None));
    let employees = MockEmployeeRepository::new();

    let service = make_service(managers, employees);
    let error = service
        .create_employee(employee_draft())
        .await
        .expect_err("unknown manager");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Manager not found");
}

#[tokio::test]
async fn create_employee_defaults_the_country() {
    let mut managers = MockManagerRepository::new();
    managers
        .expect_find()
        .times(1)
        .return_once(|_| Ok(Some(asha())));
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_insert()
        .times(1)
        .withf(|new| new.country == DEFAULT_COUNTRY && new.manager_id == Some(1))
        .return_once(|new| {
            Ok(Employee {
                id: 2,
                name: new.name,
                email: new.email,
                role: new.role,
                manager_id: new.manager_id,
                country: new.country,
            })
        });

    let service = make_service(managers, employees);
    let created = service
        .create_employee(employee_draft())
        .await
        .expect("create");

    assert_eq!(created.country, DEFAULT_COUNTRY);
}

#[tokio::test]
async fn update_employee_keeps_the_current_manager_when_absent() {
    let managers = MockManagerRepository::new();
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_find()
        .times(1)
        .return_once(|_| Ok(Some(ravi())));
    employees
        .expect_update()
        .times(1)
        .withf(|_, new| new.manager_id == Some(1) && new.country == DEFAULT_COUNTRY)
        .return_once(|id, new| {
            Ok(Some(Employee {
                id,
                name: new.name,
                email: new.email,
                role: new.role,
                manager_id: new.manager_id,
                country: new.country,
            }))
        });

    let service = make_service(managers, employees);
    let draft = EmployeeDraft {
        manager_id: None,
        country: None,
        ..employee_draft()
    };
    let updated = service.update_employee(2, draft).await.expect("update");

    assert_eq!(updated.manager_id, Some(1));
}

#[tokio::test]
async fn delete_employee_returns_the_removed_record() {
    let managers = MockManagerRepository::new();
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_delete()
        .times(1)
        .return_once(|_| Ok(Some(ravi())));

    let service = make_service(managers, employees);
    let removed = service.delete_employee(2).await.expect("delete");

    assert_eq!(removed.name, "Ravi");
}

#[tokio::test]
async fn create_manager_validates_the_parent() {
    let mut managers = MockManagerRepository::new();
    managers.expect_find().times(1).return_once(|_| Ok(None));
    let employees = MockEmployeeRepository::new();

    let service = make_service(managers, employees);
    let draft = ManagerDraft {
        name: "Bina".to_owned(),
        email: "bina@example.com".to_owned(),
        role: "Manager".to_owned(),
        manager_id: Some(99),
    };
    let error = service
        .create_manager(draft)
        .await
        .expect_err("unknown parent");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Manager not found");
}

#[tokio::test]
async fn update_manager_rejects_self_reference() {
    let mut managers = MockManagerRepository::new();
    managers
        .expect_find()
        .times(1)
        .return_once(|_| Ok(Some(asha())));
    let employees = MockEmployeeRepository::new();

    let service = make_service(managers, employees);
    let draft = ManagerDraft {
        name: "Asha".to_owned(),
        email: "asha@example.com".to_owned(),
        role: "Manager".to_owned(),
        manager_id: Some(1),
    };
    let error = service
        .update_manager(1, draft)
        .await
        .expect_err("self reference");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn delete_manager_maps_held_references_to_conflict() {
    let mut managers = MockManagerRepository::new();
    managers
        .expect_delete()
        .times(1)
        .return_once(|_| Err(ManagerRepositoryError::in_use(1)));
    let employees = MockEmployeeRepository::new();

    let service = make_service(managers, employees);
    let error = service.delete_manager(1).await.expect_err("in use");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), "Manager still has direct reports");
    assert_eq!(error.details(), Some(&json!({ "managerId": 1 })));
}

#[tokio::test]
async fn upload_creates_unseen_managers_once() {
    let mut managers = MockManagerRepository::new();
    managers
        .expect_find_by_name()
        .times(1)
        .withf(|name| name == "Asha")
        .return_once(|_| Ok(None));
    managers
        .expect_insert()
        .times(1)
        .withf(|new| {
            new.name == "Asha" && new.email == "asha@example.com" && new.role == "Manager"
        })
        .return_once(|_| Ok(asha()));
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_insert()
        .times(2)
        .withf(|new| new.manager_id == Some(1))
        .returning(|new| {
            Ok(Employee {
                id: 7,
                name: new.name,
                email: new.email,
                role: new.role,
                manager_id: new.manager_id,
                country: new.country,
            })
        });

    let service = make_service(managers, employees);
    let records = vec![
        UploadRecord {
            name: "Ravi".to_owned(),
            email: "ravi@example.com".to_owned(),
            role: "Engineer".to_owned(),
            country: None,
            path: vec!["Asha".to_owned(), "Ravi".to_owned()],
        },
        UploadRecord {
            name: "Sana".to_owned(),
            email: "sana@example.com".to_owned(),
            role: "Designer".to_owned(),
            country: Some("Ireland".to_owned()),
            path: vec!["Asha".to_owned(), "Sana".to_owned()],
        },
    ];
    let summary = service.upload(records).await.expect("upload");

    assert_eq!(summary.employees_created, 2);
    assert_eq!(summary.managers_created, 1);
}

#[tokio::test]
async fn upload_reuses_existing_managers() {
    let mut managers = MockManagerRepository::new();
    managers
        .expect_find_by_name()
        .times(1)
        .return_once(|_| Ok(Some(asha())));
    managers.expect_insert().times(0);
    let mut employees = MockEmployeeRepository::new();
    employees.expect_insert().times(1).returning(|new| {
        Ok(Employee {
            id: 7,
            name: new.name,
            email: new.email,
            role: new.role,
            manager_id: new.manager_id,
            country: new.country,
        })
    });

    let service = make_service(managers, employees);
    let records = vec![UploadRecord {
        name: "Ravi".to_owned(),
        email: "ravi@example.com".to_owned(),
        role: "Engineer".to_owned(),
        country: None,
        path: vec!["Asha".to_owned()],
    }];
    let summary = service.upload(records).await.expect("upload");

    assert_eq!(summary.managers_created, 0);
    assert_eq!(summary.employees_created, 1);
}

#[tokio::test]
async fn upload_rejects_records_without_a_path() {
    let managers = MockManagerRepository::new();
    let employees = MockEmployeeRepository::new();

    let service = make_service(managers, employees);
    let records = vec![UploadRecord {
        name: "Ravi".to_owned(),
        email: "ravi@example.com".to_owned(),
        role: "Engineer".to_owned(),
        country: None,
        path: Vec::new(),
    }];
    let error = service.upload(records).await.expect_err("empty path");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error.details(),
        Some(&json!({ "index": 0, "field": "path" })),
    );
}

#[tokio::test]
async fn duplicate_emails_map_to_conflict() {
    let mut managers = MockManagerRepository::new();
    managers
        .expect_find()
        .times(1)
        .return_once(|_| Ok(Some(asha())));
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_insert()
        .times(1)
        .return_once(|_| Err(EmployeeRepositoryError::duplicate_email("ravi@example.com")));

    let service = make_service(managers, employees);
    let error = service
        .create_employee(employee_draft())
        .await
        .expect_err("duplicate");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), "Email already in use");
}

#[tokio::test]
async fn repository_outages_surface_as_service_unavailable() {
    let managers = MockManagerRepository::new();
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_search()
        .times(1)
        .return_once(|_| Err(EmployeeRepositoryError::connection("pool exhausted")));

    let service = make_service(managers, employees);
    let error = service.search(None).await.expect_err("unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
