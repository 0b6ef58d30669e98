//! Tests for the annotations service.

use std::sync::Arc;

use serde_json::json;

use super::AnnotationsService;
use crate::domain::annotations::{Annotation, RegionWrite};
use crate::domain::directory::Employee;
use crate::domain::ports::{
    AnnotationRepositoryError, AnnotationsCommand, AnnotationsQuery, MockAnnotationRepository,
    MockEmployeeRepository,
};
use crate::domain::ErrorCode;

fn make_service(
    annotations: MockAnnotationRepository,
    employees: MockEmployeeRepository,
) -> AnnotationsService<MockAnnotationRepository, MockEmployeeRepository> {
    AnnotationsService::new(Arc::new(annotations), Arc::new(employees))
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

fn full_region() -> RegionWrite {
    RegionWrite {
        x0: Some(100.0),
        x1: Some(300.0),
        y0: Some(150.0),
        y1: Some(250.0),
        page: Some(0),
        snippet: Some("…subscription rate was higher than expected…".to_owned()),
    }
}

#[tokio::test]
async fn region_reports_missing_employee() {
    let annotations = MockAnnotationRepository::new();
    let mut employees = MockEmployeeRepository::new();
    employees.expect_find().times(1).return_once(|_| Ok(None));

    let service = make_service(annotations, employees);
    let error = service.region(99).await.expect_err("missing employee");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Employee not found");
}

#[tokio::test]
async fn region_defaults_to_an_empty_record() {
    let mut annotations = MockAnnotationRepository::new();
    annotations.expect_find().times(1).return_once(|_| Ok(None));
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_find()
        .times(1)
        .return_once(|_| Ok(Some(ravi())));

    let service = make_service(annotations, employees);
    let snapshot = service.region(2).await.expect("region read");

    assert_eq!(snapshot.employee_name, "Ravi");
    assert_eq!(snapshot.record, Annotation::default());
    assert!(!snapshot.record.has_region());
}

#[tokio::test]
async fn region_returns_stored_coordinates() {
    let stored = Annotation {
        x0: Some(100.0),
        x1: Some(300.0),
        y0: Some(150.0),
        y1: Some(250.0),
        page: Some(0),
        snippet: Some("highlighted".to_owned()),
        metadata: None,
    };
    let expected = stored.clone();
    let mut annotations = MockAnnotationRepository::new();
    annotations
        .expect_find()
        .times(1)
        .return_once(move |_| Ok(Some(stored)));
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_find()
        .times(1)
        .return_once(|_| Ok(Some(ravi())));

    let service = make_service(annotations, employees);
    let snapshot = service.region(2).await.expect("region read");

    assert!(snapshot.record.has_region());
    assert_eq!(snapshot.record, expected);
}

#[tokio::test]
async fn replace_region_stores_partial_coordinates() {
    let mut annotations = MockAnnotationRepository::new();
    annotations
        .expect_upsert_region()
        .times(1)
        .return_once(|_, region| {
            Ok(Annotation {
                x0: region.x0,
                x1: region.x1,
                y0: region.y0,
                y1: region.y1,
                page: region.page,
                snippet: region.snippet,
                metadata: None,
            })
        });
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_find()
        .times(1)
        .return_once(|_| Ok(Some(ravi())));

    let service = make_service(annotations, employees);
    let partial = RegionWrite {
        x0: Some(10.0),
        ..RegionWrite::default()
    };
    let snapshot = service.replace_region(2, partial).await.expect("replace");

    assert_eq!(snapshot.record.x0, Some(10.0));
    assert!(!snapshot.record.has_region());
}

#[tokio::test]
async fn replace_region_accepts_the_same_write_twice() {
    let mut annotations = MockAnnotationRepository::new();
    annotations
        .expect_upsert_region()
        .times(2)
        .returning(|_, region| {
            Ok(Annotation {
                x0: region.x0,
                x1: region.x1,
                y0: region.y0,
                y1: region.y1,
                page: region.page,
                snippet: region.snippet,
                metadata: None,
            })
        });
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_find()
        .times(2)
        .returning(|_| Ok(Some(ravi())));

    let service = make_service(annotations, employees);
    let first = service
        .replace_region(2, full_region())
        .await
        .expect("first replace");
    let second = service
        .replace_region(2, full_region())
        .await
        .expect("second replace");

    assert!(second.record.has_region());
    assert_eq!(first.record, second.record);
}

#[tokio::test]
async fn create_region_rejects_partial_coordinates() {
    // Validation happens before any repository call.
    let annotations = MockAnnotationRepository::new();
    let employees = MockEmployeeRepository::new();

    let service = make_service(annotations, employees);
    let partial = RegionWrite {
        x0: Some(100.0),
        x1: Some(300.0),
        y0: Some(150.0),
        y1: Some(250.0),
        page: None,
        snippet: None,
    };
    let error = service
        .create_region(2, partial)
        .await
        .expect_err("partial create");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error.message(),
        "All coordinates (x0, x1, y0, y1, page) are required for creating annotation"
    );
    assert_eq!(error.details(), Some(&json!({ "missing": ["page"] })));
}

#[tokio::test]
async fn create_region_accepts_a_complete_write() {
    let mut annotations = MockAnnotationRepository::new();
    annotations
        .expect_upsert_region()
        .times(1)
        .return_once(|_, region| {
            Ok(Annotation {
                x0: region.x0,
                x1: region.x1,
                y0: region.y0,
                y1: region.y1,
                page: region.page,
                snippet: region.snippet,
                metadata: None,
            })
        });
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_find()
        .times(1)
        .return_once(|_| Ok(Some(ravi())));

    let service = make_service(annotations, employees);
    let snapshot = service
        .create_region(2, full_region())
        .await
        .expect("create");

    assert!(snapshot.record.has_region());
    assert_eq!(snapshot.employee_id, 2);
}

#[tokio::test]
async fn clear_region_preserves_snippet_and_metadata() {
    let mut annotations = MockAnnotationRepository::new();
    annotations.expect_clear_region().times(1).return_once(|_| {
        Ok(Some(Annotation {
            snippet: Some("kept".to_owned()),
            metadata: Some(json!({"reviewed": true})),
            ..Annotation::default()
        }))
    });
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_find()
        .times(1)
        .return_once(|_| Ok(Some(ravi())));

    let service = make_service(annotations, employees);
    let snapshot = service.clear_region(2).await.expect("clear");

    assert!(!snapshot.record.has_region());
    assert_eq!(snapshot.record.snippet.as_deref(), Some("kept"));
    assert_eq!(snapshot.record.metadata, Some(json!({"reviewed": true})));
}

#[tokio::test]
async fn clear_region_succeeds_for_an_unannotated_employee() {
    let mut annotations = MockAnnotationRepository::new();
    annotations
        .expect_clear_region()
        .times(1)
        .return_once(|_| Ok(None));
    let mut employees = MockEmployeeRepository::new();
    employees
        .expect_find()
        .times(1)
        .return_once(|_| Ok(Some(ravi())));

    let service = make_service(annotations, employees);
    let snapshot = service.clear_region(2).await.expect("clear");

    assert_eq!(snapshot.record, Annotation::default());
}

#[tokio::test]
async fn save_metadata_maps_a_missing_employee_to_not_found() {
    let mut annotations = MockAnnotationRepository::new();
    annotations
        .expect_upsert_metadata()
        .times(1)
        .return_once(|_, _| Err(AnnotationRepositoryError::employee_missing(99)));
    let employees = MockEmployeeRepository::new();

    let service = make_service(annotations, employees);
    let error = service
        .save_metadata(99, json!({"reviewed": true}))
        .await
        .expect_err("missing employee");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn metadata_round_trips_the_stored_document() {
    let document = json!({
        "highlights": [{"page": 0, "note": "check this"}],
        "reviewed": false,
    });
    let stored = document.clone();
    let mut annotations = MockAnnotationRepository::new();
    annotations.expect_find().times(1).return_once(move |_| {
        Ok(Some(Annotation {
            metadata: Some(stored),
            ..Annotation::default()
        }))
    });
    let employees = MockEmployeeRepository::new();

    let service = make_service(annotations, employees);
    let loaded = service.metadata(2).await.expect("metadata read");

    assert_eq!(loaded, Some(document));
}

#[tokio::test]
async fn metadata_reads_none_when_absent() {
    let mut annotations = MockAnnotationRepository::new();
    annotations.expect_find().times(1).return_once(|_| Ok(None));
    let employees = MockEmployeeRepository::new();

    let service = make_service(annotations, employees);
    let loaded = service.metadata(2).await.expect("metadata read");

    assert!(loaded.is_none());
}

#[tokio::test]
async fn connection_failures_surface_as_service_unavailable() {
    let mut annotations = MockAnnotationRepository::new();
    annotations
        .expect_find()
        .times(1)
        .return_once(|_| Err(AnnotationRepositoryError::connection("pool exhausted")));
    let employees = MockEmployeeRepository::new();

    let service = make_service(annotations, employees);
    let error = service.metadata(2).await.expect_err("unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
