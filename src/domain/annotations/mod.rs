//! Employee annotations: highlight regions and metadata documents.
//!
//! Each employee may hold at most one annotation, pairing a rectangular
//! highlight region on a source document with an opaque JSON metadata
//! payload. The region and the metadata are written independently, so either
//! half may be present without the other.

use serde_json::Value;

pub mod service;

pub use service::AnnotationsService;

/// The annotation stored for an employee.
///
/// All fields are optional: coordinates arrive through region writes,
/// metadata through metadata writes, and a cleared region leaves snippet and
/// metadata behind.
///
/// # Examples
///
/// ```
/// # use orgdir::domain::annotations::Annotation;
/// let blank = Annotation::default();
/// assert!(!blank.has_region());
///
/// let highlighted = Annotation {
///     x0: Some(100.0),
///     x1: Some(300.0),
///     y0: Some(150.0),
///     y1: Some(250.0),
///     page: Some(0),
///     ..Annotation::default()
/// };
/// assert!(highlighted.has_region());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Annotation {
    /// Left edge of the highlight rectangle.
    pub x0: Option<f64>,
    /// Right edge of the highlight rectangle.
    pub x1: Option<f64>,
    /// Top edge of the highlight rectangle.
    pub y0: Option<f64>,
    /// Bottom edge of the highlight rectangle.
    pub y1: Option<f64>,
    /// Zero-based page index the rectangle sits on.
    pub page: Option<i32>,
    /// Text excerpt captured alongside the region.
    pub snippet: Option<String>,
    /// Opaque metadata document, stored verbatim.
    pub metadata: Option<Value>,
}

impl Annotation {
    /// Whether the annotation carries a complete highlight region.
    ///
    /// A region is complete only when all four edges and the page index are
    /// present. Snippet and metadata play no part in this.
    pub fn has_region(&self) -> bool {
        self.x0.is_some()
            && self.x1.is_some()
            && self.y0.is_some()
            && self.y1.is_some()
            && self.page.is_some()
    }
}

/// A highlight region write, as accepted by the annotation endpoints.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegionWrite {
    /// Left edge of the highlight rectangle.
    pub x0: Option<f64>,
    /// Right edge of the highlight rectangle.
    pub x1: Option<f64>,
    /// Top edge of the highlight rectangle.
    pub y0: Option<f64>,
    /// Bottom edge of the highlight rectangle.
    pub y1: Option<f64>,
    /// Zero-based page index the rectangle sits on.
    pub page: Option<i32>,
    /// Text excerpt captured alongside the region.
    pub snippet: Option<String>,
}

impl RegionWrite {
    /// Names of the coordinate fields absent from this write.
    ///
    /// Used to reject strict creates with a message naming what is missing.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.x0.is_none() {
            missing.push("x0");
        }
        if self.x1.is_none() {
            missing.push("x1");
        }
        if self.y0.is_none() {
            missing.push("y0");
        }
        if self.y1.is_none() {
            missing.push("y1");
        }
        if self.page.is_none() {
            missing.push("page");
        }
        missing
    }
}

/// An employee's annotation state, as returned to inbound adapters.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSnapshot {
    /// The annotated employee.
    pub employee_id: i32,
    /// The employee's name, for response shaping.
    pub employee_name: String,
    /// The stored annotation, empty when the employee was never annotated.
    pub record: Annotation,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case::empty(Annotation::default(), false)]
    #[case::complete(
        Annotation {
            x0: Some(100.0),
            x1: Some(300.0),
            y0: Some(150.0),
            y1: Some(250.0),
            page: Some(0),
            ..Annotation::default()
        },
        true,
    )]
    #[case::missing_page(
        Annotation {
            x0: Some(100.0),
            x1: Some(300.0),
            y0: Some(150.0),
            y1: Some(250.0),
            ..Annotation::default()
        },
        false,
    )]
    #[case::metadata_only(
        Annotation {
            metadata: Some(json!({"reviewed": true})),
            ..Annotation::default()
        },
        false,
    )]
    fn has_region_requires_all_five_coordinates(
        #[case] annotation: Annotation,
        #[case] expected: bool,
    ) {
        assert_eq!(annotation.has_region(), expected);
    }

    #[rstest]
    fn missing_fields_names_each_absent_coordinate() {
        let write = RegionWrite {
            x0: Some(100.0),
            y1: Some(250.0),
            ..RegionWrite::default()
        };
        assert_eq!(write.missing_fields(), vec!["x1", "y0", "page"]);
    }

    #[rstest]
    fn missing_fields_is_empty_for_a_complete_write() {
        let write = RegionWrite {
            x0: Some(100.0),
            x1: Some(300.0),
            y0: Some(150.0),
            y1: Some(250.0),
            page: Some(0),
            snippet: None,
        };
        assert!(write.missing_fields().is_empty());
    }
}
