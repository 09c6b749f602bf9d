//! Error types for lectern-core

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::progress::StoreError;

/// Top-level error type for lectern-core
#[derive(Error, Debug)]
pub enum LecternError {
    #[error("Enrollment error: {0}")]
    Enrollment(#[from] EnrollmentError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

/// Errors from enrollment operations
#[derive(Error, Debug)]
pub enum EnrollmentError {
    #[error("Course not found: {0}")]
    CourseNotFound(i64),

    #[error("Learner not found: {0}")]
    LearnerNotFound(String),

    #[error("Could not enroll {learner} in course {course_id}")]
    EnrollFailed { learner: String, course_id: i64 },

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enrollment_error_course_not_found_displays_correctly() {
        let error = EnrollmentError::CourseNotFound(17);
        assert_eq!(error.to_string(), "Course not found: 17");
    }

    #[test]
    fn enrollment_error_enroll_failed_displays_correctly() {
        let error = EnrollmentError::EnrollFailed {
            learner: "alice@example.com".into(),
            course_id: 3,
        };
        assert!(error.to_string().contains("alice@example.com"));
        assert!(error.to_string().contains("3"));
    }

    #[test]
    fn enrollment_error_converts_from_store_error() {
        let store_error = StoreError::LearnerNotFound("x@example.com".into());
        let error: EnrollmentError = store_error.into();
        assert!(matches!(error, EnrollmentError::Store(_)));
    }

    #[test]
    fn lectern_error_converts_from_enrollment_error() {
        let error: LecternError = EnrollmentError::CourseNotFound(1).into();
        assert!(matches!(error, LecternError::Enrollment(_)));
    }

    #[test]
    fn lectern_error_converts_from_catalog_error() {
        let error: LecternError = CatalogError::QuizNotFound("q".into()).into();
        assert!(matches!(error, LecternError::Catalog(_)));
    }
}
