//! Catalog error types

use thiserror::Error;

use crate::progress::StoreError;

/// Errors for course catalog operations
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Course not found: {0}")]
    CourseNotFound(i64),

    #[error("Quiz not found: {0}")]
    QuizNotFound(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}
