//! Progress storage error types

use thiserror::Error;

/// Errors for enrollment and learner storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Enrollment not found: {0}")]
    EnrollmentNotFound(String),

    #[error("Learner not found: {0}")]
    LearnerNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Migration failed: {0}")]
    Migration(String),
}
