//! lectern-core: Core library for the lectern enrollment and progress engine
//!
//! This crate provides the foundational components for lectern:
//!
//! - **Enrollment orchestration** - [`EnrollmentManager`] for enroll, unenroll,
//!   module completion, and learner summaries
//! - **Progress storage** - [`ProgressStore`] and [`LearnerDirectory`] traits with
//!   [`MemoryProgressStore`] and [`SqliteStore`] implementations
//! - **Course catalog** - [`CourseCatalog`] trait over courses, modules, and quizzes
//! - **Quiz scoring** - [`quiz::evaluate`] for pure answer-key grading
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use lectern_core::{EnrollmentManager, MemoryCatalog, MemoryProgressStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(MemoryProgressStore::new());
//! let catalog = Arc::new(MemoryCatalog::new());
//! let manager = EnrollmentManager::new(store.clone(), store, catalog);
//!
//! manager.enroll("alice@example.com", 1).await?;
//! let receipt = manager.complete_module("alice@example.com", 1, "m1").await?;
//! println!("{} points", receipt.points);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod enrollment;
pub mod error;
pub mod progress;
pub mod quiz;
pub mod storage;

// Re-export key types for convenience
pub use catalog::{
    CatalogError, Course, CourseCatalog, CourseModule, CoursePatch, MemoryCatalog, NewCourse,
    Question, QuestionKind, Quiz,
};
pub use enrollment::{
    CompletionReceipt, EnrollOutcome, EnrollmentManager, LearnerSummary, POINTS_PER_MODULE,
    UnenrollOutcome,
};
pub use error::{EnrollmentError, LecternError};
pub use progress::{
    Enrollment, EnrollmentKey, Learner, LearnerDirectory, MemoryProgressStore, ProgressStore,
    QuizScoreEntry, StoreError,
};
pub use quiz::{AnswerSheet, POINTS_PER_CORRECT, QuizScore, evaluate};
pub use storage::SqliteStore;
