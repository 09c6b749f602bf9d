//! Enrollment lifecycle and progress orchestration

mod manager;
mod types;

pub use manager::{EnrollmentManager, POINTS_PER_MODULE};
pub use types::{CompletionReceipt, EnrollOutcome, LearnerSummary, UnenrollOutcome};
