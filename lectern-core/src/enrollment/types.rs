//! Enrollment operation outcomes

use serde::{Deserialize, Serialize};

/// Result of an enroll call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollOutcome {
    /// A new enrollment record was created
    Created,
    /// The learner was already enrolled; nothing changed
    AlreadyEnrolled,
}

/// Result of an unenroll call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnenrollOutcome {
    /// An enrollment record was removed
    Removed,
    /// There was nothing to remove; still success
    NoOp,
}

/// What a learner gets back from completing a module
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionReceipt {
    /// Learner's point total after the award
    pub points: u64,
    /// Badges currently held, passed through untouched
    pub badges: Vec<String>,
}

/// Cross-course progress rollup for one learner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnerSummary {
    pub email: String,
    pub name: String,
    pub points: u64,
    pub badges: Vec<String>,
    /// Number of active enrollments
    pub enrollments: u32,
    /// Completed modules summed across all enrollments
    pub completed_modules: u32,
}
