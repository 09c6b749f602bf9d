//! Progress storage traits

use super::error::StoreError;
use super::types::{Enrollment, EnrollmentKey, Learner};

/// Storage for per-(learner, course) enrollment records.
///
/// Implementations serialize all writes for the same key: `update` observes
/// the latest committed record and its mutator finishes before any other
/// writer for that key runs. Writers for distinct keys do not contend.
pub trait ProgressStore: Send + Sync {
    /// Fetch the enrollment for `key`, creating an empty record if absent.
    fn get_or_create(&self, key: &EnrollmentKey) -> Result<Enrollment, StoreError>;

    /// Fetch the enrollment for `key` if present.
    fn get(&self, key: &EnrollmentKey) -> Result<Option<Enrollment>, StoreError>;

    /// Apply `mutate` to the enrollment for `key` and return the updated record.
    ///
    /// The mutator must be a pure transformation of the record it is handed;
    /// an implementation may invoke it more than once if it retries. Fails
    /// with [`StoreError::EnrollmentNotFound`] when no record exists.
    fn update(
        &self,
        key: &EnrollmentKey,
        mutate: &mut dyn FnMut(&mut Enrollment),
    ) -> Result<Enrollment, StoreError>;

    /// Remove the enrollment for `key`. Returns true if a record was removed.
    fn delete(&self, key: &EnrollmentKey) -> Result<bool, StoreError>;

    /// All enrollments for a learner, ordered by course id.
    fn list_for_learner(&self, learner: &str) -> Result<Vec<Enrollment>, StoreError>;
}

/// Learner identity and points ledger.
pub trait LearnerDirectory: Send + Sync {
    /// Fetch the learner for `email`, creating one named `name` if absent.
    fn resolve(&self, email: &str, name: &str) -> Result<Learner, StoreError>;

    /// Insert or replace a full learner record. Used by seeding.
    fn put(&self, learner: Learner) -> Result<(), StoreError>;

    /// Fetch the learner for `email` if present.
    fn find(&self, email: &str) -> Result<Option<Learner>, StoreError>;

    /// Atomically add `delta` to the learner's points and return the new total.
    ///
    /// Fails with [`StoreError::LearnerNotFound`] when the learner does not exist.
    fn add_points(&self, email: &str, delta: u64) -> Result<u64, StoreError>;
}
