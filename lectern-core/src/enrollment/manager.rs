//! Enrollment orchestration

use std::sync::Arc;

use crate::catalog::CourseCatalog;
use crate::error::EnrollmentError;
use crate::progress::{EnrollmentKey, LearnerDirectory, ProgressStore, QuizScoreEntry};

use super::types::{CompletionReceipt, EnrollOutcome, LearnerSummary, UnenrollOutcome};

/// Points granted on every module completion call
pub const POINTS_PER_MODULE: u64 = 5;

/// Coordinates enrollment state across the progress store, the learner
/// directory, and the course catalog.
///
/// Operations are designed to be retried: enrolling twice, completing the
/// same module twice, and unenrolling when nothing is enrolled all succeed.
/// The one exception is the per-call point award, which is granted on every
/// completion call by design.
pub struct EnrollmentManager {
    store: Arc<dyn ProgressStore>,
    learners: Arc<dyn LearnerDirectory>,
    catalog: Arc<dyn CourseCatalog>,
}

impl EnrollmentManager {
    pub fn new(
        store: Arc<dyn ProgressStore>,
        learners: Arc<dyn LearnerDirectory>,
        catalog: Arc<dyn CourseCatalog>,
    ) -> Self {
        Self {
            store,
            learners,
            catalog,
        }
    }

    /// Enroll a learner in a course.
    ///
    /// Creates the learner record on first contact. Fails with
    /// [`EnrollmentError::CourseNotFound`] when the course is not in the
    /// catalog; enrolling twice is a success reporting
    /// [`EnrollOutcome::AlreadyEnrolled`].
    pub async fn enroll(
        &self,
        learner_key: &str,
        course_id: i64,
    ) -> Result<EnrollOutcome, EnrollmentError> {
        let learner = self.learners.resolve(learner_key, learner_key)?;

        if !self.catalog.course_exists(course_id).await? {
            return Err(EnrollmentError::CourseNotFound(course_id));
        }

        let key = EnrollmentKey::new(&learner.email, course_id);
        if self.store.get(&key)?.is_some() {
            return Ok(EnrollOutcome::AlreadyEnrolled);
        }

        self.store.get_or_create(&key)?;
        tracing::debug!("{} enrolled in course {}", learner.email, course_id);
        Ok(EnrollOutcome::Created)
    }

    /// Remove a learner's enrollment.
    ///
    /// Never errors for missing state: an unknown learner or an absent
    /// enrollment reports [`UnenrollOutcome::NoOp`].
    pub async fn unenroll(
        &self,
        learner_key: &str,
        course_id: i64,
    ) -> Result<UnenrollOutcome, EnrollmentError> {
        let Some(learner) = self.learners.find(learner_key)? else {
            return Ok(UnenrollOutcome::NoOp);
        };

        let key = EnrollmentKey::new(&learner.email, course_id);
        if self.store.delete(&key)? {
            tracing::debug!("{} unenrolled from course {}", learner.email, course_id);
            Ok(UnenrollOutcome::Removed)
        } else {
            Ok(UnenrollOutcome::NoOp)
        }
    }

    /// Record a module completion and award points.
    ///
    /// Completing a module implies enrollment intent, so a missing
    /// enrollment is created through the same path as [`enroll`]. The
    /// module joins the completed set only once, but the resume marker and
    /// the point award apply on every call, repeats included.
    ///
    /// [`enroll`]: EnrollmentManager::enroll
    pub async fn complete_module(
        &self,
        learner_key: &str,
        course_id: i64,
        module_id: &str,
    ) -> Result<CompletionReceipt, EnrollmentError> {
        let learner = self.learners.resolve(learner_key, learner_key)?;
        let key = EnrollmentKey::new(&learner.email, course_id);

        if self.store.get(&key)?.is_none() {
            match self.enroll(learner_key, course_id).await {
                Ok(_) => {}
                Err(EnrollmentError::CourseNotFound(_)) => {
                    return Err(EnrollmentError::EnrollFailed {
                        learner: learner.email.clone(),
                        course_id,
                    });
                }
                Err(err) => return Err(err),
            }
            if self.store.get(&key)?.is_none() {
                return Err(EnrollmentError::EnrollFailed {
                    learner: learner.email.clone(),
                    course_id,
                });
            }
        }

        self.store.update(&key, &mut |record| {
            record.complete(module_id);
        })?;

        let points = self.learners.add_points(&learner.email, POINTS_PER_MODULE)?;
        let badges = self
            .learners
            .find(&learner.email)?
            .map(|l| l.badges)
            .unwrap_or_default();

        tracing::debug!(
            "{} completed module {} in course {} ({} points total)",
            learner.email,
            module_id,
            course_id,
            points
        );

        Ok(CompletionReceipt { points, badges })
    }

    /// Append a quiz score to the learner's enrollment for `course_id`.
    ///
    /// Scores are history, not progress: nothing else in the record moves
    /// and no points are granted here.
    pub async fn record_quiz_score(
        &self,
        learner_key: &str,
        course_id: i64,
        quiz_id: &str,
        percent: u8,
    ) -> Result<(), EnrollmentError> {
        let learner = self
            .learners
            .find(learner_key)?
            .ok_or_else(|| EnrollmentError::LearnerNotFound(learner_key.to_string()))?;

        let key = EnrollmentKey::new(&learner.email, course_id);
        let entry = QuizScoreEntry::new(quiz_id, percent);
        self.store.update(&key, &mut |record| {
            record.quiz_scores.push(entry.clone());
        })?;
        Ok(())
    }

    /// Cross-course rollup for one learner.
    ///
    /// Fails with [`EnrollmentError::LearnerNotFound`] for learners the
    /// system has never seen; summaries do not create records.
    pub async fn summary(&self, learner_key: &str) -> Result<LearnerSummary, EnrollmentError> {
        let learner = self
            .learners
            .find(learner_key)?
            .ok_or_else(|| EnrollmentError::LearnerNotFound(learner_key.to_string()))?;

        let enrollments = self.store.list_for_learner(&learner.email)?;
        let completed_modules = enrollments
            .iter()
            .map(|e| e.completed_modules.len() as u32)
            .sum();

        Ok(LearnerSummary {
            email: learner.email,
            name: learner.name,
            points: learner.points,
            badges: learner.badges,
            enrollments: enrollments.len() as u32,
            completed_modules,
        })
    }
}
