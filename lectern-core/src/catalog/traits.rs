//! Course catalog trait

use async_trait::async_trait;

use super::error::CatalogError;
use super::types::{Course, CourseModule, CoursePatch, NewCourse, Question, Quiz};

/// Read and administer the course catalog.
///
/// Enrollment logic only consults `course_exists` and the quiz accessors;
/// the CRUD surface exists for seeding and the admin API.
#[async_trait]
pub trait CourseCatalog: Send + Sync {
    async fn course_exists(&self, course_id: i64) -> Result<bool, CatalogError>;

    async fn get_course(&self, course_id: i64) -> Result<Option<Course>, CatalogError>;

    async fn list_courses(&self) -> Result<Vec<Course>, CatalogError>;

    async fn create_course(&self, new: NewCourse) -> Result<Course, CatalogError>;

    /// Apply a partial update. Returns None when the course does not exist.
    async fn patch_course(
        &self,
        course_id: i64,
        patch: CoursePatch,
    ) -> Result<Option<Course>, CatalogError>;

    /// Remove a course and its modules. Returns true if a course was removed.
    async fn delete_course(&self, course_id: i64) -> Result<bool, CatalogError>;

    /// Modules for a course ordered by position.
    ///
    /// Fails with [`CatalogError::CourseNotFound`] when the course does not exist.
    async fn modules_for_course(&self, course_id: i64) -> Result<Vec<CourseModule>, CatalogError>;

    /// Replace all modules for a course.
    async fn put_modules(
        &self,
        course_id: i64,
        modules: Vec<CourseModule>,
    ) -> Result<(), CatalogError>;

    async fn quiz(&self, quiz_id: &str) -> Result<Option<Quiz>, CatalogError>;

    /// Replace a quiz and its questions.
    async fn put_quiz(&self, quiz: Quiz) -> Result<(), CatalogError>;

    /// Questions for a quiz in presentation order.
    ///
    /// Fails with [`CatalogError::QuizNotFound`] when the quiz does not exist.
    async fn quiz_questions(&self, quiz_id: &str) -> Result<Vec<Question>, CatalogError> {
        match self.quiz(quiz_id).await? {
            Some(quiz) => Ok(quiz.questions),
            None => Err(CatalogError::QuizNotFound(quiz_id.to_string())),
        }
    }
}
