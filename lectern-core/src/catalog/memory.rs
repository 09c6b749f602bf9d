//! In-memory course catalog

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::error::CatalogError;
use super::traits::CourseCatalog;
use super::types::{Course, CourseModule, CoursePatch, NewCourse, Quiz};

/// In-memory catalog for tests and ephemeral deployments
pub struct MemoryCatalog {
    courses: RwLock<HashMap<i64, Course>>,
    modules: RwLock<HashMap<i64, Vec<CourseModule>>>,
    quizzes: RwLock<HashMap<String, Quiz>>,
    next_id: AtomicI64,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self {
            courses: RwLock::new(HashMap::new()),
            modules: RwLock::new(HashMap::new()),
            quizzes: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CourseCatalog for MemoryCatalog {
    async fn course_exists(&self, course_id: i64) -> Result<bool, CatalogError> {
        Ok(self.courses.read().await.contains_key(&course_id))
    }

    async fn get_course(&self, course_id: i64) -> Result<Option<Course>, CatalogError> {
        Ok(self.courses.read().await.get(&course_id).cloned())
    }

    async fn list_courses(&self) -> Result<Vec<Course>, CatalogError> {
        let map = self.courses.read().await;
        let mut courses: Vec<Course> = map.values().cloned().collect();
        courses.sort_by_key(|c| c.id);
        Ok(courses)
    }

    async fn create_course(&self, new: NewCourse) -> Result<Course, CatalogError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let course = new.into_course(id);
        self.courses.write().await.insert(id, course.clone());
        Ok(course)
    }

    async fn patch_course(
        &self,
        course_id: i64,
        patch: CoursePatch,
    ) -> Result<Option<Course>, CatalogError> {
        let mut map = self.courses.write().await;
        match map.get_mut(&course_id) {
            Some(course) => {
                course.apply(patch);
                Ok(Some(course.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_course(&self, course_id: i64) -> Result<bool, CatalogError> {
        let removed = self.courses.write().await.remove(&course_id).is_some();
        if removed {
            self.modules.write().await.remove(&course_id);
        }
        Ok(removed)
    }

    async fn modules_for_course(&self, course_id: i64) -> Result<Vec<CourseModule>, CatalogError> {
        if !self.courses.read().await.contains_key(&course_id) {
            return Err(CatalogError::CourseNotFound(course_id));
        }
        let map = self.modules.read().await;
        let mut modules = map.get(&course_id).cloned().unwrap_or_default();
        modules.sort_by(|a, b| a.position.cmp(&b.position).then(a.id.cmp(&b.id)));
        Ok(modules)
    }

    async fn put_modules(
        &self,
        course_id: i64,
        modules: Vec<CourseModule>,
    ) -> Result<(), CatalogError> {
        if !self.courses.read().await.contains_key(&course_id) {
            return Err(CatalogError::CourseNotFound(course_id));
        }
        self.modules.write().await.insert(course_id, modules);
        Ok(())
    }

    async fn quiz(&self, quiz_id: &str) -> Result<Option<Quiz>, CatalogError> {
        Ok(self.quizzes.read().await.get(quiz_id).cloned())
    }

    async fn put_quiz(&self, quiz: Quiz) -> Result<(), CatalogError> {
        self.quizzes.write().await.insert(quiz.id.clone(), quiz);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::{Question, QuestionKind};

    fn sample_course(title: &str) -> NewCourse {
        NewCourse {
            title: title.into(),
            description: "A course".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let catalog = MemoryCatalog::new();
        let first = catalog.create_course(sample_course("One")).await.unwrap();
        let second = catalog.create_course(sample_course("Two")).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert!(catalog.course_exists(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_patch_updates_present_fields_only() {
        let catalog = MemoryCatalog::new();
        let course = catalog.create_course(sample_course("One")).await.unwrap();

        let patched = catalog
            .patch_course(
                course.id,
                CoursePatch {
                    title: Some("Renamed".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(patched.title, "Renamed");
        assert_eq!(patched.description, "A course");
    }

    #[tokio::test]
    async fn test_patch_missing_course_is_none() {
        let catalog = MemoryCatalog::new();
        let result = catalog
            .patch_course(99, CoursePatch::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_course_and_modules() {
        let catalog = MemoryCatalog::new();
        let course = catalog.create_course(sample_course("One")).await.unwrap();
        catalog
            .put_modules(
                course.id,
                vec![CourseModule {
                    id: "m1".into(),
                    course_id: course.id,
                    title: "Intro".into(),
                    content: String::new(),
                    estimated_min: None,
                    position: 0,
                }],
            )
            .await
            .unwrap();

        assert!(catalog.delete_course(course.id).await.unwrap());
        assert!(!catalog.delete_course(course.id).await.unwrap());
        assert!(matches!(
            catalog.modules_for_course(course.id).await,
            Err(CatalogError::CourseNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_modules_ordered_by_position() {
        let catalog = MemoryCatalog::new();
        let course = catalog.create_course(sample_course("One")).await.unwrap();

        let module = |id: &str, position: u32| CourseModule {
            id: id.into(),
            course_id: course.id,
            title: id.into(),
            content: String::new(),
            estimated_min: None,
            position,
        };
        catalog
            .put_modules(course.id, vec![module("m3", 2), module("m1", 0), module("m2", 1)])
            .await
            .unwrap();

        let modules = catalog.modules_for_course(course.id).await.unwrap();
        let ids: Vec<&str> = modules.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2", "m3"]);
    }

    #[tokio::test]
    async fn test_quiz_questions_missing_quiz_fails() {
        let catalog = MemoryCatalog::new();
        let err = catalog.quiz_questions("nope").await.unwrap_err();
        assert!(matches!(err, CatalogError::QuizNotFound(_)));
    }

    #[tokio::test]
    async fn test_put_quiz_replaces() {
        let catalog = MemoryCatalog::new();
        let question = Question {
            id: "q1".into(),
            kind: QuestionKind::TrueFalse,
            prompt: "The borrow checker runs at compile time.".into(),
            options: Vec::new(),
            correct_index: None,
            correct_bool: Some(true),
            difficulty: None,
        };
        catalog
            .put_quiz(Quiz {
                id: "quiz_1".into(),
                course_id: Some(1),
                questions: vec![question.clone()],
            })
            .await
            .unwrap();

        catalog
            .put_quiz(Quiz {
                id: "quiz_1".into(),
                course_id: Some(1),
                questions: Vec::new(),
            })
            .await
            .unwrap();

        let quiz = catalog.quiz("quiz_1").await.unwrap().unwrap();
        assert!(quiz.questions.is_empty());
    }
}
