//! Seed command for loading catalog fixtures
//!
//! Fixture files are JSON documents listing courses with their modules and
//! an optional quiz. Courses get catalog-assigned ids, so fixtures never
//! carry them.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;
use tracing::debug;

use lectern_core::catalog::{
    CourseCatalog, CourseModule, CoursePatch, NewCourse, Question, Quiz,
};
use lectern_core::storage::SqliteStore;

use crate::config::{ConfigLoader, default_db_path};

/// Arguments for the seed command
#[derive(Debug, Args)]
pub struct SeedArgs {
    /// JSON fixture file with courses, modules, and quizzes
    pub file: PathBuf,

    /// SQLite database file to seed
    #[arg(long)]
    pub db: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    courses: Vec<SeedCourse>,
}

#[derive(Debug, Deserialize)]
struct SeedCourse {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    enroll_count: u32,
    #[serde(default)]
    modules: Vec<SeedModule>,
    #[serde(default)]
    quiz: Option<SeedQuiz>,
}

#[derive(Debug, Deserialize)]
struct SeedModule {
    id: String,
    title: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    estimated_min: Option<u32>,
    #[serde(default)]
    position: u32,
}

#[derive(Debug, Deserialize)]
struct SeedQuiz {
    /// Defaults to `quiz_<course id>` when unset
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    questions: Vec<Question>,
}

#[derive(Debug, Default)]
struct SeedReport {
    courses: usize,
    modules: usize,
    quizzes: usize,
}

/// Run the seed command
pub async fn run(args: SeedArgs) -> Result<()> {
    let raw = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let fixture: SeedFile = serde_json::from_str(&raw)
        .with_context(|| format!("invalid fixture file {}", args.file.display()))?;

    let db = match args.db {
        Some(path) => path,
        None => match ConfigLoader::load()?.server.db {
            Some(path) => path,
            None => default_db_path()?,
        },
    };

    let store = SqliteStore::open(&db)?;
    let report = seed_catalog(&store, fixture).await?;

    println!(
        "Seeded {} courses, {} modules, {} quizzes into {}",
        report.courses,
        report.modules,
        report.quizzes,
        db.display()
    );
    Ok(())
}

async fn seed_catalog(catalog: &dyn CourseCatalog, fixture: SeedFile) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for entry in fixture.courses {
        let course = catalog
            .create_course(NewCourse {
                title: entry.title,
                description: entry.description,
                difficulty: entry.difficulty,
                tags: entry.tags,
                enroll_count: entry.enroll_count,
                quiz_id: None,
            })
            .await?;

        let modules: Vec<CourseModule> = entry
            .modules
            .into_iter()
            .enumerate()
            .map(|(idx, m)| CourseModule {
                id: m.id,
                course_id: course.id,
                title: m.title,
                content: m.content,
                estimated_min: m.estimated_min,
                // Fixtures without explicit positions keep their file order
                position: if m.position == 0 { idx as u32 + 1 } else { m.position },
            })
            .collect();
        report.modules += modules.len();
        if !modules.is_empty() {
            catalog.put_modules(course.id, modules).await?;
        }

        if let Some(quiz) = entry.quiz {
            let quiz_id = quiz
                .id
                .unwrap_or_else(|| format!("quiz_{}", course.id));
            catalog
                .put_quiz(Quiz {
                    id: quiz_id.clone(),
                    course_id: Some(course.id),
                    questions: quiz.questions,
                })
                .await?;
            catalog
                .patch_course(
                    course.id,
                    CoursePatch {
                        quiz_id: Some(quiz_id),
                        ..Default::default()
                    },
                )
                .await?;
            report.quizzes += 1;
        }

        debug!("Seeded course {} ({})", course.id, course.title);
        report.courses += 1;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_core::catalog::MemoryCatalog;

    const FIXTURE: &str = r#"{
        "courses": [
            {
                "title": "Rust Fundamentals",
                "description": "Ownership and borrowing",
                "difficulty": "beginner",
                "tags": ["rust"],
                "enroll_count": 120,
                "modules": [
                    {"id": "m1", "title": "Ownership", "estimated_min": 15},
                    {"id": "m2", "title": "Borrowing", "estimated_min": 20}
                ],
                "quiz": {
                    "id": "quiz_rust",
                    "questions": [
                        {
                            "id": "q1",
                            "kind": "mcq",
                            "prompt": "Who owns a moved value?",
                            "options": ["caller", "callee"],
                            "correct_index": 1
                        }
                    ]
                }
            },
            {
                "title": "Async Rust",
                "quiz": {"questions": []}
            }
        ]
    }"#;

    #[tokio::test]
    async fn test_seed_catalog_creates_courses_and_links_quizzes() {
        let catalog = MemoryCatalog::new();
        let fixture: SeedFile = serde_json::from_str(FIXTURE).unwrap();

        let report = seed_catalog(&catalog, fixture).await.unwrap();
        assert_eq!(report.courses, 2);
        assert_eq!(report.modules, 2);
        assert_eq!(report.quizzes, 2);

        let courses = catalog.list_courses().await.unwrap();
        assert_eq!(courses.len(), 2);

        let rust = &courses[0];
        assert_eq!(rust.title, "Rust Fundamentals");
        assert_eq!(rust.quiz_id.as_deref(), Some("quiz_rust"));

        let quiz = catalog.quiz("quiz_rust").await.unwrap().unwrap();
        assert_eq!(quiz.course_id, Some(rust.id));
        assert_eq!(quiz.questions.len(), 1);
    }

    #[tokio::test]
    async fn test_seed_assigns_positions_from_file_order() {
        let catalog = MemoryCatalog::new();
        let fixture: SeedFile = serde_json::from_str(FIXTURE).unwrap();

        seed_catalog(&catalog, fixture).await.unwrap();

        let courses = catalog.list_courses().await.unwrap();
        let modules = catalog.modules_for_course(courses[0].id).await.unwrap();
        let positions: Vec<u32> = modules.iter().map(|m| m.position).collect();
        assert_eq!(positions, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_seed_defaults_quiz_id_from_course() {
        let catalog = MemoryCatalog::new();
        let fixture: SeedFile = serde_json::from_str(FIXTURE).unwrap();

        seed_catalog(&catalog, fixture).await.unwrap();

        let courses = catalog.list_courses().await.unwrap();
        let asynchrony = &courses[1];
        let expected = format!("quiz_{}", asynchrony.id);
        assert_eq!(asynchrony.quiz_id.as_deref(), Some(expected.as_str()));
        assert!(catalog.quiz(&expected).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_seed_into_sqlite_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteStore::open(dir.path().join("seed.db")).unwrap();
        let fixture: SeedFile = serde_json::from_str(FIXTURE).unwrap();

        let report = seed_catalog(&store, fixture).await.unwrap();
        assert_eq!(report.courses, 2);

        let courses = store.list_courses().await.unwrap();
        assert_eq!(courses.len(), 2);
        let modules = store.modules_for_course(courses[0].id).await.unwrap();
        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0].id, "m1");
    }
}
