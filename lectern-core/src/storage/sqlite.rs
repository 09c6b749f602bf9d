//! SQLite-backed storage

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use rusqlite::Connection;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::migrations::Migrator;
use crate::catalog::{
    CatalogError, Course, CourseCatalog, CourseModule, CoursePatch, NewCourse, Question,
    QuestionKind, Quiz,
};
use crate::progress::{
    Enrollment, EnrollmentKey, Learner, LearnerDirectory, ProgressStore, QuizScoreEntry,
    StoreError,
};

/// SQLite store backing enrollments, learners, and the course catalog.
///
/// All three storage traits read and write the same database file, so a
/// single handle can serve as progress store, learner directory, and
/// catalog. The connection mutex serializes writers; per-key ordering
/// falls out of that.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create database at path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init()?;
        Ok(store)
    }

    /// Open in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init()?;
        Ok(store)
    }

    /// Run migrations
    fn init(&self) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        let migrator = Migrator::new(&conn);
        migrator.migrate()
    }

    fn select_enrollment(
        conn: &Connection,
        key: &EnrollmentKey,
    ) -> Result<Option<Enrollment>, StoreError> {
        let mut stmt = conn.prepare(
            "SELECT learner, course_id, completed_modules, last_module_id, quiz_scores, enrolled_at
             FROM enrollments WHERE learner = ?1 AND course_id = ?2",
        )?;

        let mut rows = stmt.query(rusqlite::params![key.learner, key.course_id])?;
        match rows.next()? {
            Some(row) => Ok(Some(Self::row_to_enrollment(row)?)),
            None => Ok(None),
        }
    }

    fn row_to_enrollment(row: &rusqlite::Row) -> Result<Enrollment, rusqlite::Error> {
        let completed_raw: Option<String> = row.get(2)?;
        let scores_raw: Option<String> = row.get(4)?;
        Ok(Enrollment {
            learner: row.get(0)?,
            course_id: row.get(1)?,
            completed_modules: lenient_list(completed_raw),
            last_module_id: row.get(3)?,
            quiz_scores: lenient_list::<QuizScoreEntry>(scores_raw),
            enrolled_at: row.get(5)?,
        })
    }

    fn row_to_learner(row: &rusqlite::Row) -> Result<Learner, rusqlite::Error> {
        let badges_raw: Option<String> = row.get(3)?;
        Ok(Learner {
            email: row.get(0)?,
            name: row.get(1)?,
            points: row.get(2)?,
            badges: lenient_list(badges_raw),
            created_at: row.get(4)?,
        })
    }

    fn row_to_course(row: &rusqlite::Row) -> Result<Course, rusqlite::Error> {
        let tags_raw: Option<String> = row.get(4)?;
        Ok(Course {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            difficulty: row.get(3)?,
            tags: lenient_list(tags_raw),
            enroll_count: row.get(5)?,
            quiz_id: row.get(6)?,
        })
    }

    fn row_to_module(row: &rusqlite::Row) -> Result<CourseModule, rusqlite::Error> {
        Ok(CourseModule {
            id: row.get(0)?,
            course_id: row.get(1)?,
            title: row.get(2)?,
            content: row.get(3)?,
            estimated_min: row.get(4)?,
            position: row.get(5)?,
        })
    }

    fn row_to_question(row: &rusqlite::Row) -> Result<Question, rusqlite::Error> {
        let kind_str: String = row.get(1)?;
        let options_raw: Option<String> = row.get(3)?;
        Ok(Question {
            id: row.get(0)?,
            kind: QuestionKind::parse(&kind_str),
            prompt: row.get(2)?,
            options: lenient_list(options_raw),
            correct_index: row.get(4)?,
            correct_bool: row.get(5)?,
            difficulty: row.get(6)?,
        })
    }

    fn select_course(conn: &Connection, course_id: i64) -> Result<Option<Course>, StoreError> {
        let mut stmt = conn.prepare(
            "SELECT id, title, description, difficulty, tags, enroll_count, quiz_id
             FROM courses WHERE id = ?1",
        )?;
        let mut rows = stmt.query([course_id])?;
        match rows.next()? {
            Some(row) => Ok(Some(Self::row_to_course(row)?)),
            None => Ok(None),
        }
    }

    fn course_exists_sync(conn: &Connection, course_id: i64) -> Result<bool, StoreError> {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM courses WHERE id = ?1",
            [course_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

/// Parse a JSON list column, treating NULL or malformed text as empty
fn lenient_list<T: DeserializeOwned>(raw: Option<String>) -> Vec<T> {
    raw.and_then(|s| serde_json::from_str(&s).ok())
        .unwrap_or_default()
}

fn to_json<T: Serialize>(value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|e| StoreError::Serialization(e.to_string()))
}

impl ProgressStore for SqliteStore {
    fn get_or_create(&self, key: &EnrollmentKey) -> Result<Enrollment, StoreError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR IGNORE INTO enrollments (learner, course_id, completed_modules, last_module_id, quiz_scores, enrolled_at)
             VALUES (?1, ?2, '[]', NULL, '[]', strftime('%s','now'))",
            rusqlite::params![key.learner, key.course_id],
        )?;
        Self::select_enrollment(&conn, key)?
            .ok_or_else(|| StoreError::EnrollmentNotFound(key.to_string()))
    }

    fn get(&self, key: &EnrollmentKey) -> Result<Option<Enrollment>, StoreError> {
        let conn = self.conn.lock().unwrap();
        Self::select_enrollment(&conn, key)
    }

    fn update(
        &self,
        key: &EnrollmentKey,
        mutate: &mut dyn FnMut(&mut Enrollment),
    ) -> Result<Enrollment, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut record = Self::select_enrollment(&conn, key)?
            .ok_or_else(|| StoreError::EnrollmentNotFound(key.to_string()))?;
        mutate(&mut record);
        conn.execute(
            "UPDATE enrollments SET completed_modules = ?3, last_module_id = ?4, quiz_scores = ?5
             WHERE learner = ?1 AND course_id = ?2",
            rusqlite::params![
                key.learner,
                key.course_id,
                to_json(&record.completed_modules)?,
                record.last_module_id,
                to_json(&record.quiz_scores)?,
            ],
        )?;
        Ok(record)
    }

    fn delete(&self, key: &EnrollmentKey) -> Result<bool, StoreError> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "DELETE FROM enrollments WHERE learner = ?1 AND course_id = ?2",
            rusqlite::params![key.learner, key.course_id],
        )?;
        Ok(changed > 0)
    }

    fn list_for_learner(&self, learner: &str) -> Result<Vec<Enrollment>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT learner, course_id, completed_modules, last_module_id, quiz_scores, enrolled_at
             FROM enrollments WHERE learner = ?1 ORDER BY course_id ASC",
        )?;
        let rows = stmt.query_map([learner], |row| Self::row_to_enrollment(row))?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

impl LearnerDirectory for SqliteStore {
    fn resolve(&self, email: &str, name: &str) -> Result<Learner, StoreError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR IGNORE INTO learners (email, name, points, badges, created_at)
             VALUES (?1, ?2, 0, '[]', strftime('%s','now'))",
            rusqlite::params![email, name],
        )?;
        let mut stmt = conn.prepare(
            "SELECT email, name, points, badges, created_at FROM learners WHERE email = ?1",
        )?;
        let mut rows = stmt.query([email])?;
        match rows.next()? {
            Some(row) => Ok(Self::row_to_learner(row)?),
            None => Err(StoreError::LearnerNotFound(email.to_string())),
        }
    }

    fn put(&self, learner: Learner) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO learners (email, name, points, badges, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                learner.email,
                learner.name,
                learner.points,
                to_json(&learner.badges)?,
                learner.created_at,
            ],
        )?;
        Ok(())
    }

    fn find(&self, email: &str) -> Result<Option<Learner>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT email, name, points, badges, created_at FROM learners WHERE email = ?1",
        )?;
        let mut rows = stmt.query([email])?;
        match rows.next()? {
            Some(row) => Ok(Some(Self::row_to_learner(row)?)),
            None => Ok(None),
        }
    }

    fn add_points(&self, email: &str, delta: u64) -> Result<u64, StoreError> {
        let conn = self.conn.lock().unwrap();
        let changed = conn.execute(
            "UPDATE learners SET points = points + ?2 WHERE email = ?1",
            rusqlite::params![email, delta],
        )?;
        if changed == 0 {
            return Err(StoreError::LearnerNotFound(email.to_string()));
        }
        let points: u64 = conn.query_row(
            "SELECT points FROM learners WHERE email = ?1",
            [email],
            |row| row.get(0),
        )?;
        Ok(points)
    }
}

#[async_trait]
impl CourseCatalog for SqliteStore {
    async fn course_exists(&self, course_id: i64) -> Result<bool, CatalogError> {
        let conn = self.conn.lock().unwrap();
        Ok(Self::course_exists_sync(&conn, course_id)?)
    }

    async fn get_course(&self, course_id: i64) -> Result<Option<Course>, CatalogError> {
        let conn = self.conn.lock().unwrap();
        Ok(Self::select_course(&conn, course_id)?)
    }

    async fn list_courses(&self) -> Result<Vec<Course>, CatalogError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(
                "SELECT id, title, description, difficulty, tags, enroll_count, quiz_id
                 FROM courses ORDER BY id ASC",
            )
            .map_err(StoreError::from)?;
        let rows = stmt
            .query_map([], |row| Self::row_to_course(row))
            .map_err(StoreError::from)?;
        let courses = rows
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::from)?;
        Ok(courses)
    }

    async fn create_course(&self, new: NewCourse) -> Result<Course, CatalogError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO courses (title, description, difficulty, tags, enroll_count, quiz_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                new.title,
                new.description,
                new.difficulty,
                to_json(&new.tags)?,
                new.enroll_count,
                new.quiz_id,
            ],
        )
        .map_err(StoreError::from)?;
        let id = conn.last_insert_rowid();
        Ok(new.into_course(id))
    }

    async fn patch_course(
        &self,
        course_id: i64,
        patch: CoursePatch,
    ) -> Result<Option<Course>, CatalogError> {
        let conn = self.conn.lock().unwrap();
        let Some(mut course) = Self::select_course(&conn, course_id)? else {
            return Ok(None);
        };
        course.apply(patch);
        conn.execute(
            "UPDATE courses SET title = ?2, description = ?3, difficulty = ?4, tags = ?5,
                    enroll_count = ?6, quiz_id = ?7
             WHERE id = ?1",
            rusqlite::params![
                course.id,
                course.title,
                course.description,
                course.difficulty,
                to_json(&course.tags)?,
                course.enroll_count,
                course.quiz_id,
            ],
        )
        .map_err(StoreError::from)?;
        Ok(Some(course))
    }

    async fn delete_course(&self, course_id: i64) -> Result<bool, CatalogError> {
        let conn = self.conn.lock().unwrap();
        let changed = conn
            .execute("DELETE FROM courses WHERE id = ?1", [course_id])
            .map_err(StoreError::from)?;
        Ok(changed > 0)
    }

    async fn modules_for_course(&self, course_id: i64) -> Result<Vec<CourseModule>, CatalogError> {
        let conn = self.conn.lock().unwrap();
        if !Self::course_exists_sync(&conn, course_id)? {
            return Err(CatalogError::CourseNotFound(course_id));
        }
        let mut stmt = conn
            .prepare(
                "SELECT id, course_id, title, content, estimated_min, position
                 FROM course_modules WHERE course_id = ?1
                 ORDER BY position ASC, id ASC",
            )
            .map_err(StoreError::from)?;
        let rows = stmt
            .query_map([course_id], |row| Self::row_to_module(row))
            .map_err(StoreError::from)?;
        let modules = rows
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::from)?;
        Ok(modules)
    }

    async fn put_modules(
        &self,
        course_id: i64,
        modules: Vec<CourseModule>,
    ) -> Result<(), CatalogError> {
        let mut conn = self.conn.lock().unwrap();
        if !Self::course_exists_sync(&conn, course_id)? {
            return Err(CatalogError::CourseNotFound(course_id));
        }
        let tx = conn.transaction().map_err(StoreError::from)?;
        tx.execute(
            "DELETE FROM course_modules WHERE course_id = ?1",
            [course_id],
        )
        .map_err(StoreError::from)?;
        for module in &modules {
            tx.execute(
                "INSERT INTO course_modules (id, course_id, title, content, estimated_min, position)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    module.id,
                    course_id,
                    module.title,
                    module.content,
                    module.estimated_min,
                    module.position,
                ],
            )
            .map_err(StoreError::from)?;
        }
        tx.commit().map_err(StoreError::from)?;
        Ok(())
    }

    async fn quiz(&self, quiz_id: &str) -> Result<Option<Quiz>, CatalogError> {
        let conn = self.conn.lock().unwrap();
        let course_id: Option<i64> = {
            let mut stmt = conn
                .prepare("SELECT course_id FROM quizzes WHERE id = ?1")
                .map_err(StoreError::from)?;
            let mut rows = stmt.query([quiz_id]).map_err(StoreError::from)?;
            match rows.next().map_err(StoreError::from)? {
                Some(row) => row.get(0).map_err(StoreError::from)?,
                None => return Ok(None),
            }
        };

        let mut stmt = conn
            .prepare(
                "SELECT id, kind, prompt, options, correct_index, correct_bool, difficulty
                 FROM quiz_questions WHERE quiz_id = ?1
                 ORDER BY position ASC, id ASC",
            )
            .map_err(StoreError::from)?;
        let rows = stmt
            .query_map([quiz_id], |row| Self::row_to_question(row))
            .map_err(StoreError::from)?;
        let questions = rows
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::from)?;

        Ok(Some(Quiz {
            id: quiz_id.to_string(),
            course_id,
            questions,
        }))
    }

    async fn put_quiz(&self, quiz: Quiz) -> Result<(), CatalogError> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction().map_err(StoreError::from)?;
        tx.execute(
            "INSERT OR REPLACE INTO quizzes (id, course_id) VALUES (?1, ?2)",
            rusqlite::params![quiz.id, quiz.course_id],
        )
        .map_err(StoreError::from)?;
        tx.execute("DELETE FROM quiz_questions WHERE quiz_id = ?1", [&quiz.id])
            .map_err(StoreError::from)?;
        for (position, question) in quiz.questions.iter().enumerate() {
            tx.execute(
                "INSERT INTO quiz_questions (id, quiz_id, kind, prompt, options, correct_index, correct_bool, difficulty, position)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                rusqlite::params![
                    question.id,
                    quiz.id,
                    question.kind.as_str(),
                    question.prompt,
                    to_json(&question.options)?,
                    question.correct_index,
                    question.correct_bool,
                    question.difficulty,
                    position as u32,
                ],
            )
            .map_err(StoreError::from)?;
        }
        tx.commit().map_err(StoreError::from)?;
        Ok(())
    }
}
