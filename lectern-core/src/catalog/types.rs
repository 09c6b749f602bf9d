//! Course catalog types

use serde::{Deserialize, Serialize};

/// Kind of quiz question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    #[serde(rename = "mcq")]
    MultipleChoice,
    #[serde(rename = "tf")]
    TrueFalse,
    /// Catch-all for kinds this engine does not score
    #[serde(other)]
    Unknown,
}

impl QuestionKind {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MultipleChoice => "mcq",
            Self::TrueFalse => "tf",
            Self::Unknown => "unknown",
        }
    }

    /// Parse from database string; unrecognized kinds degrade to Unknown
    pub fn parse(s: &str) -> Self {
        match s {
            "mcq" => Self::MultipleChoice,
            "tf" => Self::TrueFalse,
            _ => Self::Unknown,
        }
    }
}

/// A catalog course
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Catalog-assigned id
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Display-only popularity counter carried from seed data
    #[serde(default)]
    pub enroll_count: u32,
    /// Quiz attached to this course, if any
    #[serde(default)]
    pub quiz_id: Option<String>,
}

impl Course {
    /// Apply a partial update; only present fields change
    pub fn apply(&mut self, patch: CoursePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(difficulty) = patch.difficulty {
            self.difficulty = Some(difficulty);
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(enroll_count) = patch.enroll_count {
            self.enroll_count = enroll_count;
        }
        if let Some(quiz_id) = patch.quiz_id {
            self.quiz_id = Some(quiz_id);
        }
    }
}

/// Payload for creating a course; the catalog assigns the id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewCourse {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub enroll_count: u32,
    #[serde(default)]
    pub quiz_id: Option<String>,
}

impl NewCourse {
    pub fn into_course(self, id: i64) -> Course {
        Course {
            id,
            title: self.title,
            description: self.description,
            difficulty: self.difficulty,
            tags: self.tags,
            enroll_count: self.enroll_count,
            quiz_id: self.quiz_id,
        }
    }
}

/// Partial course update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoursePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub difficulty: Option<String>,
    pub tags: Option<Vec<String>>,
    pub enroll_count: Option<u32>,
    pub quiz_id: Option<String>,
}

/// One unit of course content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseModule {
    /// Opaque module id, unique within its course
    pub id: String,
    pub course_id: i64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Suggested time to finish, in minutes
    #[serde(default)]
    pub estimated_min: Option<u32>,
    /// Sort order within the course
    #[serde(default)]
    pub position: u32,
}

/// A quiz question with its answer key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub kind: QuestionKind,
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<String>,
    /// Index into `options` holding the right answer (mcq only)
    #[serde(default)]
    pub correct_index: Option<u32>,
    /// Expected answer for true/false questions
    #[serde(default)]
    pub correct_bool: Option<bool>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

/// A quiz and its questions in presentation order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    #[serde(default)]
    pub course_id: Option<i64>,
    #[serde(default)]
    pub questions: Vec<Question>,
}
