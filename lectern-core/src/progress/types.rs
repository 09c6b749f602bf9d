//! Core progress types

use serde::{Deserialize, Serialize};

/// Identifies one enrollment: a learner paired with a course
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnrollmentKey {
    /// Learner's external key (their email address)
    pub learner: String,
    /// Catalog course id
    pub course_id: i64,
}

impl EnrollmentKey {
    pub fn new(learner: impl Into<String>, course_id: i64) -> Self {
        Self {
            learner: learner.into(),
            course_id,
        }
    }
}

impl std::fmt::Display for EnrollmentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.learner, self.course_id)
    }
}

/// One recorded quiz attempt inside an enrollment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizScoreEntry {
    pub quiz_id: String,
    /// Rounded score in the range 0..=100
    pub percent: u8,
    /// Unix timestamp (seconds)
    pub recorded_at: i64,
}

impl QuizScoreEntry {
    pub fn new(quiz_id: impl Into<String>, percent: u8) -> Self {
        Self {
            quiz_id: quiz_id.into(),
            percent,
            recorded_at: now_ts(),
        }
    }
}

/// Per-(learner, course) progress record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    /// Learner's external key
    pub learner: String,
    /// Catalog course id
    pub course_id: i64,
    /// Distinct module ids completed so far
    pub completed_modules: Vec<String>,
    /// Most recently completed module, for resume
    pub last_module_id: Option<String>,
    /// Quiz attempts recorded against this enrollment
    pub quiz_scores: Vec<QuizScoreEntry>,
    /// Unix timestamp (seconds)
    pub enrolled_at: i64,
}

impl Enrollment {
    /// Create an empty enrollment with the timestamp set to now
    pub fn new(key: EnrollmentKey) -> Self {
        Self {
            learner: key.learner,
            course_id: key.course_id,
            completed_modules: Vec::new(),
            last_module_id: None,
            quiz_scores: Vec::new(),
            enrolled_at: now_ts(),
        }
    }

    pub fn key(&self) -> EnrollmentKey {
        EnrollmentKey::new(self.learner.clone(), self.course_id)
    }

    /// Record a module completion.
    ///
    /// The resume marker always moves to `module_id`, even when the module
    /// is already in the completed set. Returns true if the module was
    /// newly added.
    pub fn complete(&mut self, module_id: &str) -> bool {
        self.last_module_id = Some(module_id.to_string());
        if self.completed_modules.iter().any(|m| m == module_id) {
            return false;
        }
        self.completed_modules.push(module_id.to_string());
        true
    }
}

/// Learner identity and points ledger entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Learner {
    /// External key; stable across all operations
    pub email: String,
    /// Display name
    pub name: String,
    /// Accumulated points
    pub points: u64,
    /// Badge ids, stored and returned as-is
    pub badges: Vec<String>,
    /// Unix timestamp (seconds)
    pub created_at: i64,
}

impl Learner {
    /// Create a new learner with zero points and no badges
    pub fn new(email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            points: 0,
            badges: Vec::new(),
            created_at: now_ts(),
        }
    }
}

fn now_ts() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enrollment_new_is_empty() {
        let e = Enrollment::new(EnrollmentKey::new("alice@example.com", 7));
        assert_eq!(e.learner, "alice@example.com");
        assert_eq!(e.course_id, 7);
        assert!(e.completed_modules.is_empty());
        assert!(e.last_module_id.is_none());
        assert!(e.quiz_scores.is_empty());
        assert!(e.enrolled_at > 0);
    }

    #[test]
    fn test_complete_adds_module_once() {
        let mut e = Enrollment::new(EnrollmentKey::new("alice@example.com", 7));
        assert!(e.complete("m1"));
        assert!(!e.complete("m1"));
        assert_eq!(e.completed_modules, vec!["m1"]);
    }

    #[test]
    fn test_complete_moves_resume_marker() {
        let mut e = Enrollment::new(EnrollmentKey::new("alice@example.com", 7));
        e.complete("m1");
        e.complete("m2");
        assert_eq!(e.last_module_id.as_deref(), Some("m2"));

        // Revisiting an already-completed module still moves the marker
        e.complete("m1");
        assert_eq!(e.last_module_id.as_deref(), Some("m1"));
        assert_eq!(e.completed_modules, vec!["m1", "m2"]);
    }

    #[test]
    fn test_enrollment_key_display() {
        let key = EnrollmentKey::new("alice@example.com", 42);
        assert_eq!(key.to_string(), "alice@example.com/42");
    }

    #[test]
    fn test_learner_new() {
        let learner = Learner::new("bob@example.com", "bob@example.com");
        assert_eq!(learner.email, "bob@example.com");
        assert_eq!(learner.points, 0);
        assert!(learner.badges.is_empty());
        assert!(learner.created_at > 0);
    }

    #[test]
    fn test_key_roundtrip() {
        let e = Enrollment::new(EnrollmentKey::new("alice@example.com", 3));
        assert_eq!(e.key(), EnrollmentKey::new("alice@example.com", 3));
    }
}
