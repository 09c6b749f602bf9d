//! Answer-key quiz scoring
//!
//! Scoring is a pure function over a question list and a submitted answer
//! sheet. Answers are matched strictly by JSON type: a multiple-choice
//! answer must be an integer index and a true/false answer must be a
//! boolean. Anything else counts as incorrect rather than failing the
//! whole submission.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::{Question, QuestionKind};

/// Points granted per correctly answered question
pub const POINTS_PER_CORRECT: u32 = 10;

/// Submitted answers keyed by question id
pub type AnswerSheet = HashMap<String, Value>;

/// Outcome of scoring one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizScore {
    /// Correct answers as a share of all questions, rounded half up
    pub percent: u8,
    pub points_earned: u32,
    pub correct: u32,
    pub total: u32,
}

/// Score a submission against the quiz's answer key.
///
/// Questions with no matching answer, answers of the wrong JSON type, and
/// questions of an unknown kind all score as incorrect. An empty question
/// list scores 0 out of 0.
pub fn evaluate(questions: &[Question], answers: &AnswerSheet) -> QuizScore {
    if questions.is_empty() {
        return QuizScore {
            percent: 0,
            points_earned: 0,
            correct: 0,
            total: 0,
        };
    }

    let correct = questions
        .iter()
        .filter(|q| is_correct(q, answers.get(&q.id)))
        .count() as u32;
    let total = questions.len() as u32;
    let percent = (f64::from(correct) * 100.0 / f64::from(total)).round() as u8;

    QuizScore {
        percent,
        points_earned: correct * POINTS_PER_CORRECT,
        correct,
        total,
    }
}

fn is_correct(question: &Question, answer: Option<&Value>) -> bool {
    let Some(answer) = answer else {
        return false;
    };
    match question.kind {
        QuestionKind::MultipleChoice => match (answer.as_i64(), question.correct_index) {
            (Some(given), Some(expected)) => given == i64::from(expected),
            _ => false,
        },
        QuestionKind::TrueFalse => match (answer.as_bool(), question.correct_bool) {
            (Some(given), Some(expected)) => given == expected,
            _ => false,
        },
        QuestionKind::Unknown => false,
    }
}
