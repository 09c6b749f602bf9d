//! Quiz REST API endpoints
//!
//! The quiz view served here omits the answer key fields; scoring happens
//! server-side against the catalog's stored questions.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use lectern_core::catalog::{CatalogError, CourseCatalog, Question, QuestionKind, Quiz};
use lectern_core::quiz::{self, AnswerSheet, QuizScore};

use super::api::ErrorResponse;
use crate::AppState;

/// A question as shown to learners, without its answer key
#[derive(Debug, Serialize, Deserialize)]
pub struct QuestionView {
    pub id: String,
    pub kind: QuestionKind,
    pub prompt: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

impl From<Question> for QuestionView {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            kind: q.kind,
            prompt: q.prompt,
            options: q.options,
            difficulty: q.difficulty,
        }
    }
}

/// A quiz as shown to learners
#[derive(Debug, Serialize, Deserialize)]
pub struct QuizView {
    pub id: String,
    #[serde(default)]
    pub course_id: Option<i64>,
    pub questions: Vec<QuestionView>,
}

impl From<Quiz> for QuizView {
    fn from(quiz: Quiz) -> Self {
        Self {
            id: quiz.id,
            course_id: quiz.course_id,
            questions: quiz.questions.into_iter().map(QuestionView::from).collect(),
        }
    }
}

/// Body for quiz submissions, answers keyed by question id
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitQuizRequest {
    #[serde(default)]
    pub answers: AnswerSheet,
}

/// Score returned for a quiz submission
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitQuizResponse {
    pub percent: u8,
    pub points_earned: u32,
}

impl From<QuizScore> for SubmitQuizResponse {
    fn from(score: QuizScore) -> Self {
        Self {
            percent: score.percent,
            points_earned: score.points_earned,
        }
    }
}

/// GET /api/quizzes/:quiz_id
pub async fn get_quiz(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<String>,
) -> impl IntoResponse {
    match state.catalog.quiz(&quiz_id).await {
        Ok(Some(quiz)) => Json(QuizView::from(quiz)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Quiz not found: {}", quiz_id),
                code: "QUIZ_NOT_FOUND".into(),
            }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
                code: "INTERNAL_ERROR".into(),
            }),
        )
            .into_response(),
    }
}

/// POST /api/quizzes/:quiz_id/submit
///
/// Stateless: the submission is scored and returned, nothing is written.
pub async fn submit_quiz(
    State(state): State<Arc<AppState>>,
    Path(quiz_id): Path<String>,
    Json(req): Json<SubmitQuizRequest>,
) -> impl IntoResponse {
    match state.catalog.quiz_questions(&quiz_id).await {
        Ok(questions) => {
            let score = quiz::evaluate(&questions, &req.answers);
            Json(SubmitQuizResponse::from(score)).into_response()
        }
        Err(e @ CatalogError::QuizNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: e.to_string(),
                code: "QUIZ_NOT_FOUND".into(),
            }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
                code: "INTERNAL_ERROR".into(),
            }),
        )
            .into_response(),
    }
}
