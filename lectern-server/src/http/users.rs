//! Learner REST API endpoints

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use lectern_core::error::EnrollmentError;

use super::api::ErrorResponse;
use crate::AppState;

/// GET /api/users/:email/summary
pub async fn summary(
    State(state): State<Arc<AppState>>,
    Path(email): Path<String>,
) -> impl IntoResponse {
    match state.manager.summary(&email).await {
        Ok(summary) => Json(summary).into_response(),
        Err(e @ EnrollmentError::LearnerNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: e.to_string(),
                code: "LEARNER_NOT_FOUND".into(),
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
