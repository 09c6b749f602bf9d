//! Enrollment REST API endpoints

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

use lectern_core::enrollment::{EnrollOutcome, UnenrollOutcome};
use lectern_core::error::EnrollmentError;

use super::api::ErrorResponse;
use crate::AppState;

/// Body for enroll and unenroll requests
#[derive(Debug, Serialize, Deserialize)]
pub struct EnrollRequest {
    pub email: String,
    pub course_id: i64,
}

/// Body for module completion requests
#[derive(Debug, Serialize, Deserialize)]
pub struct CompleteRequest {
    pub email: String,
    pub course_id: i64,
    pub module_id: String,
}

/// Result of an enroll call
#[derive(Debug, Serialize, Deserialize)]
pub struct EnrollResponse {
    pub outcome: EnrollOutcome,
}

/// Result of an unenroll call
#[derive(Debug, Serialize, Deserialize)]
pub struct UnenrollResponse {
    pub outcome: UnenrollOutcome,
}

/// POST /api/enrollments/enroll
pub async fn enroll(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EnrollRequest>,
) -> impl IntoResponse {
    match state.manager.enroll(&req.email, req.course_id).await {
        Ok(outcome) => Json(EnrollResponse { outcome }).into_response(),
        Err(e @ EnrollmentError::CourseNotFound(_)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
                code: "COURSE_NOT_FOUND".into(),
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

/// POST /api/enrollments/unenroll
pub async fn unenroll(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EnrollRequest>,
) -> impl IntoResponse {
    match state.manager.unenroll(&req.email, req.course_id).await {
        Ok(outcome) => Json(UnenrollResponse { outcome }).into_response(),
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

/// POST /api/enrollments/complete
pub async fn complete(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CompleteRequest>,
) -> impl IntoResponse {
    match state
        .manager
        .complete_module(&req.email, req.course_id, &req.module_id)
        .await
    {
        Ok(receipt) => Json(receipt).into_response(),
        Err(e @ EnrollmentError::EnrollFailed { .. }) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
                code: "ENROLL_FAILED".into(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;
    use lectern_core::catalog::{CourseCatalog, NewCourse};
    use lectern_core::enrollment::CompletionReceipt;
    use serde_json::json;

    use crate::http::create_router;

    async fn server_with_course() -> (TestServer, i64) {
        let state = Arc::new(AppState::new());
        let course = state
            .catalog
            .create_course(NewCourse {
                title: "Rust Fundamentals".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        let server = TestServer::new(create_router(state)).unwrap();
        (server, course.id)
    }

    #[tokio::test]
    async fn test_enroll_creates_enrollment() {
        let (server, course_id) = server_with_course().await;

        let response = server
            .post("/api/enrollments/enroll")
            .json(&json!({"email": "alice@example.com", "course_id": course_id}))
            .await;
        response.assert_status_ok();

        let body: EnrollResponse = response.json();
        assert!(matches!(body.outcome, EnrollOutcome::Created));
    }

    #[tokio::test]
    async fn test_enroll_twice_reports_already_enrolled() {
        let (server, course_id) = server_with_course().await;
        let payload = json!({"email": "alice@example.com", "course_id": course_id});

        server.post("/api/enrollments/enroll").json(&payload).await;
        let response = server.post("/api/enrollments/enroll").json(&payload).await;
        response.assert_status_ok();

        let body: EnrollResponse = response.json();
        assert!(matches!(body.outcome, EnrollOutcome::AlreadyEnrolled));
    }

    #[tokio::test]
    async fn test_enroll_unknown_course_returns_400() {
        let (server, _) = server_with_course().await;

        let response = server
            .post("/api/enrollments/enroll")
            .json(&json!({"email": "alice@example.com", "course_id": 999}))
            .await;
        response.assert_status_bad_request();

        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "COURSE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_unenroll_after_enroll_reports_removed() {
        let (server, course_id) = server_with_course().await;
        let payload = json!({"email": "alice@example.com", "course_id": course_id});

        server.post("/api/enrollments/enroll").json(&payload).await;
        let response = server
            .post("/api/enrollments/unenroll")
            .json(&payload)
            .await;
        response.assert_status_ok();

        let body: UnenrollResponse = response.json();
        assert!(matches!(body.outcome, UnenrollOutcome::Removed));
    }

    #[tokio::test]
    async fn test_unenroll_absent_is_no_op() {
        let (server, course_id) = server_with_course().await;

        let response = server
            .post("/api/enrollments/unenroll")
            .json(&json!({"email": "ghost@example.com", "course_id": course_id}))
            .await;
        response.assert_status_ok();

        let body: UnenrollResponse = response.json();
        assert!(matches!(body.outcome, UnenrollOutcome::NoOp));
    }

    #[tokio::test]
    async fn test_complete_awards_points() {
        let (server, course_id) = server_with_course().await;

        let response = server
            .post("/api/enrollments/complete")
            .json(&json!({
                "email": "alice@example.com",
                "course_id": course_id,
                "module_id": "m1"
            }))
            .await;
        response.assert_status_ok();

        let body: CompletionReceipt = response.json();
        assert_eq!(body.points, 5);
        assert!(body.badges.is_empty());
    }

    #[tokio::test]
    async fn test_repeat_complete_awards_points_again() {
        let (server, course_id) = server_with_course().await;
        let payload = json!({
            "email": "alice@example.com",
            "course_id": course_id,
            "module_id": "m1"
        });

        server.post("/api/enrollments/complete").json(&payload).await;
        let response = server
            .post("/api/enrollments/complete")
            .json(&payload)
            .await;
        response.assert_status_ok();

        let body: CompletionReceipt = response.json();
        assert_eq!(body.points, 10);
    }

    #[tokio::test]
    async fn test_complete_unknown_course_returns_500() {
        let (server, _) = server_with_course().await;

        let response = server
            .post("/api/enrollments/complete")
            .json(&json!({
                "email": "alice@example.com",
                "course_id": 999,
                "module_id": "m1"
            }))
            .await;
        response.assert_status_internal_server_error();

        let body: ErrorResponse = response.json();
        assert_eq!(body.code, "ENROLL_FAILED");
    }
}
