//! HTTP server module

mod api;
mod courses;
mod enrollments;
mod quizzes;
mod users;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use crate::AppState;

pub use api::{ErrorResponse, HealthResponse};
pub use enrollments::{CompleteRequest, EnrollRequest, EnrollResponse, UnenrollResponse};
pub use quizzes::{QuestionView, QuizView, SubmitQuizRequest, SubmitQuizResponse};

/// Create the HTTP router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(api::health))
        .route("/api/enrollments/enroll", post(enrollments::enroll))
        .route("/api/enrollments/unenroll", post(enrollments::unenroll))
        .route("/api/enrollments/complete", post(enrollments::complete))
        .route("/api/users/:email/summary", get(users::summary))
        .route("/api/quizzes/:quiz_id", get(quizzes::get_quiz))
        .route("/api/quizzes/:quiz_id/submit", post(quizzes::submit_quiz))
        .route(
            "/api/courses",
            get(courses::list_courses).post(courses::create_course),
        )
        .route(
            "/api/courses/:id",
            get(courses::get_course)
                .patch(courses::patch_course)
                .delete(courses::delete_course),
        )
        .route("/api/courses/:id/modules", get(courses::list_modules))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
