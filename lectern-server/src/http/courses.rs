//! Course catalog REST API endpoints

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use lectern_core::catalog::{CatalogError, CourseCatalog, CoursePatch, NewCourse};

use super::api::ErrorResponse;
use crate::AppState;

/// GET /api/courses
pub async fn list_courses(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.catalog.list_courses().await {
        Ok(courses) => Json(courses).into_response(),
        Err(e) => internal_error(e).into_response(),
    }
}

/// GET /api/courses/:id
pub async fn get_course(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.catalog.get_course(id).await {
        Ok(Some(course)) => Json(course).into_response(),
        Ok(None) => course_not_found(id).into_response(),
        Err(e) => internal_error(e).into_response(),
    }
}

/// POST /api/courses
pub async fn create_course(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewCourse>,
) -> impl IntoResponse {
    match state.catalog.create_course(req).await {
        Ok(course) => (
            StatusCode::CREATED,
            [(header::LOCATION, format!("/api/courses/{}", course.id))],
            Json(course),
        )
            .into_response(),
        Err(e) => internal_error(e).into_response(),
    }
}

/// PATCH /api/courses/:id
pub async fn patch_course(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(patch): Json<CoursePatch>,
) -> impl IntoResponse {
    match state.catalog.patch_course(id, patch).await {
        Ok(Some(course)) => Json(course).into_response(),
        Ok(None) => course_not_found(id).into_response(),
        Err(e) => internal_error(e).into_response(),
    }
}

/// DELETE /api/courses/:id
///
/// Deleting an absent course still reports success.
pub async fn delete_course(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.catalog.delete_course(id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => internal_error(e).into_response(),
    }
}

/// GET /api/courses/:id/modules
pub async fn list_modules(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.catalog.modules_for_course(id).await {
        Ok(modules) => Json(modules).into_response(),
        Err(CatalogError::CourseNotFound(_)) => course_not_found(id).into_response(),
        Err(e) => internal_error(e).into_response(),
    }
}

fn course_not_found(id: i64) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Course not found: {}", id),
            code: "COURSE_NOT_FOUND".into(),
        }),
    )
}

fn internal_error(e: CatalogError) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: e.to_string(),
            code: "INTERNAL_ERROR".into(),
        }),
    )
}
