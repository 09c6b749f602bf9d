//! REST API handlers

use std::sync::Arc;

use axum::{Json, extract::State};
use lectern_core::catalog::CourseCatalog;
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the server
    pub status: String,
    /// Server version
    pub version: String,
    /// Seconds since server started
    pub uptime_seconds: i64,
    /// Number of courses in the catalog
    pub courses: usize,
}

/// Error payload returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
}

/// Health check endpoint
///
/// Returns server status, version, uptime, and catalog size.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let courses = state
        .catalog
        .list_courses()
        .await
        .map(|c| c.len())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        courses,
    })
}
