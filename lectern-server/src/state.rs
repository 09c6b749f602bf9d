//! Shared application state for the lectern server

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use lectern_core::catalog::{CourseCatalog, MemoryCatalog};
use lectern_core::enrollment::EnrollmentManager;
use lectern_core::progress::{LearnerDirectory, MemoryProgressStore, ProgressStore};
use lectern_core::storage::SqliteStore;

use crate::error::ServerError;

/// Shared application state accessible by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Enrollment manager coordinating progress, learners, and the catalog
    pub manager: Arc<EnrollmentManager>,
    /// Course catalog serving the course and quiz routes
    pub catalog: Arc<dyn CourseCatalog>,
    /// When the server started
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create a new AppState backed by in-memory stores
    pub fn new() -> Self {
        let store = Arc::new(MemoryProgressStore::new());
        let catalog: Arc<dyn CourseCatalog> = Arc::new(MemoryCatalog::new());
        let manager = Arc::new(EnrollmentManager::new(
            store.clone(),
            store,
            catalog.clone(),
        ));

        Self {
            manager,
            catalog,
            started_at: Utc::now(),
        }
    }

    /// Create an AppState backed by a SQLite database at `path`.
    ///
    /// The same handle serves as progress store, learner directory, and
    /// catalog, so enrollments and courses live in one file.
    pub fn with_sqlite<P: AsRef<Path>>(path: P) -> Result<Self, ServerError> {
        let store = Arc::new(SqliteStore::open(path).map_err(|e| {
            ServerError::Internal(format!("failed to open database: {}", e))
        })?);
        let catalog: Arc<dyn CourseCatalog> = store.clone();
        let manager = Arc::new(EnrollmentManager::new(
            store.clone(),
            store,
            catalog.clone(),
        ));

        Ok(Self {
            manager,
            catalog,
            started_at: Utc::now(),
        })
    }

    /// Create AppState with custom components (for testing)
    pub fn with_components(
        store: Arc<dyn ProgressStore>,
        learners: Arc<dyn LearnerDirectory>,
        catalog: Arc<dyn CourseCatalog>,
    ) -> Self {
        let manager = Arc::new(EnrollmentManager::new(store, learners, catalog.clone()));
        Self {
            manager,
            catalog,
            started_at: Utc::now(),
        }
    }

    /// Returns how long the server has been running
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
