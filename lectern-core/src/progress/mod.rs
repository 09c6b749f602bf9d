//! Enrollment progress and learner state

mod error;
mod memory;
mod store;
mod types;

pub use error::StoreError;
pub use memory::MemoryProgressStore;
pub use store::{LearnerDirectory, ProgressStore};
pub use types::{Enrollment, EnrollmentKey, Learner, QuizScoreEntry};
