//! Course catalog abstraction

mod error;
mod memory;
mod traits;
mod types;

pub use error::CatalogError;
pub use memory::MemoryCatalog;
pub use traits::CourseCatalog;
pub use types::{Course, CourseModule, CoursePatch, NewCourse, Question, QuestionKind, Quiz};
