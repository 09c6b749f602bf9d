mod loader;
mod types;

pub use loader::{ConfigLoader, default_db_path};
pub use types::LecternConfig;
