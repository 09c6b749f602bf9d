//! SQLite persistence shared by the progress store and the catalog

mod migrations;
mod sqlite;

pub use sqlite::SqliteStore;
