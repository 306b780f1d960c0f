// Database migrations module

mod sqlite;
pub use sqlite::run_migrations as run_sqlite_migrations;
pub use sqlite::{DEFAULT_USER_EMAIL, DEFAULT_USER_ID, DEFAULT_USERNAME};
