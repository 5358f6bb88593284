// Persistence: SQLite-backed local storage, dashboard list, document sessions.

pub mod dashboard;
pub mod local_db;
pub mod sessions;
