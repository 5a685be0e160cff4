pub mod sqlite;

pub use sqlite::SqliteReportStore;
